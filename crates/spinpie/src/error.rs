use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("Slice index {index} out of range for {len} slices")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Slice {0} has no angle range (total value is zero)")]
    NoAngleRange(usize),
    #[error("Slice value must be finite and non-negative, got {0}")]
    InvalidValue(f64),
}

pub(crate) fn validate_value(value: f64) -> Result<f64, ChartError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ChartError::InvalidValue(value))
    }
}
