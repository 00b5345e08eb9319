use crate::color;
use crate::error::{ChartError, validate_value};
use crate::layout;
use derive_more::{AsRef, Deref, Display, From, Into};
use palette::Srgb;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct SliceLabel(String);

crate::impl_string_newtype!(SliceLabel);

/// Angular extent of one slice, in whole degrees with `0 <= start <= end <= 360`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AngleSpan {
    pub start: i32,
    pub end: i32,
}

impl AngleSpan {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn sweep(&self) -> i32 {
        self.end - self.start
    }

    /// Inclusive on both ends, so neighbours share their boundary angle.
    pub fn contains(&self, angle: i32) -> bool {
        self.start <= angle && angle <= self.end
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: SliceLabel,
    pub value: f64,
    pub color: Srgb<u8>,
    pub highlight_color: Srgb<u8>,
    pub(crate) span: Option<AngleSpan>,
}

impl Slice {
    pub fn new(label: SliceLabel, value: f64, color: Srgb<u8>, highlight_strength: f64) -> Self {
        Self {
            label,
            value,
            color,
            highlight_color: color::highlight(color, highlight_strength),
            span: None,
        }
    }

    /// `None` until laid out, and whenever the dataset totals zero.
    pub fn span(&self) -> Option<AngleSpan> {
        self.span
    }
}

/// Slices in drawing order together with their running total.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    slices: Vec<Slice>,
    total_value: f64,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, slice: Slice) {
        self.total_value += slice.value;
        self.slices.push(slice);
    }

    pub fn clear(&mut self) {
        self.slices.clear();
        self.total_value = 0.0;
    }

    pub fn set_value(&mut self, index: usize, value: f64) -> Result<(), ChartError> {
        let value = validate_value(value)?;
        let len = self.slices.len();
        let slice = self
            .slices
            .get_mut(index)
            .ok_or(ChartError::IndexOutOfRange { index, len })?;
        slice.value = value;
        self.total_value = self.slices.iter().map(|s| s.value).sum();
        Ok(())
    }

    /// Recomputes every slice span. Returns `false` for a degenerate layout.
    pub fn relayout(&mut self) -> bool {
        layout::layout_slices(&mut self.slices, self.total_value)
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn get(&self, index: usize) -> Option<&Slice> {
        self.slices.get(index)
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn total_value(&self) -> f64 {
        self.total_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(value: f64) -> Slice {
        Slice::new(SliceLabel::from("s"), value, Srgb::new(10, 20, 30), 1.0)
    }

    #[test]
    fn test_total_tracks_mutations() {
        let mut data = Dataset::new();
        data.push(slice(15.0));
        data.push(slice(25.0));
        assert_eq!(data.total_value(), 40.0);

        data.set_value(0, 5.0).unwrap();
        assert_eq!(data.total_value(), 30.0);

        data.clear();
        assert_eq!(data.total_value(), 0.0);
        assert!(data.is_empty());
    }

    #[test]
    fn test_set_value_rejects_bad_input() {
        let mut data = Dataset::new();
        data.push(slice(1.0));

        assert_eq!(
            data.set_value(3, 1.0),
            Err(ChartError::IndexOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(data.set_value(0, -1.0), Err(ChartError::InvalidValue(-1.0)));
        assert!(data.set_value(0, f64::NAN).is_err());
        assert_eq!(data.get(0).map(|s| s.value), Some(1.0));
    }

    #[test]
    fn test_span_contains_is_inclusive() {
        let span = AngleSpan::new(54, 144);
        assert!(span.contains(54));
        assert!(span.contains(144));
        assert!(!span.contains(145));
        assert_eq!(span.sweep(), 90);
    }
}
