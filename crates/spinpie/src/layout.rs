//! Proportional angle layout.
//!
//! Each slice gets `trunc(value * 360 / total)` degrees starting where the
//! previous one ended. Truncation leaves a few degrees unassigned at the end,
//! so the last slice always closes the circle at 360.

use crate::slice::{AngleSpan, Slice};

pub const FULL_CIRCLE: i32 = 360;

/// Writes a span into every slice. Returns `false` and clears all spans when
/// there is nothing to divide by.
pub fn layout_slices(slices: &mut [Slice], total_value: f64) -> bool {
    if slices.is_empty() || !total_value.is_finite() || total_value <= 0.0 {
        slices.iter_mut().for_each(|s| s.span = None);
        return false;
    }

    let last = slices.len() - 1;
    let mut current = 0;

    for (i, slice) in slices.iter_mut().enumerate() {
        let end = if i == last {
            FULL_CIRCLE
        } else {
            let sweep = (slice.value * f64::from(FULL_CIRCLE) / total_value) as i32;
            (current + sweep).min(FULL_CIRCLE)
        };
        slice.span = Some(AngleSpan::new(current, end));
        current = end;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slice::SliceLabel;
    use palette::Srgb;

    fn slices(values: &[f64]) -> Vec<Slice> {
        values
            .iter()
            .map(|&v| Slice::new(SliceLabel::from("s"), v, Srgb::new(0, 0, 0), 1.0))
            .collect()
    }

    fn spans(slices: &[Slice]) -> Vec<Option<AngleSpan>> {
        slices.iter().map(Slice::span).collect()
    }

    #[test]
    fn test_reference_layout() {
        let mut data = slices(&[15.0, 25.0, 35.0, 25.0]);
        assert!(layout_slices(&mut data, 100.0));
        assert_eq!(
            spans(&data),
            vec![
                Some(AngleSpan::new(0, 54)),
                Some(AngleSpan::new(54, 144)),
                Some(AngleSpan::new(144, 270)),
                Some(AngleSpan::new(270, 360)),
            ]
        );
    }

    #[test]
    fn test_layout_is_contiguous_and_closed() {
        let values = [1.0, 1.0, 1.0, 7.0, 0.5, 3.3, 0.0, 12.0];
        let total = values.iter().sum();
        let mut data = slices(&values);
        assert!(layout_slices(&mut data, total));

        let spans: Vec<AngleSpan> = data.iter().filter_map(Slice::span).collect();
        assert_eq!(spans.len(), values.len());
        assert_eq!(spans[0].start, 0);
        assert_eq!(spans[spans.len() - 1].end, FULL_CIRCLE);
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
            assert!(pair[0].start <= pair[0].end);
        }
    }

    #[test]
    fn test_truncation_gap_goes_to_last_slice() {
        // 360 / 7 = 51.43 each
        let mut data = slices(&[1.0; 7]);
        layout_slices(&mut data, 7.0);
        assert_eq!(data[5].span(), Some(AngleSpan::new(255, 306)));
        assert_eq!(data[6].span(), Some(AngleSpan::new(306, 360)));
    }

    #[test]
    fn test_zero_total_is_degenerate() {
        let mut data = slices(&[0.0, 0.0]);
        layout_slices(&mut data, 1.0);
        assert!(data[0].span().is_some());

        assert!(!layout_slices(&mut data, 0.0));
        assert_eq!(spans(&data), vec![None, None]);
    }

    #[test]
    fn test_empty_is_degenerate() {
        assert!(!layout_slices(&mut [], 10.0));
    }

    #[test]
    fn test_layout_is_idempotent() {
        let mut data = slices(&[3.0, 9.0, 4.0]);
        layout_slices(&mut data, 16.0);
        let first = spans(&data);
        layout_slices(&mut data, 16.0);
        assert_eq!(spans(&data), first);
    }
}
