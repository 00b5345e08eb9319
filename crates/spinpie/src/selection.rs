//! Angle arithmetic relating rotation, the indicator and slice spans.

use crate::config::OpenDirection;
use crate::layout::FULL_CIRCLE;
use crate::rotation::Rotation;
use crate::slice::{AngleSpan, Slice};

/// The layout angle currently under the indicator.
pub fn pointer_angle(rotation: Rotation, indicator: i32, direction: OpenDirection) -> i32 {
    let indicator = indicator.rem_euclid(FULL_CIRCLE);
    let angle = match direction {
        OpenDirection::Clockwise => indicator + FULL_CIRCLE - rotation.degrees(),
        OpenDirection::CounterClockwise => indicator + FULL_CIRCLE / 2 + rotation.degrees(),
    };
    angle.rem_euclid(FULL_CIRCLE)
}

/// First slice whose span contains `angle`. A boundary angle shared by two
/// neighbours belongs to the earlier one.
pub fn resolve(slices: &[Slice], angle: i32) -> Option<usize> {
    slices
        .iter()
        .position(|s| s.span().is_some_and(|span| span.contains(angle)))
}

/// Rotation that puts the middle of `span` under the indicator.
///
/// Picks the solution on the near side of zero so the animation toward it
/// does not spin the long way round.
pub fn centering_target(
    span: AngleSpan,
    rotation: Rotation,
    indicator: i32,
    direction: OpenDirection,
) -> i32 {
    let indicator = indicator.rem_euclid(FULL_CIRCLE);
    let half = span.sweep() / 2;
    let current = rotation.degrees();

    match direction {
        OpenDirection::Clockwise => {
            let target = (indicator - span.start) - half;
            if target < 0 && current > 0 {
                target + FULL_CIRCLE
            } else {
                target
            }
        }
        OpenDirection::CounterClockwise => {
            let target = span.start + half + indicator;
            if target > 270 && current < 90 {
                target - FULL_CIRCLE
            } else {
                target
            }
        }
    }
}
