//! Pointer gestures and their reduction to angular scroll.

use crate::geometry::Point;
use std::cmp::Ordering;

/// One event from a single-pointer gesture recognizer. Positions are in
/// widget coordinates, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    PointerDown(Point),
    /// Pointer moved by `delta` since the previous event and is now at `position`.
    Drag { delta: Point, position: Point },
    /// Released with `velocity` in px/s while at `position`.
    Fling { velocity: Point, position: Point },
    PointerUp,
}

/// Projects the motion `(dx, dy)` onto the tangent of the radius vector
/// `(x, y)`.
///
/// The result keeps the length of the motion and is positive when the motion
/// turns clockwise around the center, negative when it turns
/// counter-clockwise, and zero for purely radial motion.
pub fn vector_to_scalar_scroll(dx: f64, dy: f64, x: f64, y: f64) -> f64 {
    let length = dx.hypot(dy);
    let (tangent_x, tangent_y) = (-y, x);
    let dot = tangent_x * dx + tangent_y * dy;

    match dot.partial_cmp(&0.0) {
        Some(Ordering::Greater) => length,
        Some(Ordering::Less) => -length,
        _ => 0.0,
    }
}

/// Whole degrees for a scroll amount, truncating before the divide.
pub fn scroll_to_degrees(scroll: f64, downscale: i32) -> i32 {
    (scroll as i32) / downscale.max(1)
}
