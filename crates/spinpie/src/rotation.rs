use crate::layout::FULL_CIRCLE;
use derive_more::{Display, Into};

/// Rotation of the whole pie in degrees, always within `[0, 360)`.
///
/// The field is private and every constructor normalizes, so an
/// out-of-range rotation cannot be stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Into)]
pub struct Rotation(i32);

impl Rotation {
    pub fn new(degrees: i32) -> Self {
        Self(degrees.rem_euclid(FULL_CIRCLE))
    }

    pub fn degrees(self) -> i32 {
        self.0
    }

    pub fn offset(self, delta: i32) -> Self {
        let turned = (i64::from(self.0) + i64::from(delta)).rem_euclid(i64::from(FULL_CIRCLE));
        Self(turned as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_into_range() {
        for raw in [0, 1, 359, 360, 361, 720, -1, -359, -360, -361, i32::MAX, i32::MIN] {
            let r = Rotation::new(raw).degrees();
            assert!((0..360).contains(&r), "{raw} -> {r}");
            assert_eq!((i64::from(raw) - i64::from(r)).rem_euclid(360), 0);
        }
    }

    #[test]
    fn test_negative_wraps_forward() {
        assert_eq!(Rotation::new(-30).degrees(), 330);
        assert_eq!(Rotation::new(423).degrees(), 63);
    }

    #[test]
    fn test_offset_does_not_overflow() {
        let r = Rotation::new(350).offset(i32::MAX);
        assert_eq!(
            i64::from(r.degrees()),
            (350 + i64::from(i32::MAX)).rem_euclid(360)
        );
        assert_eq!(Rotation::new(10).offset(-20).degrees(), 350);
    }
}
