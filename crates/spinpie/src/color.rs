use derive_more::{Deref, From, Into};
use palette::Srgb;
use palette::rgb::FromHexError;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

/// An opaque sRGB color written as `#RRGGBB` (or `#RGB`) in configuration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deref, From, Into, SerializeDisplay, DeserializeFromStr,
)]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    pub fn rgb(&self) -> Srgb<u8> {
        self.0
    }
}

impl FromStr for HexColor {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim()).map(Self)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}",
            self.0.red, self.0.green, self.0.blue
        )
    }
}

/// Brightens `color` by `strength`, saturating each channel at 255.
pub fn highlight(color: Srgb<u8>, strength: f64) -> Srgb<u8> {
    let scale = |channel: u8| (strength * f64::from(channel)).min(255.0) as u8;
    Srgb::new(scale(color.red), scale(color.green), scale(color.blue))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_parsing() {
        let color: HexColor = "#FE6DA8".parse().unwrap();
        assert_eq!(color.rgb(), Srgb::new(0xFE, 0x6D, 0xA8));
        assert_eq!(color.to_string(), "#FE6DA8");

        assert!("not a color".parse::<HexColor>().is_err());
    }

    #[test]
    fn test_hex_color_deserialization() {
        let color: HexColor = serde_json::from_str("\"#56b7f1\"").unwrap();
        assert_eq!(color, HexColor::new(0x56, 0xB7, 0xF1));
    }

    #[test]
    fn test_highlight_saturates() {
        let lifted = highlight(Srgb::new(100, 240, 0), 1.15);
        assert_eq!(lifted, Srgb::new(114, 255, 0));
    }

    #[test]
    fn test_highlight_truncates() {
        // 1.5 * 3 = 4.5
        assert_eq!(highlight(Srgb::new(3, 3, 3), 1.5), Srgb::new(4, 4, 4));
    }
}
