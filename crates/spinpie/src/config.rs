use crate::animation::Interpolator;
use crate::color::HexColor;
use crate::layout::FULL_CIRCLE;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};

/// Whether slice angles grow clockwise or counter-clockwise from angle zero.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum OpenDirection {
    #[default]
    #[strum(to_string = "clockwise", serialize = "cw")]
    Clockwise,
    #[strum(
        to_string = "counterclockwise",
        serialize = "counter-clockwise",
        serialize = "ccw"
    )]
    CounterClockwise,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Draw a highlighted ring and a hollow center.
    pub use_inner_padding: bool,
    /// Hollow center radius, in percent of the pie radius.
    pub inner_padding: f64,
    /// Width of the highlighted ring, in percent of the pie radius.
    pub inner_padding_outline: f64,
    pub highlight_strength: f64,
    /// Gates all gesture handling.
    pub use_pie_rotation: bool,
    /// Snap the selected slice under the indicator after every scroll.
    pub auto_center_in_slice: bool,
    pub draw_value_in_pie: bool,
    pub value_text_size: f64,
    pub value_text_color: HexColor,
    pub use_custom_inner_value: bool,
    pub inner_value: String,
    pub open_direction: OpenDirection,
    /// Where the selection is read, in degrees. 90 is the bottom of the circle.
    pub indicator_angle: i32,
    /// Gesture vectors are divided by this before becoming degrees.
    pub fling_velocity_downscale: i32,
    /// Swipes slower than this (px/s) are plain releases.
    pub min_fling_velocity: f64,
    pub auto_center_duration_ms: u64,
    /// Zero disables the reveal sweep.
    pub reveal_duration_ms: u64,
    pub legend_height: f64,
    pub interpolator: Interpolator,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            use_inner_padding: true,
            inner_padding: 65.0,
            inner_padding_outline: 5.0,
            highlight_strength: 1.15,
            use_pie_rotation: true,
            auto_center_in_slice: true,
            draw_value_in_pie: true,
            value_text_size: 14.0,
            value_text_color: HexColor::new(0x89, 0x89, 0x89),
            use_custom_inner_value: false,
            inner_value: String::new(),
            open_direction: OpenDirection::Clockwise,
            indicator_angle: 90,
            fling_velocity_downscale: 4,
            min_fling_velocity: 50.0,
            auto_center_duration_ms: 250,
            reveal_duration_ms: 0,
            legend_height: 58.0,
            interpolator: Interpolator::AccelerateDecelerate,
        }
    }
}

impl ChartConfig {
    pub fn auto_center_duration(&self) -> Duration {
        Duration::from_millis(self.auto_center_duration_ms)
    }

    pub fn reveal_duration(&self) -> Duration {
        Duration::from_millis(self.reveal_duration_ms)
    }

    /// The indicator angle folded into `[0, 360)`.
    pub fn indicator(&self) -> i32 {
        self.indicator_angle.rem_euclid(FULL_CIRCLE)
    }

    pub(crate) fn downscale(&self) -> i32 {
        self.fling_velocity_downscale.max(1)
    }
}
