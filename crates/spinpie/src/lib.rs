//! Toolkit-independent core of a rotatable pie chart.
//!
//! The host feeds pointer gestures and frame timestamps into a [`PieChart`];
//! the chart keeps slice angles, rotation and the selected slice consistent
//! and tells the host when to redraw.

pub mod animation;
pub mod chart;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod inertia;
pub mod layout;
pub mod macros;
pub mod motion;
pub mod rotation;
pub mod selection;
pub mod slice;

pub use animation::{AnimationDriver, Animator, Interpolator};
pub use chart::PieChart;
pub use color::HexColor;
pub use config::{ChartConfig, OpenDirection};
pub use error::ChartError;
pub use geometry::{ChartGeometry, Point, Rect};
pub use gesture::GestureEvent;
pub use inertia::{FlingScroller, InertiaSimulator};
pub use motion::{ChartAction, Motion};
pub use rotation::Rotation;
pub use slice::{AngleSpan, Dataset, Slice, SliceLabel};
