pub mod model;
pub mod view;

pub use model::ChartState;
pub use view::draw;

pub const INDICATOR_SIZE: f64 = 8.0; // half-width of the legend triangle
pub const INDICATOR_MARGIN: f64 = 4.0;
pub const LEGEND_TEXT_SIZE: f64 = 14.0;
pub const NO_DATA_TEXT: &str = "No Data available";
