use crate::config::ChartConfig;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Square of half-width `radius` centered on `center`.
    pub fn around(center: Point, radius: f64) -> Self {
        Self::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        )
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }
}

/// Where the pie, its inner ring and the legend strip sit inside the widget.
///
/// Recomputed as a whole on every size change and handed to the renderer by
/// reference.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChartGeometry {
    pub bounds: Rect,
    /// Outer edge of the highlighted ring.
    pub inner_bounds: Rect,
    /// Edge of the hollow center.
    pub inner_outline_bounds: Rect,
    pub legend: Rect,
    pub radius: f64,
}

impl ChartGeometry {
    /// The pie is the largest circle centered in the area above the legend.
    pub fn calculate(width: f64, height: f64, config: &ChartConfig) -> Self {
        let width = width.max(0.0);
        let graph_height = (height - config.legend_height).max(0.0);
        let diameter = width.min(graph_height);
        let radius = diameter / 2.0;

        let (left, top) = ((width - diameter) / 2.0, (graph_height - diameter) / 2.0);
        let bounds = Rect::new(left, top, left + diameter, top + diameter);
        let center = bounds.center();

        let padding = radius / 100.0 * config.inner_padding;
        let outline = radius / 100.0 * config.inner_padding_outline;

        Self {
            bounds,
            inner_bounds: Rect::around(center, padding + outline),
            inner_outline_bounds: Rect::around(center, padding),
            legend: Rect::new(0.0, graph_height, width, height.max(graph_height)),
            radius,
        }
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    /// Vector from the pie center to `point`.
    pub fn relative(&self, point: Point) -> Point {
        let center = self.center();
        Point::new(point.x - center.x, point.y - center.y)
    }
}
