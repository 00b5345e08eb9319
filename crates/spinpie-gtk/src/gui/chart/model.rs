use crate::config::Config;
use spinpie::{ChartAction, GestureEvent, PieChart, Point};

/// A [`PieChart`] fed from raw pointer positions.
///
/// GTK reports drag offsets relative to where the drag began, while the chart
/// wants per-event deltas, so the last seen position is kept here.
pub struct ChartState {
    pub chart: PieChart,
    last_pointer: Option<Point>,
    size: (f64, f64),
}

impl ChartState {
    pub fn new(config: &Config) -> Self {
        Self {
            chart: build_chart(config),
            last_pointer: None,
            size: (0.0, 0.0),
        }
    }

    /// Replaces slices and settings, keeping the current rotation and size.
    pub fn load(&mut self, config: &Config) -> ChartAction {
        let rotation = self.chart.rotation();
        self.chart = build_chart(config);
        let _ = self.chart.set_rotation(rotation.degrees());
        let (width, height) = self.size;
        self.chart.resize(width, height).merge(ChartAction::redraw())
    }

    pub fn resize(&mut self, width: f64, height: f64) -> ChartAction {
        self.size = (width, height);
        self.chart.resize(width, height)
    }

    /// Whether the host should keep delivering frame ticks.
    pub fn wants_frames(&self) -> bool {
        self.chart.is_animating()
    }

    pub fn pointer_down(&mut self, position: Point) -> ChartAction {
        self.last_pointer = Some(position);
        self.chart.on_gesture(GestureEvent::PointerDown(position))
    }

    pub fn pointer_move(&mut self, position: Point) -> ChartAction {
        let Some(last) = self.last_pointer.replace(position) else {
            return ChartAction::none();
        };
        let delta = Point::new(position.x - last.x, position.y - last.y);
        self.chart.on_gesture(GestureEvent::Drag { delta, position })
    }

    pub fn swipe(&mut self, velocity_x: f64, velocity_y: f64) -> ChartAction {
        let position = self
            .last_pointer
            .unwrap_or_else(|| self.chart.geometry().center());
        self.chart.on_gesture(GestureEvent::Fling {
            velocity: Point::new(velocity_x, velocity_y),
            position,
        })
    }

    pub fn pointer_up(&mut self) -> ChartAction {
        self.chart.on_gesture(GestureEvent::PointerUp)
    }
}

fn build_chart(config: &Config) -> PieChart {
    let mut chart = PieChart::new(config.chart.clone());
    chart.set_selection_listener(|index| log::info!("Selected slice {}", index));

    for slice in &config.slices {
        if let Err(e) = chart.append_slice(slice.value, slice.color.rgb(), slice.label.clone()) {
            log::warn!("Skipping slice '{}': {}", slice.label, e);
        }
    }
    chart
}
