//! The chart state machine.
//!
//! [`PieChart`] owns the dataset, the rotation and the selected slice, and
//! moves between [`Motion`] states as gestures and frame ticks arrive:
//!
//! - pointer-down always wins: any fling or auto-center stops where it is
//!   and the pie follows the pointer;
//! - a release either hands the remaining velocity to the inertia simulator
//!   or settles at once;
//! - settling optionally animates the selected slice under the indicator.
//!
//! Every rotation change re-resolves the selection, and the listener hears
//! about a new selection before the call returns its [`ChartAction`].

use crate::animation::{AnimationDriver, Animator};
use crate::config::{ChartConfig, OpenDirection};
use crate::error::{ChartError, validate_value};
use crate::geometry::{ChartGeometry, Point};
use crate::gesture::{self, GestureEvent};
use crate::inertia::{FlingScroller, InertiaSimulator};
use crate::motion::{ChartAction, Motion};
use crate::rotation::Rotation;
use crate::selection;
use crate::slice::{Dataset, Slice, SliceLabel};
use palette::Srgb;
use std::time::Duration;

type SelectionListener = Box<dyn FnMut(usize)>;

pub struct PieChart<S = FlingScroller, A = Animator> {
    config: ChartConfig,
    dataset: Dataset,
    rotation: Rotation,
    selection: Option<usize>,
    geometry: ChartGeometry,
    motion: Motion,
    scroller: S,
    auto_center: A,
    reveal: A,
    listener: Option<SelectionListener>,
}

impl PieChart {
    pub fn new(config: ChartConfig) -> Self {
        let interpolator = config.interpolator;
        Self::with_drivers(
            config,
            FlingScroller::default(),
            Animator::new(interpolator),
            Animator::new(interpolator),
        )
    }
}

impl<S: InertiaSimulator, A: AnimationDriver> PieChart<S, A> {
    pub fn with_drivers(config: ChartConfig, scroller: S, auto_center: A, reveal: A) -> Self {
        Self {
            config,
            dataset: Dataset::new(),
            rotation: Rotation::default(),
            selection: None,
            geometry: ChartGeometry::default(),
            motion: Motion::Idle,
            scroller,
            auto_center,
            reveal,
            listener: None,
        }
    }

    /// Replaces the single selection subscriber.
    pub fn set_selection_listener(&mut self, listener: impl FnMut(usize) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn append_slice(
        &mut self,
        value: f64,
        color: Srgb<u8>,
        label: impl Into<SliceLabel>,
    ) -> Result<ChartAction, ChartError> {
        let value = validate_value(value)?;
        self.dataset.push(Slice::new(
            label.into(),
            value,
            color,
            self.config.highlight_strength,
        ));
        Ok(self.on_data_changed())
    }

    pub fn set_slice_value(&mut self, index: usize, value: f64) -> Result<ChartAction, ChartError> {
        self.dataset.set_value(index, value)?;
        Ok(self.on_data_changed())
    }

    pub fn clear(&mut self) -> ChartAction {
        self.dataset.clear();
        self.on_data_changed()
    }

    pub fn slices(&self) -> &[Slice] {
        self.dataset.slices()
    }

    pub fn total_value(&self) -> f64 {
        self.dataset.total_value()
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: i32) -> ChartAction {
        self.rotate_to(Rotation::new(degrees));
        ChartAction::redraw()
    }

    pub fn current_item(&self) -> Option<usize> {
        self.selection
    }

    pub fn current_slice(&self) -> Option<&Slice> {
        self.selection.and_then(|i| self.dataset.get(i))
    }

    /// Selects `index` and notifies the listener. With `animate` the pie then
    /// rotates to center the slice under the indicator.
    pub fn set_current_item(&mut self, index: usize, animate: bool) -> Result<ChartAction, ChartError> {
        let len = self.dataset.len();
        let Some(slice) = self.dataset.get(index) else {
            log::warn!("Rejected selection of slice {} out of {}", index, len);
            return Err(ChartError::IndexOutOfRange { index, len });
        };
        if slice.span().is_none() {
            log::warn!("Rejected selection of slice {} without angle range", index);
            return Err(ChartError::NoAngleRange(index));
        }

        self.select(index);
        if animate {
            self.center_on_current_item();
        }
        Ok(ChartAction::redraw())
    }

    pub fn resize(&mut self, width: f64, height: f64) -> ChartAction {
        self.geometry = ChartGeometry::calculate(width, height, &self.config);
        self.on_data_changed()
    }

    pub fn geometry(&self) -> &ChartGeometry {
        &self.geometry
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn set_open_direction(&mut self, direction: OpenDirection) -> ChartAction {
        self.config.open_direction = direction;
        self.on_data_changed()
    }

    pub fn set_auto_center_in_slice(&mut self, enabled: bool) {
        self.config.auto_center_in_slice = enabled;
    }

    pub fn set_use_pie_rotation(&mut self, enabled: bool) {
        self.config.use_pie_rotation = enabled;
        if !enabled {
            self.halt();
            self.motion = Motion::Idle;
        }
    }

    pub fn set_use_inner_padding(&mut self, enabled: bool) -> ChartAction {
        self.config.use_inner_padding = enabled;
        ChartAction::redraw()
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn inertia(&self) -> &S {
        &self.scroller
    }

    pub fn is_animating(&self) -> bool {
        self.motion.is_animating() || self.reveal.is_running()
    }

    /// Starts the sweep-in animation, if the configuration gives it a duration.
    pub fn start_reveal(&mut self) -> ChartAction {
        let duration = self.config.reveal_duration();
        if duration.is_zero() {
            return ChartAction::none();
        }
        self.reveal.start(0.0, 1.0, duration);
        ChartAction::redraw()
    }

    /// Multiplier for slice angles while revealing; 1 otherwise.
    pub fn reveal_fraction(&self) -> f64 {
        if self.reveal.is_running() {
            self.reveal.value().clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    pub fn on_gesture(&mut self, event: GestureEvent) -> ChartAction {
        if !self.config.use_pie_rotation {
            return ChartAction::none();
        }

        match event {
            GestureEvent::PointerDown(_) => {
                self.halt();
                log::debug!("Drag started at {}", self.rotation);
                self.motion = Motion::Dragging;
                ChartAction::none()
            }
            GestureEvent::Drag { delta, position } => self.drag(delta, position),
            GestureEvent::Fling { velocity, position } => self.fling(velocity, position),
            GestureEvent::PointerUp => {
                if self.motion == Motion::Dragging {
                    self.settle();
                }
                ChartAction::none()
            }
        }
    }

    /// Advances whatever is moving to the frame time `now`.
    pub fn tick(&mut self, now: Duration) -> ChartAction {
        let mut action = ChartAction::none();

        match self.motion {
            Motion::Flinging => {
                self.scroller.tick(now);
                self.rotate_to(Rotation::new(self.scroller.current_value()));
                action = ChartAction::redraw();
                if self.scroller.is_finished() {
                    log::debug!("Fling came to rest at {}", self.rotation);
                    self.settle();
                }
            }
            Motion::AutoCentering => {
                let value = self.auto_center.tick(now);
                self.rotate_to(Rotation::new(value as i32));
                action = ChartAction::redraw();
                if !self.auto_center.is_running() {
                    self.motion = Motion::Idle;
                }
            }
            Motion::Idle | Motion::Dragging => {}
        }

        if self.reveal.is_running() {
            self.reveal.tick(now);
            action = ChartAction::redraw();
        }
        action
    }

    fn drag(&mut self, delta: Point, position: Point) -> ChartAction {
        if self.motion != Motion::Dragging {
            self.halt();
            log::debug!("Drag started at {}", self.rotation);
            self.motion = Motion::Dragging;
        }

        let step = self.scroll_degrees(delta, position);
        if step == 0 {
            return ChartAction::none();
        }
        self.rotate_to(self.rotation.offset(step));
        ChartAction::redraw()
    }

    fn fling(&mut self, velocity: Point, position: Point) -> ChartAction {
        if velocity.length() < self.config.min_fling_velocity {
            if self.motion == Motion::Dragging {
                self.settle();
            }
            return ChartAction::none();
        }

        let speed = self.scroll_degrees(velocity, position);
        self.auto_center.cancel();
        self.scroller.fling(self.rotation.degrees(), speed);
        log::debug!(
            "Fling from {} at {} deg/s for {:?}",
            self.rotation,
            speed,
            self.scroller.duration()
        );
        self.motion = Motion::Flinging;
        ChartAction::none()
    }

    fn scroll_degrees(&self, vector: Point, position: Point) -> i32 {
        let radius = self.geometry.relative(position);
        let scroll = gesture::vector_to_scalar_scroll(vector.x, vector.y, radius.x, radius.y);
        gesture::scroll_to_degrees(scroll, self.config.downscale())
    }

    /// Stops a running fling or auto-center in place.
    fn halt(&mut self) {
        match self.motion {
            Motion::Flinging => {
                self.scroller.force_finished();
                log::debug!("Fling interrupted at {}", self.rotation);
            }
            Motion::AutoCentering => self.auto_center.cancel(),
            Motion::Idle | Motion::Dragging => {}
        }
    }

    fn settle(&mut self) {
        log::debug!("Settled at {}", self.rotation);
        self.motion = Motion::Idle;
        if self.config.auto_center_in_slice {
            self.center_on_current_item();
        }
    }

    fn center_on_current_item(&mut self) {
        let Some(span) = self.current_slice().and_then(Slice::span) else {
            return;
        };
        let target = selection::centering_target(
            span,
            self.rotation,
            self.config.indicator(),
            self.config.open_direction,
        );
        log::debug!(
            "Centering slice {:?} from {} to {}",
            self.selection,
            self.rotation,
            target
        );

        self.scroller.force_finished();
        self.auto_center.start(
            f64::from(self.rotation.degrees()),
            f64::from(target),
            self.config.auto_center_duration(),
        );
        self.motion = Motion::AutoCentering;
    }

    fn on_data_changed(&mut self) -> ChartAction {
        if !self.dataset.relayout() {
            if self.selection.take().is_some() {
                log::debug!("Selection cleared, no slice has an angle range");
            }
            if self.motion == Motion::AutoCentering {
                self.auto_center.cancel();
                self.motion = Motion::Idle;
            }
            return ChartAction::redraw();
        }

        if self.selection.is_some_and(|i| i >= self.dataset.len()) {
            self.selection = None;
        }
        self.update_selection();
        if matches!(self.motion, Motion::Idle | Motion::AutoCentering) {
            self.settle();
        }
        ChartAction::redraw()
    }

    fn rotate_to(&mut self, rotation: Rotation) {
        self.rotation = rotation;
        self.update_selection();
    }

    fn update_selection(&mut self) {
        let angle = selection::pointer_angle(
            self.rotation,
            self.config.indicator(),
            self.config.open_direction,
        );
        if let Some(index) = selection::resolve(self.dataset.slices(), angle)
            && self.selection != Some(index)
        {
            self.select(index);
        }
    }

    fn select(&mut self, index: usize) {
        self.selection = Some(index);
        if let Some(listener) = self.listener.as_mut() {
            listener(index);
        }
    }
}
