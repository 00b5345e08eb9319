use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::f64::consts::PI;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};

/// Time curve applied to an animation's linear progress.
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
#[serde(rename_all = "kebab-case")]
pub enum Interpolator {
    #[strum(to_string = "linear")]
    Linear,
    /// Slow start and end, fastest in the middle.
    #[default]
    #[strum(
        to_string = "accelerate-decelerate",
        serialize = "accelerate_decelerate",
        serialize = "ease"
    )]
    AccelerateDecelerate,
}

impl Interpolator {
    pub fn interpolate(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}

/// A time-bounded tween from one value to another, advanced by frame ticks.
pub trait AnimationDriver {
    /// Arms the animation. The next [`tick`](Self::tick) anchors its clock.
    fn start(&mut self, from: f64, to: f64, duration: Duration);
    /// Advances to `now` and returns the new value.
    fn tick(&mut self, now: Duration) -> f64;
    fn value(&self) -> f64;
    fn is_running(&self) -> bool;
    /// Stops in place without jumping to the end value.
    fn cancel(&mut self);
}

#[derive(Debug, Clone)]
pub struct Animator {
    interpolator: Interpolator,
    from: f64,
    to: f64,
    value: f64,
    duration: Duration,
    started_at: Option<Duration>,
    running: bool,
}

impl Animator {
    pub fn new(interpolator: Interpolator) -> Self {
        Self {
            interpolator,
            from: 0.0,
            to: 0.0,
            value: 0.0,
            duration: Duration::ZERO,
            started_at: None,
            running: false,
        }
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(Interpolator::default())
    }
}

impl AnimationDriver for Animator {
    fn start(&mut self, from: f64, to: f64, duration: Duration) {
        self.from = from;
        self.to = to;
        self.value = from;
        self.duration = duration;
        self.started_at = None;
        self.running = true;
    }

    fn tick(&mut self, now: Duration) -> f64 {
        if !self.running {
            return self.value;
        }
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_sub(started_at);

        if elapsed >= self.duration {
            self.value = self.to;
            self.running = false;
        } else {
            let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
            self.value = self.from + (self.to - self.from) * self.interpolator.interpolate(t);
        }
        self.value
    }

    fn value(&self) -> f64 {
        self.value
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn cancel(&mut self) {
        self.running = false;
    }
}
