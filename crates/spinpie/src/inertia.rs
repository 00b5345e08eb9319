//! Decelerating fling simulation.
//!
//! [`InertiaSimulator`] is the contract the chart consumes. [`FlingScroller`]
//! is the default: the friction model of a mobile scroll view, where both
//! the fling distance and its duration follow from the release velocity.

use std::time::Duration;

pub trait InertiaSimulator {
    /// Starts a fling at `start` with `velocity` in units per second. The
    /// next [`tick`](Self::tick) anchors the simulation clock.
    fn fling(&mut self, start: i32, velocity: i32);
    fn tick(&mut self, now: Duration);
    fn current_value(&self) -> i32;
    fn is_finished(&self) -> bool;
    /// Stops in place, keeping the current value.
    fn force_finished(&mut self);
    /// Estimated length of the current fling.
    fn duration(&self) -> Duration;
}

// ln(0.78) / ln(0.9)
const DECELERATION_RATE: f64 = 2.358_201_815_425_945;
const INFLEXION: f64 = 0.35;
const SCROLL_FRICTION: f64 = 0.015;
const GRAVITY_EARTH: f64 = 9.80665;
const INCHES_PER_METER: f64 = 39.37;
const DEFAULT_PPI: f64 = 160.0;

#[derive(Debug, Clone)]
pub struct FlingScroller {
    physical_coeff: f64,
    start: i32,
    current: i32,
    distance: f64,
    duration: Duration,
    started_at: Option<Duration>,
    finished: bool,
}

impl Default for FlingScroller {
    fn default() -> Self {
        Self::new(DEFAULT_PPI)
    }
}

impl FlingScroller {
    /// A scroller for a screen of `ppi` pixels per inch. Values that are not
    /// finite and positive fall back to 160.
    pub fn new(ppi: f64) -> Self {
        let ppi = if ppi.is_finite() && ppi > 0.0 {
            ppi
        } else {
            log::warn!("Ignoring screen density {}, using {}", ppi, DEFAULT_PPI);
            DEFAULT_PPI
        };
        Self {
            physical_coeff: GRAVITY_EARTH * INCHES_PER_METER * ppi * 0.84,
            start: 0,
            current: 0,
            distance: 0.0,
            duration: Duration::ZERO,
            started_at: None,
            finished: true,
        }
    }

    fn spline_deceleration(&self, velocity: f64) -> f64 {
        (INFLEXION * velocity.abs() / (SCROLL_FRICTION * self.physical_coeff)).ln()
    }

    fn fling_duration(&self, velocity: f64) -> Duration {
        let l = self.spline_deceleration(velocity);
        Duration::try_from_secs_f64((l / (DECELERATION_RATE - 1.0)).exp()).unwrap_or_default()
    }

    fn fling_distance(&self, velocity: f64) -> f64 {
        let l = self.spline_deceleration(velocity);
        SCROLL_FRICTION
            * self.physical_coeff
            * (DECELERATION_RATE / (DECELERATION_RATE - 1.0) * l).exp()
    }

    fn position(&self, fraction: f64) -> i32 {
        self.start.saturating_add((self.distance * fraction) as i32)
    }
}

impl InertiaSimulator for FlingScroller {
    fn fling(&mut self, start: i32, velocity: i32) {
        self.start = start;
        self.current = start;
        self.started_at = None;

        if velocity == 0 {
            self.distance = 0.0;
            self.duration = Duration::ZERO;
            self.finished = true;
            return;
        }

        let velocity = f64::from(velocity);
        self.duration = self.fling_duration(velocity);
        self.distance = self.fling_distance(velocity).copysign(velocity);
        self.finished = false;
    }

    fn tick(&mut self, now: Duration) {
        if self.finished {
            return;
        }
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_sub(started_at);

        if elapsed >= self.duration {
            self.current = self.position(1.0);
            self.finished = true;
        } else {
            let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
            let exponent = DECELERATION_RATE / (DECELERATION_RATE - 1.0);
            self.current = self.position(1.0 - (1.0 - t).powf(exponent));
        }
    }

    fn current_value(&self) -> i32 {
        self.current
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn force_finished(&mut self) {
        self.finished = true;
    }

    fn duration(&self) -> Duration {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_fling_decelerates_to_rest() {
        let mut scroller = FlingScroller::default();
        scroller.fling(100, 250);

        assert!(!scroller.is_finished());
        let duration = scroller.duration().as_millis();
        assert!((195..=205).contains(&duration), "duration {duration}");

        scroller.tick(ms(1_000));
        assert_eq!(scroller.current_value(), 100);

        let mut last = 100;
        let mut steps = Vec::new();
        for frame in 1..=12 {
            scroller.tick(ms(1_000 + frame * 16));
            let value = scroller.current_value();
            assert!(value >= last);
            steps.push(value - last);
            last = value;
        }
        assert!(steps.first() >= steps.last());

        scroller.tick(ms(2_000));
        assert!(scroller.is_finished());
        assert_eq!(scroller.current_value(), 117);
    }

    #[test]
    fn test_negative_velocity_flings_backwards() {
        let mut scroller = FlingScroller::default();
        scroller.fling(100, -250);
        scroller.tick(ms(0));
        scroller.tick(ms(500));
        assert_eq!(scroller.current_value(), 83);
    }

    #[test]
    fn test_faster_fling_goes_further() {
        let mut slow = FlingScroller::default();
        let mut fast = FlingScroller::default();
        slow.fling(0, 100);
        fast.fling(0, 500);
        assert!(fast.duration() > slow.duration());

        for scroller in [&mut slow, &mut fast] {
            scroller.tick(ms(0));
            scroller.tick(ms(5_000));
        }
        assert!(fast.current_value() > slow.current_value());
    }

    #[test]
    fn test_bad_screen_density_uses_default() {
        for ppi in [0.0, -120.0, f64::NAN, f64::INFINITY] {
            let mut scroller = FlingScroller::new(ppi);
            scroller.fling(100, 250);
            assert_eq!(scroller.duration(), FlingScroller::default().fling_duration(250.0));

            scroller.tick(ms(0));
            scroller.tick(ms(1_000));
            assert!(scroller.is_finished());
            assert_eq!(scroller.current_value(), 117);
        }
    }

    #[test]
    fn test_extreme_velocity_does_not_overflow() {
        let mut scroller = FlingScroller::default();
        scroller.fling(0, i32::MAX);
        scroller.tick(ms(0));
        scroller.tick(Duration::from_secs(100_000));
        assert!(scroller.is_finished());
        assert!(scroller.current_value() > 0);
    }

    #[test]
    fn test_zero_velocity_is_already_finished() {
        let mut scroller = FlingScroller::default();
        scroller.fling(42, 0);
        assert!(scroller.is_finished());
        assert_eq!(scroller.duration(), Duration::ZERO);
        assert_eq!(scroller.current_value(), 42);
    }

    #[test]
    fn test_force_finished_stops_in_place() {
        let mut scroller = FlingScroller::default();
        scroller.fling(0, 2_000);
        scroller.tick(ms(0));
        scroller.tick(ms(50));
        let held = scroller.current_value();
        assert!(held > 0);

        scroller.force_finished();
        scroller.tick(ms(5_000));
        assert!(scroller.is_finished());
        assert_eq!(scroller.current_value(), held);
    }
}
