use crate::angle::{normalize, signed_delta};
use crate::settings::WheelSettings;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    pub angle: f64,
    pub angular_velocity: f64, // degrees per nominal frame
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub angle: f64,
    pub timestamp_ms: u64,
}

/// What the wheel does after a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Idle,
    Settled,
    Coasting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Tracking,
    Coasting,
}

/// Converts a stream of drag angles into rotation state and runs the inertial
/// decay after release.
#[derive(Debug, Clone)]
pub struct AngleTracker {
    state: RotationState,
    phase: Phase,
    last_sample: Option<GestureSample>,
    damping_factor: f64,
    min_velocity: f64,
    frame_ms: f64,
}

impl AngleTracker {
    pub fn new(settings: &WheelSettings) -> Self {
        Self {
            state: RotationState::default(),
            phase: Phase::Idle,
            last_sample: None,
            damping_factor: settings.damping_factor,
            min_velocity: settings.min_velocity,
            frame_ms: settings.frame_ms as f64,
        }
    }

    pub fn reconfigure(&mut self, settings: &WheelSettings) {
        self.damping_factor = settings.damping_factor;
        self.min_velocity = settings.min_velocity;
        self.frame_ms = settings.frame_ms as f64;
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    pub fn angle(&self) -> f64 {
        self.state.angle
    }

    pub fn is_coasting(&self) -> bool {
        self.phase == Phase::Coasting
    }

    pub fn last_sample(&self) -> Option<GestureSample> {
        self.last_sample
    }

    pub fn start(&mut self, angle: f64, time_ms: u64) {
        if !angle.is_finite() {
            log::trace!("Ignoring non-finite start angle");
            return;
        }
        let angle = normalize(angle);
        self.phase = Phase::Tracking;
        self.state = RotationState {
            angle,
            angular_velocity: 0.0,
            is_active: true,
        };
        self.last_sample = Some(GestureSample {
            angle,
            timestamp_ms: time_ms,
        });
    }

    /// Returns the angle on every tracked call, even when it did not move.
    pub fn update(&mut self, angle: f64, time_ms: u64) -> Option<f64> {
        if self.phase != Phase::Tracking || !angle.is_finite() {
            return None;
        }
        let angle = normalize(angle);

        if let Some(last) = self.last_sample {
            let delta_angle = signed_delta(last.angle, angle);
            let delta_time = time_ms as f64 - last.timestamp_ms as f64;
            // equal or out-of-order timestamps keep the previous velocity
            if delta_time > 0.0 {
                self.state.angular_velocity = delta_angle / delta_time * self.frame_ms;
            }
        }

        self.state.angle = angle;
        self.last_sample = Some(GestureSample {
            angle,
            timestamp_ms: time_ms,
        });
        Some(angle)
    }

    pub fn end(&mut self) -> Motion {
        match self.phase {
            Phase::Idle => Motion::Idle,
            Phase::Coasting => Motion::Coasting,
            Phase::Tracking => {
                self.last_sample = None;
                if self.state.angular_velocity.abs() > self.min_velocity {
                    log::debug!(
                        "Coasting from {:.2} at {:.3} deg/frame",
                        self.state.angle,
                        self.state.angular_velocity
                    );
                    self.phase = Phase::Coasting;
                    Motion::Coasting
                } else {
                    self.settle();
                    Motion::Settled
                }
            }
        }
    }

    /// Advances one inertia frame and returns the new angle.
    ///
    /// Each frame multiplies the velocity by the damping factor regardless of
    /// how much wall-clock time actually passed. The frame that takes the
    /// velocity under the minimum still moves the wheel, then the tracker goes
    /// idle and later ticks return `None`.
    pub fn tick(&mut self) -> Option<f64> {
        if self.phase != Phase::Coasting {
            return None;
        }
        self.state.angular_velocity *= self.damping_factor;
        self.state.angle = normalize(self.state.angle + self.state.angular_velocity);

        if self.state.angular_velocity.abs() < self.min_velocity {
            log::debug!("Settled at {:.2}", self.state.angle);
            self.settle();
        }
        Some(self.state.angle)
    }

    pub fn halt(&mut self) {
        if self.phase != Phase::Idle {
            log::trace!("Halted at {:.2}", self.state.angle);
        }
        self.state.angular_velocity = 0.0;
        self.last_sample = None;
        self.settle();
    }

    fn settle(&mut self) {
        self.phase = Phase::Idle;
        self.state.is_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> AngleTracker {
        AngleTracker::new(&WheelSettings::default())
    }

    #[test]
    fn test_start_resets_state() {
        let mut t = tracker();
        t.start(370.0, 5);
        assert_eq!(
            t.state(),
            RotationState {
                angle: 10.0,
                angular_velocity: 0.0,
                is_active: true
            }
        );
        assert_eq!(
            t.last_sample(),
            Some(GestureSample {
                angle: 10.0,
                timestamp_ms: 5
            })
        );
    }

    #[test]
    fn test_velocity_is_per_nominal_frame() {
        let mut t = tracker();
        t.start(10.0, 0);
        assert_eq!(t.update(20.0, 16), Some(20.0));
        assert!((t.state().angular_velocity - 10.0).abs() < 1e-12);

        t.update(30.0, 48);
        assert!((t.state().angular_velocity - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_update_ignored_when_inactive() {
        let mut t = tracker();
        assert_eq!(t.update(45.0, 10), None);
        assert_eq!(t.state(), RotationState::default());
    }

    #[test]
    fn test_update_reports_unchanged_angle() {
        let mut t = tracker();
        t.start(90.0, 0);
        assert_eq!(t.update(90.0, 10), Some(90.0));
        assert_eq!(t.update(90.0, 20), Some(90.0));
    }

    #[test]
    fn test_same_timestamp_skips_velocity() {
        let mut t = tracker();
        t.start(0.0, 100);
        t.update(8.0, 116);
        let v = t.state().angular_velocity;
        t.update(40.0, 116);
        assert_eq!(t.state().angular_velocity, v);
        assert_eq!(t.angle(), 40.0);

        t.update(50.0, 90);
        assert_eq!(t.state().angular_velocity, v);
        assert_eq!(t.angle(), 50.0);
    }

    #[test]
    fn test_non_finite_angles_are_ignored() {
        let mut t = tracker();
        t.start(f64::NAN, 0);
        assert!(!t.state().is_active);

        t.start(30.0, 0);
        assert_eq!(t.update(f64::INFINITY, 16), None);
        assert_eq!(t.update(f64::NAN, 32), None);
        assert_eq!(t.angle(), 30.0);
        assert_eq!(t.state().angular_velocity, 0.0);
        assert_eq!(t.update(40.0, 48), Some(40.0));
    }

    #[test]
    fn test_velocity_across_zero_uses_short_arc() {
        let mut t = tracker();
        t.start(355.0, 0);
        t.update(5.0, 16);
        assert!((t.state().angular_velocity - 10.0).abs() < 1e-9);
        assert_eq!(t.angle(), 5.0);
    }

    #[test]
    fn test_angle_stays_in_range() {
        let mut t = tracker();
        t.start(0.0, 0);
        let mut raw = 0.0;
        for step in 1..500u64 {
            raw += 37.3 * if step % 7 == 0 { -3.0 } else { 1.0 };
            let angle = t.update(raw, step * 16).unwrap();
            assert!((0.0..360.0).contains(&angle), "angle {angle} out of range");
        }
    }

    #[test]
    fn test_slow_release_settles_immediately() {
        let mut t = tracker();
        t.start(10.0, 0);
        t.update(10.05, 16);
        assert_eq!(t.end(), Motion::Settled);
        assert!(!t.state().is_active);
        assert_eq!(t.tick(), None);
    }

    #[test]
    fn test_release_at_exact_minimum_settles() {
        let mut t = AngleTracker::new(&WheelSettings {
            min_velocity: 0.5,
            ..Default::default()
        });
        t.start(0.0, 0);
        t.update(0.5, 16);
        assert_eq!(t.end(), Motion::Settled);
    }

    #[test]
    fn test_end_without_start_is_idle() {
        let mut t = tracker();
        assert_eq!(t.end(), Motion::Idle);
        assert!(!t.state().is_active);
    }

    #[test]
    fn test_inertia_decays_by_damping_factor() {
        let mut t = tracker();
        t.start(10.0, 0);
        t.update(20.0, 16);
        assert_eq!(t.end(), Motion::Coasting);
        assert!(t.state().is_active);

        let mut previous = t.state().angular_velocity;
        let mut frames = 0;
        while t.tick().is_some() {
            let v = t.state().angular_velocity;
            assert!(v > 0.0, "velocity changed sign");
            assert!(v < previous);
            assert!((v - previous * 0.95).abs() < 1e-12);
            assert!((0.0..360.0).contains(&t.angle()));
            previous = v;
            frames += 1;
        }

        // 10 * 0.95^n < 0.1 first holds at n = 90
        assert_eq!(frames, 90);
        assert!(previous < 0.1);
        assert!(!t.state().is_active);
        assert_eq!(t.tick(), None);
    }

    #[test]
    fn test_first_inertia_frames() {
        let mut t = tracker();
        t.start(10.0, 0);
        t.update(20.0, 16);
        t.end();

        t.tick();
        assert!((t.state().angular_velocity - 9.5).abs() < 1e-12);
        assert!((t.angle() - 29.5).abs() < 1e-12);
        t.tick();
        assert!((t.state().angular_velocity - 9.025).abs() < 1e-12);
        assert!((t.angle() - 38.525).abs() < 1e-12);
    }

    #[test]
    fn test_negative_velocity_coasts_backwards() {
        let mut t = tracker();
        t.start(5.0, 0);
        t.update(355.0, 16);
        assert_eq!(t.end(), Motion::Coasting);
        let angle = t.tick().unwrap();
        assert!((angle - 345.5).abs() < 1e-9);
        assert!(t.state().angular_velocity < 0.0);
    }

    #[test]
    fn test_start_interrupts_coasting() {
        let mut t = tracker();
        t.start(0.0, 0);
        t.update(30.0, 16);
        t.end();
        t.tick();

        t.start(200.0, 1000);
        assert!(!t.is_coasting());
        assert_eq!(t.state().angular_velocity, 0.0);
        assert_eq!(t.tick(), None);
    }

    #[test]
    fn test_halt_stops_coasting() {
        let mut t = tracker();
        t.start(0.0, 0);
        t.update(30.0, 16);
        t.end();
        t.halt();
        assert!(!t.state().is_active);
        assert_eq!(t.tick(), None);
    }
}
