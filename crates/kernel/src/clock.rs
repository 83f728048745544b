use crate::controller::ControllerError;

/// Longest frame fed into the accumulator. Longer hitches are dropped rather
/// than replayed as a burst of fixed ticks.
pub const DEFAULT_MAX_FRAME_DT: f64 = 0.1;

/// Shortest fixed step accepted, in seconds.
pub const MIN_TIMESTEP: f64 = 1e-6;

/// Upper bound on fixed ticks issued by a single `advance`. Any backlog past
/// it is discarded.
pub const MAX_TICKS_PER_FRAME: u32 = 1024;

/// Fixed-timestep accumulator bridging the variable frame clock to the fixed
/// physics clock.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f64,
    max_frame_dt: f64,
    accumulator: f64,
    ticks: u64,
}

impl FixedTimestep {
    /// Clock with a fixed step of `step_seconds`, at least `MIN_TIMESTEP`.
    pub fn new(step_seconds: f64) -> Result<Self, ControllerError> {
        if !step_seconds.is_finite() || step_seconds < MIN_TIMESTEP {
            return Err(ControllerError::InvalidTimestep(step_seconds));
        }
        Ok(Self {
            step: step_seconds,
            max_frame_dt: DEFAULT_MAX_FRAME_DT.max(step_seconds),
            accumulator: 0.0,
            ticks: 0,
        })
    }

    /// Clock ticking `hz` times per second.
    pub fn from_rate(hz: f64) -> Result<Self, ControllerError> {
        if !hz.is_finite() || hz <= 0.0 {
            return Err(ControllerError::InvalidTimestep(hz));
        }
        Self::new(1.0 / hz)
    }

    /// Replace the frame clamp. Never below one step; non-finite values are ignored.
    pub fn with_max_frame_dt(mut self, max_frame_dt: f64) -> Self {
        if max_frame_dt.is_finite() {
            self.max_frame_dt = max_frame_dt.max(self.step);
        }
        self
    }

    /// Fixed tick duration in seconds.
    pub fn step(&self) -> f32 {
        self.step as f32
    }

    /// Longest frame the accumulator takes in.
    pub fn max_frame_dt(&self) -> f64 {
        self.max_frame_dt
    }

    /// Fixed ticks issued so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Add one frame's elapsed time. Returns how many fixed ticks are due now.
    pub fn advance(&mut self, frame_dt: f64) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt.min(self.max_frame_dt);
        let whole = (self.accumulator / self.step).floor();
        let due = if whole >= f64::from(MAX_TICKS_PER_FRAME) {
            tracing::debug!(backlog = whole, "fixed tick backlog truncated");
            self.accumulator = 0.0;
            MAX_TICKS_PER_FRAME
        } else {
            let due = whole as u32;
            self.accumulator = (self.accumulator - f64::from(due) * self.step).max(0.0);
            due
        };
        self.ticks = self.ticks.saturating_add(u64::from(due));
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_step() {
        assert!(FixedTimestep::new(0.0).is_err());
        assert!(FixedTimestep::new(f64::NAN).is_err());
        assert!(FixedTimestep::from_rate(-50.0).is_err());
    }

    #[test]
    fn rejects_steps_below_floor() {
        assert!(FixedTimestep::new(1e-7).is_err());
        assert!(FixedTimestep::from_rate(1e12).is_err());
        assert!(FixedTimestep::from_rate(1e20).is_err());
        assert!(FixedTimestep::new(MIN_TIMESTEP).is_ok());
    }

    #[test]
    fn fastest_rate_is_capped_per_frame() {
        let mut clock = FixedTimestep::from_rate(5e5).unwrap();
        assert_eq!(clock.advance(0.01), MAX_TICKS_PER_FRAME);
        assert_eq!(clock.ticks(), u64::from(MAX_TICKS_PER_FRAME));
        // Backlog is gone; the next tiny frame issues only what it covers.
        assert_eq!(clock.advance(1e-5), 5);
    }

    #[test]
    fn accumulates_partial_frames() {
        let mut clock = FixedTimestep::from_rate(50.0).unwrap();
        assert_eq!(clock.advance(0.015), 0);
        assert_eq!(clock.advance(0.015), 1);
        assert_eq!(clock.ticks(), 1);
        // 0.01 s carried over.
        assert_eq!(clock.advance(0.0105), 1);
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut clock = FixedTimestep::new(0.01).unwrap();
        // Ten ticks at most from a single hitch.
        let due = clock.advance(5.0);
        assert!((9..=10).contains(&due));
    }

    #[test]
    fn frame_clamp_is_configurable() {
        let mut clock = FixedTimestep::new(0.01).unwrap().with_max_frame_dt(0.05);
        assert_eq!(clock.max_frame_dt(), 0.05);
        assert!((4..=5).contains(&clock.advance(5.0)));

        let clock = FixedTimestep::new(0.02).unwrap().with_max_frame_dt(0.001);
        assert_eq!(clock.max_frame_dt(), 0.02);
        let clock = clock.with_max_frame_dt(f64::NAN);
        assert_eq!(clock.max_frame_dt(), 0.02);
    }

    #[test]
    fn one_second_of_frames_yields_rate_ticks() {
        let mut clock = FixedTimestep::from_rate(50.0).unwrap();
        let mut total = 0;
        for _ in 0..144 {
            total += clock.advance(1.0 / 144.0);
        }
        assert!((49..=50).contains(&total));
    }

    #[test]
    fn ignores_invalid_frame_dt() {
        let mut clock = FixedTimestep::new(0.02).unwrap();
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(f64::INFINITY), 0);
        assert_eq!(clock.advance(0.019), 0);
        assert_eq!(clock.ticks(), 0);
    }
}
