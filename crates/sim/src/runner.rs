use crate::script::InputScript;
use crate::world::SimWorld;
use glam::Vec3;
use locomote_common::ControllerConfig;
use locomote_input::InputBus;
use locomote_kernel::{
    ControllerError, DEFAULT_MAX_FRAME_DT, FixedTimestep, FpsController, MIN_TIMESTEP,
};

/// Records preallocated by `run_ticks`; longer runs grow the buffer as they go.
const MAX_PREALLOCATED_RECORDS: u64 = 1 << 16;

/// Clock rates for a run.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Fixed (physics) ticks per second.
    pub tick_rate: f64,
    /// Rendered frames per second.
    pub frame_rate: f64,
    /// Longest frame, in seconds, fed to the fixed-step accumulator.
    pub max_frame_dt: f64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            tick_rate: 50.0,
            frame_rate: 144.0,
            max_frame_dt: DEFAULT_MAX_FRAME_DT,
        }
    }
}

/// State after one fixed tick and its physics step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickRecord {
    pub tick: u64,
    pub position: Vec3,
    /// Velocity the controller wrote, before the physics step.
    pub velocity: Vec3,
    pub grounded: bool,
    pub jumped: bool,
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
}

/// Drives a `SimWorld` and `FpsController` on two clocks, the way a host
/// engine would: every frame advances the fixed-step accumulator, runs the
/// due fixed ticks (input playback, controller, physics), then one frame tick.
pub struct Runner {
    world: SimWorld,
    controller: FpsController,
    bus: InputBus,
    script: InputScript,
    clock: FixedTimestep,
    frame_dt: f64,
    frames: u64,
}

impl Runner {
    pub fn new(
        world: SimWorld,
        config: ControllerConfig,
        script: InputScript,
        options: RunOptions,
    ) -> Result<Self, ControllerError> {
        let clock =
            FixedTimestep::from_rate(options.tick_rate)?.with_max_frame_dt(options.max_frame_dt);
        if !options.frame_rate.is_finite()
            || options.frame_rate <= 0.0
            || 1.0 / options.frame_rate < MIN_TIMESTEP
        {
            return Err(ControllerError::InvalidTimestep(options.frame_rate));
        }
        let mut controller = world.controller(config)?;
        let mut bus = InputBus::new();
        controller.enable(&mut bus)?;
        Ok(Self {
            world,
            controller,
            bus,
            script,
            clock,
            frame_dt: 1.0 / options.frame_rate,
            frames: 0,
        })
    }

    /// The simulated world.
    pub fn world(&self) -> &SimWorld {
        &self.world
    }

    /// The controller driving the body.
    pub fn controller(&self) -> &FpsController {
        &self.controller
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run frames until `ticks` more fixed ticks have executed.
    pub fn run_ticks(&mut self, ticks: u64) -> Vec<TickRecord> {
        let _span = tracing::info_span!("run_ticks", ticks).entered();
        let target = self.world.tick().saturating_add(ticks);
        let mut records = Vec::with_capacity(ticks.min(MAX_PREALLOCATED_RECORDS) as usize);
        while self.world.tick() < target {
            let due = self.clock.advance(self.frame_dt);
            for _ in 0..due {
                if self.world.tick() >= target {
                    break;
                }
                records.push(self.fixed_tick());
            }
            self.controller.frame_update(self.frame_dt as f32);
            self.frames += 1;
        }
        records
    }

    fn fixed_tick(&mut self) -> TickRecord {
        let tick = self.world.tick();
        self.script.play(tick, &mut self.bus);
        let dt = self.clock.step();
        let report = self.controller.fixed_update(dt);
        self.world.step(dt);

        let body = self.world.body();
        let forward = body.transform.forward();
        TickRecord {
            tick,
            position: body.transform.position,
            velocity: report.velocity,
            grounded: report.grounded,
            jumped: report.jumped,
            yaw_degrees: forward.x.atan2(forward.z).to_degrees(),
            pitch_degrees: self.controller.pitch(),
        }
    }
}

impl Drop for Runner {
    fn drop(&mut self) {
        if self.controller.is_enabled() {
            // Keeps subscribe/unsubscribe paired.
            let _ = self.controller.disable(&mut self.bus);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn runs_exact_tick_count() {
        let mut runner = Runner::new(
            SimWorld::standing_on_flat_ground(),
            ControllerConfig::default(),
            InputScript::new(),
            RunOptions::default(),
        )
        .unwrap();
        let records = runner.run_ticks(25);
        assert_eq!(records.len(), 25);
        assert_eq!(records[0].tick, 0);
        assert_eq!(records[24].tick, 24);
        assert_eq!(runner.world().tick(), 25);
        // 144 fps against 50 Hz: roughly three frames per tick.
        assert!(runner.frames() >= 70);
    }

    #[test]
    fn rejects_bad_rates() {
        let bad = RunOptions {
            tick_rate: 0.0,
            ..RunOptions::default()
        };
        assert!(Runner::new(
            SimWorld::standing_on_flat_ground(),
            ControllerConfig::default(),
            InputScript::new(),
            bad,
        )
        .is_err());

        for frame_rate in [0.0, f64::NAN, 1e12] {
            let bad = RunOptions {
                frame_rate,
                ..RunOptions::default()
            };
            assert!(Runner::new(
                SimWorld::standing_on_flat_ground(),
                ControllerConfig::default(),
                InputScript::new(),
                bad,
            )
            .is_err());
        }
    }

    #[test]
    fn zero_ticks_runs_no_frames() {
        let mut runner = Runner::new(
            SimWorld::standing_on_flat_ground(),
            ControllerConfig::default(),
            InputScript::new(),
            RunOptions::default(),
        )
        .unwrap();
        runner.run_ticks(3);
        let frames = runner.frames();
        assert!(runner.run_ticks(0).is_empty());
        assert_eq!(runner.frames(), frames);
        assert_eq!(runner.world().tick(), 3);
    }

    #[test]
    fn frame_clamp_bounds_ticks_per_frame() {
        // One frame per second at 50 Hz, but only 0.1 s of it is simulated.
        let options = RunOptions {
            frame_rate: 1.0,
            ..RunOptions::default()
        };
        let mut runner = Runner::new(
            SimWorld::standing_on_flat_ground(),
            ControllerConfig::default(),
            InputScript::new(),
            options,
        )
        .unwrap();
        runner.run_ticks(20);
        assert!(runner.frames() >= 4);

        let options = RunOptions {
            frame_rate: 1.0,
            max_frame_dt: 1.0,
            ..RunOptions::default()
        };
        let mut runner = Runner::new(
            SimWorld::standing_on_flat_ground(),
            ControllerConfig::default(),
            InputScript::new(),
            options,
        )
        .unwrap();
        runner.run_ticks(20);
        assert_eq!(runner.frames(), 1);
    }

    #[test]
    fn look_input_turns_body_on_frame_clock() {
        let script = InputScript::new().look_from(0, Vec2::new(45.0, 0.0));
        let mut runner = Runner::new(
            SimWorld::standing_on_flat_ground(),
            ControllerConfig::default(),
            script,
            RunOptions::default(),
        )
        .unwrap();
        let records = runner.run_ticks(10);
        assert!(records.last().unwrap().yaw_degrees > 0.0);
        assert!(runner.controller().is_grounded());
    }
}
