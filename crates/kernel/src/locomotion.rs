use crate::physics::{PhysicsQuery, RigidBodyHandle};
use crate::sanitize_dt;
use glam::{Vec2, Vec3};
use locomote_common::ControllerConfig;
use locomote_input::InputSnapshot;

/// Change of grounded state detected by a fixed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundTransition {
    Landed,
    LeftGround,
}

/// Outcome of one fixed tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionReport {
    pub grounded: bool,
    pub jumped: bool,
    /// Velocity written to the body this tick.
    pub velocity: Vec3,
    pub transition: Option<GroundTransition>,
}

/// Fixed-tick half of the controller: ground probe, horizontal and vertical
/// velocity resolution, jump.
///
/// Owns the grounded flag. Never touches orientation.
#[derive(Debug, Clone)]
pub struct LocomotionBody {
    config: ControllerConfig,
    grounded: bool,
}

impl LocomotionBody {
    /// Starts airborne until the first probe. Expects a validated config.
    pub(crate) fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            grounded: false,
        }
    }

    /// Tunables this body resolves with.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Grounded flag as of the last fixed tick.
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Cast straight down from the body. Grounded iff something lies within the
    /// collider half-extent plus `ground_check_distance`. No hysteresis: a body
    /// balanced on a ledge may flicker between ticks.
    pub fn probe_ground<P, B>(&self, physics: &P, body: &B) -> bool
    where
        P: PhysicsQuery + ?Sized,
        B: RigidBodyHandle + ?Sized,
    {
        let origin = body.position();
        let max_distance = body.collider_half_height() + self.config.ground_check_distance;
        let hit = physics.raycast(origin, Vec3::NEG_Y, max_distance);
        tracing::trace!(?origin, max_distance, ?hit, "ground probe");
        matches!(hit, Some(d) if d <= max_distance)
    }

    /// World-space horizontal velocity for `move_input` (x = strafe, y = forward).
    ///
    /// The basis sum is not normalized unless `normalize_diagonal` is set, so a
    /// full diagonal moves at `move_speed * sqrt(2)`. Zero input stops instantly.
    pub fn horizontal_velocity(&self, forward: Vec3, right: Vec3, move_input: Vec2) -> Vec3 {
        if move_input == Vec2::ZERO {
            return Vec3::ZERO;
        }
        let mut direction = forward * move_input.y + right * move_input.x;
        if self.config.normalize_diagonal && direction.length_squared() > 1.0 {
            direction = direction.normalize();
        }
        Vec3::new(
            direction.x * self.config.move_speed,
            0.0,
            direction.z * self.config.move_speed,
        )
    }

    /// Airborne: one explicit Euler step of gravity (effective gravity depends on
    /// the tick rate). Grounded: downward motion is cancelled, upward kept.
    pub fn resolve_vertical(&self, vertical: f32, grounded: bool, dt: f32) -> f32 {
        if grounded {
            vertical.max(0.0)
        } else {
            vertical - self.config.gravity * dt
        }
    }

    /// Run one fixed tick. The body's velocity is written exactly once.
    pub fn fixed_tick<P, B>(
        &mut self,
        physics: &P,
        body: &mut B,
        input: &InputSnapshot,
        dt: f32,
    ) -> LocomotionReport
    where
        P: PhysicsQuery + ?Sized,
        B: RigidBodyHandle + ?Sized,
    {
        let dt = sanitize_dt("fixed", dt);

        let was_grounded = self.grounded;
        self.grounded = self.probe_ground(physics, body);
        let transition = match (was_grounded, self.grounded) {
            (false, true) => Some(GroundTransition::Landed),
            (true, false) => Some(GroundTransition::LeftGround),
            _ => None,
        };
        if let Some(t) = transition {
            tracing::debug!(?t, position = ?body.position(), "ground state changed");
        }

        let current = body.linear_velocity();
        let rotation = body.rotation();
        let horizontal =
            self.horizontal_velocity(rotation * Vec3::Z, rotation * Vec3::X, input.move_input);
        let mut vertical = self.resolve_vertical(current.y, self.grounded, dt);

        let mut jumped = false;
        if input.jump {
            if self.grounded {
                vertical = self.config.jump_velocity();
                jumped = true;
                tracing::debug!(vertical, "jump");
            } else {
                tracing::trace!("jump ignored while airborne");
            }
        }

        let velocity = Vec3::new(horizontal.x, vertical, horizontal.z);
        body.set_linear_velocity(velocity);

        LocomotionReport {
            grounded: self.grounded,
            jumped,
            velocity,
            transition,
        }
    }
}
