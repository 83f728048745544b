use crate::physics::OrientationHandle;
use crate::sanitize_dt;
use glam::{Quat, Vec2};
use locomote_common::ControllerConfig;

/// Frame-tick half of the controller: body yaw and clamped head pitch.
///
/// Pitch is kept as an accumulator in degrees; positive pitch looks down.
/// Never touches velocity.
#[derive(Debug, Clone)]
pub struct LookController {
    look_speed: f32,
    look_x_limit: f32,
    pitch: f32,
}

impl LookController {
    /// Expects a validated config; `ControllerBuilder` is the public entry point.
    pub(crate) fn new(config: &ControllerConfig) -> Self {
        Self {
            look_speed: config.look_speed,
            look_x_limit: config.look_x_limit.abs(),
            pitch: 0.0,
        }
    }

    /// Accumulated pitch in degrees, within `[-look_x_limit, look_x_limit]`.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Pitch bound in degrees.
    pub fn look_x_limit(&self) -> f32 {
        self.look_x_limit
    }

    /// Apply one frame of look input. Zero input holds the current orientation.
    /// Returns whether anything was written.
    pub fn frame_tick<B, H>(&mut self, look: Vec2, dt: f32, body: &mut B, head: &mut H) -> bool
    where
        B: OrientationHandle + ?Sized,
        H: OrientationHandle + ?Sized,
    {
        if look == Vec2::ZERO {
            return false;
        }
        let dt = sanitize_dt("frame", dt);

        // Yaw about global up: pre-multiplied so no roll can accumulate.
        let yaw = (look.x * self.look_speed * dt).to_radians();
        let rotation = (Quat::from_rotation_y(yaw) * body.rotation()).normalize();
        body.set_rotation(rotation);

        self.pitch = (self.pitch - look.y * self.look_speed * dt)
            .clamp(-self.look_x_limit, self.look_x_limit);
        // Absolute set, so the head never drifts.
        head.set_rotation(Quat::from_rotation_x(self.pitch.to_radians()));
        true
    }
}
