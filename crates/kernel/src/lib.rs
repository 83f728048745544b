//! Locomotion kernel: fixed-tick velocity resolution and frame-tick look control.
//!
//! # Invariants
//! - Vertical velocity is never negative after a tick that ends grounded.
//! - Pitch always lies within `[-look_x_limit, look_x_limit]`.
//! - `LocomotionBody` only writes velocity, `LookController` only writes orientation.
//! - Fixed tick and frame tick run on independent clocks.

pub mod clock;
pub mod controller;
pub mod locomotion;
pub mod look;
pub mod physics;

pub use clock::{DEFAULT_MAX_FRAME_DT, FixedTimestep, MAX_TICKS_PER_FRAME, MIN_TIMESTEP};
pub use controller::{ControllerBuilder, ControllerError, FpsController};
pub use locomotion::{GroundTransition, LocomotionBody, LocomotionReport};
pub use look::LookController;
pub use physics::{OrientationHandle, PhysicsQuery, RigidBodyHandle};

pub fn crate_info() -> &'static str {
    "locomote-kernel v0.1.0"
}

/// Replace a negative or non-finite tick duration with zero.
pub(crate) fn sanitize_dt(clock: &'static str, dt: f32) -> f32 {
    if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        tracing::warn!(clock, dt, "invalid tick duration treated as zero");
        0.0
    }
}
