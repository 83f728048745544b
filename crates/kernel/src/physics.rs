//! Collaborator contracts implemented by the host physics engine and scene graph.

use glam::{Quat, Vec3};

/// Scene query service.
pub trait PhysicsQuery {
    /// Distance to the nearest hit along `direction` (unit length) within
    /// `max_distance`, or `None`. A world without colliders always misses.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32>;
}

/// A rotation owned by the scene graph. For the avatar body this is its world
/// rotation, for the head/camera it is the rotation local to the body.
pub trait OrientationHandle {
    fn rotation(&self) -> Quat;
    fn set_rotation(&mut self, rotation: Quat);
}

/// The avatar's rigid body.
pub trait RigidBodyHandle: OrientationHandle {
    /// Ground probe origin.
    fn position(&self) -> Vec3;
    fn linear_velocity(&self) -> Vec3;
    fn set_linear_velocity(&mut self, velocity: Vec3);
    /// Vertical half-extent of the attached collider's bounds.
    fn collider_half_height(&self) -> f32;
    /// Stop the physics engine from rotating the body. Called once at build.
    fn lock_rotation(&mut self) {}
}
