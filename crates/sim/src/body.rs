use crate::geometry::StaticWorld;
use glam::{Quat, Vec3};
use locomote_common::{Capsule, Transform};
use locomote_kernel::{OrientationHandle, RigidBodyHandle};
use std::cell::RefCell;
use std::rc::Rc;

/// Contact skin: a body moving down (or resting) that ends within this
/// distance above a floor is settled onto it. Must exceed the controller's
/// ground clearance, otherwise a grounded body with zero vertical velocity
/// hovers.
pub const DEFAULT_GROUND_SNAP: f32 = 0.25;

/// Kinematic capsule body: integrates whatever velocity it is given and
/// stops at floors. Walls and slopes do not exist here.
#[derive(Debug, Clone)]
pub struct SimBody {
    pub transform: Transform,
    pub velocity: Vec3,
    pub capsule: Capsule,
    /// Camera rotation relative to the body.
    pub head_rotation: Quat,
    pub rotation_locked: bool,
    pub ground_snap: f32,
}

impl SimBody {
    pub fn new(position: Vec3, capsule: Capsule) -> Self {
        Self {
            transform: Transform::from_position(position),
            velocity: Vec3::ZERO,
            capsule,
            head_rotation: Quat::IDENTITY,
            rotation_locked: false,
            ground_snap: DEFAULT_GROUND_SNAP,
        }
    }

    /// World-space y of the capsule bottom.
    pub fn bottom(&self) -> f32 {
        self.transform.position.y - self.capsule.half_height()
    }

    /// Advance by `dt`. Returns true when the body rests on a surface afterwards.
    ///
    /// A surface only stops the body if it was at or below the capsule bottom
    /// before the move, so running sideways into a slab passes through it.
    /// Rising bodies are never settled.
    pub fn integrate(&mut self, dt: f32, statics: &StaticWorld) -> bool {
        let half = self.capsule.half_height();
        let bottom_before = self.transform.position.y - half;
        self.transform.position += self.velocity * dt;
        let p = self.transform.position;

        if self.velocity.y > 0.0 {
            return false;
        }
        let Some(top) = statics.surface_below(p.x, p.z, bottom_before) else {
            return false;
        };
        if p.y - half <= top + self.ground_snap {
            self.transform.position.y = top + half;
            self.velocity.y = 0.0;
            return true;
        }
        false
    }
}

/// Rigid-body handle over a shared `SimBody`.
#[derive(Debug, Clone)]
pub struct BodyHandle(pub Rc<RefCell<SimBody>>);

/// Head/camera handle over the same shared `SimBody`.
#[derive(Debug, Clone)]
pub struct HeadHandle(pub Rc<RefCell<SimBody>>);

impl OrientationHandle for BodyHandle {
    fn rotation(&self) -> Quat {
        self.0.borrow().transform.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.0.borrow_mut().transform.rotation = rotation;
    }
}

impl RigidBodyHandle for BodyHandle {
    fn position(&self) -> Vec3 {
        self.0.borrow().transform.position
    }

    fn linear_velocity(&self) -> Vec3 {
        self.0.borrow().velocity
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.0.borrow_mut().velocity = velocity;
    }

    fn collider_half_height(&self) -> f32 {
        self.0.borrow().capsule.half_height()
    }

    fn lock_rotation(&mut self) {
        self.0.borrow_mut().rotation_locked = true;
    }
}

impl OrientationHandle for HeadHandle {
    fn rotation(&self) -> Quat {
        self.0.borrow().head_rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.0.borrow_mut().head_rotation = rotation;
    }
}
