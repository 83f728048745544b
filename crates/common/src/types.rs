use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Rigid pose: position and rotation. Bodies in this workspace never scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// World-space forward basis vector (+Z rotated).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// World-space right basis vector (+X rotated).
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }
}

/// Upright capsule collider, measured tip to tip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Capsule {
    pub radius: f32,
    pub height: f32,
}

impl Default for Capsule {
    fn default() -> Self {
        Self {
            radius: 0.5,
            height: 2.0,
        }
    }
}

impl Capsule {
    /// Vertical half-extent of the collider bounds. A capsule shorter than its
    /// diameter degenerates to a sphere.
    pub fn half_height(&self) -> f32 {
        (self.height * 0.5).max(self.radius)
    }
}
