use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest pitch limit accepted. Beyond 90 degrees the camera would flip over.
pub const MAX_LOOK_X_LIMIT: f32 = 90.0;

/// Errors from loading or validating controller tunables.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("gravity must be strictly positive, got {0}")]
    NonPositiveGravity(f32),
    #[error("look_x_limit must lie in [0, {max}] degrees, got {value}")]
    LookLimitOutOfRange { value: f32, max: f32 },
}

/// Plain numeric tunables of the controller.
///
/// Missing fields in a JSON document take their default values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Horizontal speed in m/s for a unit basis direction.
    pub move_speed: f32,
    /// Degrees of rotation per unit of look input per second.
    pub look_speed: f32,
    /// Symmetric pitch limit in degrees.
    pub look_x_limit: f32,
    /// Downward acceleration magnitude in m/s^2.
    pub gravity: f32,
    /// Peak jump height in meters under `gravity`.
    pub jump_force: f32,
    /// Clearance added below the collider's half-extent when probing for ground.
    pub ground_check_distance: f32,
    /// Normalize the combined move direction when diagonal input pushes it past
    /// unit length. Off by default: diagonal input then moves `move_speed * sqrt(2)`.
    pub normalize_diagonal: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            look_speed: 2.0,
            look_x_limit: 45.0,
            gravity: 9.81,
            jump_force: 5.0,
            ground_check_distance: 0.1,
            normalize_diagonal: false,
        }
    }
}

impl ControllerConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every tunable. A config that passes never yields NaN velocities.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("move_speed", self.move_speed),
            ("look_speed", self.look_speed),
            ("look_x_limit", self.look_x_limit),
            ("gravity", self.gravity),
            ("jump_force", self.jump_force),
            ("ground_check_distance", self.ground_check_distance),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }
        for (field, value) in [
            ("move_speed", self.move_speed),
            ("look_speed", self.look_speed),
            ("jump_force", self.jump_force),
            ("ground_check_distance", self.ground_check_distance),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if self.gravity <= 0.0 {
            return Err(ConfigError::NonPositiveGravity(self.gravity));
        }
        if !(0.0..=MAX_LOOK_X_LIMIT).contains(&self.look_x_limit) {
            return Err(ConfigError::LookLimitOutOfRange {
                value: self.look_x_limit,
                max: MAX_LOOK_X_LIMIT,
            });
        }
        Ok(())
    }

    /// Launch speed that peaks at `jump_force` meters: sqrt(2 * h * g).
    pub fn jump_velocity(&self) -> f32 {
        (2.0 * self.jump_force * self.gravity).sqrt()
    }
}
