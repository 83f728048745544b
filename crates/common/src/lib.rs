//! Shared types and tunables for the locomotion workspace.
//!
//! # Invariants
//! - Basis convention: +Y is up, a body's forward is its rotation applied to +Z,
//!   its right is its rotation applied to +X.
//! - Angles exposed in configuration are degrees.

pub mod config;
pub mod types;

pub use config::{ConfigError, ControllerConfig};
pub use types::{Capsule, Transform};

pub fn crate_info() -> &'static str {
    "locomote-common v0.1.0"
}
