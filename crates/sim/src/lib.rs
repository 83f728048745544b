//! Reference collaborators for the locomotion kernel.
//!
//! A static world of horizontal surfaces answers ray casts, a kinematic body
//! integrates the velocity the controller writes, and a runner drives the
//! fixed and frame clocks the way a host engine would.
//!
//! # Invariants
//! - The sim never writes velocity except to stop a body sinking into a floor.
//! - Events are append-only and ordered by tick.

pub mod body;
pub mod debug_text;
pub mod geometry;
pub mod runner;
pub mod script;
pub mod world;

pub use body::{BodyHandle, HeadHandle, SimBody};
pub use geometry::{Slab, StaticWorld};
pub use runner::{RunOptions, Runner, TickRecord};
pub use script::InputScript;
pub use world::{SimEvent, SimWorld};

pub fn crate_info() -> &'static str {
    "locomote-sim v0.1.0"
}
