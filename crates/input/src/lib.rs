//! Input layer boundary: action events in, latched per-tick snapshots out.
//!
//! # Invariants
//! - Move and look are latched values; a cancel event is the only reset signal.
//! - Jump is an edge, never latched state: each edge is consumed at most once.
//! - Subscriptions are matched 1:1 with unsubscriptions by `SubscriptionId`.

pub mod action;
pub mod cache;
pub mod source;

pub use action::{ActionEvent, EdgeTrigger};
pub use cache::{InputCache, InputSnapshot};
pub use source::{InputBus, InputSink, InputSource, SharedSink, SubscriptionId};

pub fn crate_info() -> &'static str {
    "locomote-input v0.1.0"
}
