use crate::action::ActionEvent;
use glam::Vec2;

/// Read-only view of the input handed to one fixed tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub move_input: Vec2,
    /// A jump edge arrived since the previous fixed tick.
    pub jump: bool,
}

/// Latest move/look values plus a pending jump edge.
///
/// Written by the input provider through `apply`, read by both tick callbacks.
#[derive(Debug, Default)]
pub struct InputCache {
    move_input: Vec2,
    look_input: Vec2,
    jump_pending: bool,
    jump_edges: u64,
}

impl InputCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &ActionEvent) {
        match *event {
            ActionEvent::MovePerformed(v) => {
                // Axes stay within [-1, 1] so speed stays bounded by move_speed per axis.
                self.move_input = sanitize("move", v).clamp(Vec2::NEG_ONE, Vec2::ONE);
            }
            ActionEvent::MoveCanceled => self.move_input = Vec2::ZERO,
            ActionEvent::LookPerformed(v) => self.look_input = sanitize("look", v),
            ActionEvent::LookCanceled => self.look_input = Vec2::ZERO,
            ActionEvent::Jump => {
                self.jump_pending = true;
                self.jump_edges += 1;
            }
        }
    }

    /// Latched move vector, each axis in `[-1, 1]`.
    pub fn move_input(&self) -> Vec2 {
        self.move_input
    }

    /// Latched look vector, read by the frame tick.
    pub fn look_input(&self) -> Vec2 {
        self.look_input
    }

    /// A jump edge is waiting for the next fixed tick.
    pub fn jump_pending(&self) -> bool {
        self.jump_pending
    }

    /// Total jump edges received since creation.
    pub fn jump_edges(&self) -> u64 {
        self.jump_edges
    }

    /// Consume the pending jump edge. Returns true at most once per edge.
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_pending)
    }

    /// Snapshot for a fixed tick. Consumes the pending jump edge.
    pub fn fixed_snapshot(&mut self) -> InputSnapshot {
        InputSnapshot {
            move_input: self.move_input,
            jump: self.take_jump(),
        }
    }

    /// Drop latched values and any pending jump.
    pub fn clear(&mut self) {
        self.move_input = Vec2::ZERO;
        self.look_input = Vec2::ZERO;
        self.jump_pending = false;
    }
}

fn sanitize(action: &'static str, v: Vec2) -> Vec2 {
    if v.is_finite() {
        v
    } else {
        tracing::warn!(action, ?v, "non-finite input value dropped");
        Vec2::ZERO
    }
}
