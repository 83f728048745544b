use glam::Vec2;

/// An event delivered by the input provider for one of the three player actions.
///
/// Move and look vectors are `x` = strafe / yaw, `y` = forward / pitch.
/// `Performed` carries a new value; `Canceled` means the control was released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionEvent {
    MovePerformed(Vec2),
    MoveCanceled,
    LookPerformed(Vec2),
    LookCanceled,
    /// Jump button went from released to pressed.
    Jump,
}

/// Converts a held button level into rising-edge pulses.
///
/// Input layers that only see button state use this so that holding jump
/// produces a single `ActionEvent::Jump`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeTrigger {
    held: bool,
}

impl EdgeTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current level. Returns true only on the released -> pressed transition.
    pub fn update(&mut self, pressed: bool) -> bool {
        let rising = pressed && !self.held;
        self.held = pressed;
        rising
    }
}
