use glam::Vec2;
use locomote_input::{ActionEvent, EdgeTrigger, InputBus};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy)]
enum Step {
    Event(ActionEvent),
    /// Raw jump button level; converted to edges on playback.
    JumpButton(bool),
}

/// Timed input playback keyed by fixed-tick index.
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    steps: BTreeMap<u64, Vec<Step>>,
    jump_button: EdgeTrigger,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` just before fixed tick `tick` runs.
    pub fn at(mut self, tick: u64, event: ActionEvent) -> Self {
        self.steps.entry(tick).or_default().push(Step::Event(event));
        self
    }

    pub fn move_from(self, tick: u64, value: Vec2) -> Self {
        self.at(tick, ActionEvent::MovePerformed(value))
    }

    pub fn look_from(self, tick: u64, value: Vec2) -> Self {
        self.at(tick, ActionEvent::LookPerformed(value))
    }

    pub fn jump_at(self, tick: u64) -> Self {
        self.at(tick, ActionEvent::Jump)
    }

    /// Hold the jump button over `[from, until)`. Yields a single jump edge.
    pub fn hold_jump(mut self, from: u64, until: u64) -> Self {
        self.steps.entry(from).or_default().push(Step::JumpButton(true));
        self.steps
            .entry(until.max(from.saturating_add(1)))
            .or_default()
            .push(Step::JumpButton(false));
        self
    }

    /// Last tick with scripted input.
    pub fn last_tick(&self) -> Option<u64> {
        self.steps.keys().next_back().copied()
    }

    /// Dispatch everything scheduled for `tick`. Returns the number of events sent.
    pub fn play(&mut self, tick: u64, bus: &mut InputBus) -> usize {
        let Some(steps) = self.steps.get(&tick) else {
            return 0;
        };
        let mut sent = 0;
        for step in steps {
            let event = match *step {
                Step::Event(e) => Some(e),
                Step::JumpButton(level) => self.jump_button.update(level).then_some(ActionEvent::Jump),
            };
            if let Some(e) = event {
                bus.dispatch(e);
                sent += 1;
            }
        }
        sent
    }
}
