use crate::body::{BodyHandle, HeadHandle, SimBody};
use crate::geometry::StaticWorld;
use glam::Vec3;
use locomote_common::{Capsule, ControllerConfig};
use locomote_kernel::{ControllerError, FpsController};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// An event record produced by every physics step.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// Physics advanced one step.
    Stepped { tick: u64, position: Vec3 },
    /// The body came to rest on a surface. Carries the downward speed it hit with.
    Landed { tick: u64, impact_speed: f32 },
    /// The body lost contact with every surface.
    LeftGround { tick: u64 },
}

/// Stand-in for the host physics scene: static geometry plus one avatar body.
///
/// Contact here is the sim's own floor resolution. It is independent of the
/// controller's ground probe, which has extra clearance.
#[derive(Debug)]
pub struct SimWorld {
    statics: StaticWorld,
    body: Rc<RefCell<SimBody>>,
    tick: u64,
    in_contact: bool,
    /// Append-only event log.
    events: Vec<SimEvent>,
}

impl SimWorld {
    pub fn new(statics: StaticWorld, spawn: Vec3, capsule: Capsule) -> Self {
        Self {
            statics,
            body: Rc::new(RefCell::new(SimBody::new(spawn, capsule))),
            tick: 0,
            in_contact: false,
            events: Vec::new(),
        }
    }

    /// Flat ground at y = 0 with a default capsule standing on it.
    pub fn standing_on_flat_ground() -> Self {
        let capsule = Capsule::default();
        Self::new(
            StaticWorld::flat(0.0),
            Vec3::new(0.0, capsule.half_height(), 0.0),
            capsule,
        )
    }

    /// Physics steps taken so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Static collision geometry.
    pub fn statics(&self) -> &StaticWorld {
        &self.statics
    }

    /// Borrow the avatar body.
    pub fn body(&self) -> Ref<'_, SimBody> {
        self.body.borrow()
    }

    pub fn body_handle(&self) -> BodyHandle {
        BodyHandle(self.body.clone())
    }

    pub fn head_handle(&self) -> HeadHandle {
        HeadHandle(self.body.clone())
    }

    /// The body rested on a surface after the last step.
    pub fn in_contact(&self) -> bool {
        self.in_contact
    }

    /// Build a controller wired to this world's geometry and body.
    pub fn controller(&self, config: ControllerConfig) -> Result<FpsController, ControllerError> {
        FpsController::builder(config)
            .physics(self.statics.clone())
            .body(self.body_handle())
            .head(self.head_handle())
            .build()
    }

    /// Integrate the body by `dt` and log what happened.
    pub fn step(&mut self, dt: f32) {
        self.tick += 1;
        let (contact, impact_speed, position) = {
            let mut body = self.body.borrow_mut();
            let falling = (-body.velocity.y).max(0.0);
            let contact = body.integrate(dt, &self.statics);
            (contact, falling, body.transform.position)
        };

        match (self.in_contact, contact) {
            (false, true) => {
                tracing::debug!(tick = self.tick, impact_speed, "body landed");
                self.events.push(SimEvent::Landed {
                    tick: self.tick,
                    impact_speed,
                });
            }
            (true, false) => self.events.push(SimEvent::LeftGround { tick: self.tick }),
            _ => {}
        }
        self.in_contact = contact;
        self.events.push(SimEvent::Stepped {
            tick: self.tick,
            position,
        });
    }

    /// All events since creation or the last drain.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Take the event log, leaving it empty.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}
