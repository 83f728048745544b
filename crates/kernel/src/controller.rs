use crate::locomotion::{LocomotionBody, LocomotionReport};
use crate::look::LookController;
use crate::physics::{OrientationHandle, PhysicsQuery, RigidBodyHandle};
use glam::Vec3;
use locomote_common::{ConfigError, ControllerConfig};
use locomote_input::{InputCache, InputSource, SubscriptionId};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Errors from building or driving the controller lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("missing required dependency: {0}")]
    MissingDependency(&'static str),
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("invalid fixed timestep: {0}")]
    InvalidTimestep(f64),
    #[error("controller is already subscribed to an input source")]
    AlreadyEnabled,
    #[error("controller is not subscribed to an input source")]
    NotEnabled,
}

/// Collects collaborators for an `FpsController`. `build` refuses to produce a
/// controller with a missing handle or an invalid config.
pub struct ControllerBuilder {
    config: ControllerConfig,
    physics: Option<Box<dyn PhysicsQuery>>,
    body: Option<Box<dyn RigidBodyHandle>>,
    head: Option<Box<dyn OrientationHandle>>,
}

impl ControllerBuilder {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            physics: None,
            body: None,
            head: None,
        }
    }

    pub fn physics(mut self, physics: impl PhysicsQuery + 'static) -> Self {
        self.physics = Some(Box::new(physics));
        self
    }

    pub fn body(mut self, body: impl RigidBodyHandle + 'static) -> Self {
        self.body = Some(Box::new(body));
        self
    }

    /// Head/camera orientation, local to the body.
    pub fn head(mut self, head: impl OrientationHandle + 'static) -> Self {
        self.head = Some(Box::new(head));
        self
    }

    pub fn build(self) -> Result<FpsController, ControllerError> {
        let result = self.try_build();
        if let Err(e) = &result {
            tracing::error!("controller setup failed: {e}");
        }
        result
    }

    fn try_build(self) -> Result<FpsController, ControllerError> {
        self.config.validate()?;
        let physics = self
            .physics
            .ok_or(ControllerError::MissingDependency("physics query"))?;
        let mut body = self
            .body
            .ok_or(ControllerError::MissingDependency("body handle"))?;
        let head = self
            .head
            .ok_or(ControllerError::MissingDependency("head handle"))?;

        body.lock_rotation();

        Ok(FpsController {
            locomotion: LocomotionBody::new(self.config),
            look: LookController::new(&self.config),
            physics,
            body,
            head,
            input: Rc::new(RefCell::new(InputCache::new())),
            subscription: None,
        })
    }
}

/// First-person controller: a `LocomotionBody` on the fixed clock and a
/// `LookController` on the frame clock, sharing one input cache.
///
/// Single-threaded: the input cache is shared with the input source through
/// `Rc<RefCell<_>>`.
pub struct FpsController {
    locomotion: LocomotionBody,
    look: LookController,
    physics: Box<dyn PhysicsQuery>,
    body: Box<dyn RigidBodyHandle>,
    head: Box<dyn OrientationHandle>,
    input: Rc<RefCell<InputCache>>,
    subscription: Option<SubscriptionId>,
}

impl FpsController {
    /// Start wiring a controller. Collaborators are checked by `build`.
    pub fn builder(config: ControllerConfig) -> ControllerBuilder {
        ControllerBuilder::new(config)
    }

    /// Validated tunables.
    pub fn config(&self) -> &ControllerConfig {
        self.locomotion.config()
    }

    /// Subscribed to an input source.
    pub fn is_enabled(&self) -> bool {
        self.subscription.is_some()
    }

    /// Subscribe the input cache to `source`. Must be paired with `disable`.
    pub fn enable(&mut self, source: &mut dyn InputSource) -> Result<(), ControllerError> {
        if self.subscription.is_some() {
            return Err(ControllerError::AlreadyEnabled);
        }
        let id = source.subscribe(self.input.clone());
        tracing::debug!(?id, "controller enabled");
        self.subscription = Some(id);
        Ok(())
    }

    /// Release in-flight input and unsubscribe from `source`.
    pub fn disable(&mut self, source: &mut dyn InputSource) -> Result<(), ControllerError> {
        let id = self.subscription.take().ok_or(ControllerError::NotEnabled)?;
        self.input.borrow_mut().clear();
        if !source.unsubscribe(id) {
            tracing::warn!(?id, "input source did not know this subscription");
        }
        tracing::debug!(?id, "controller disabled");
        Ok(())
    }

    /// Fixed-tick callback.
    pub fn fixed_update(&mut self, dt: f32) -> LocomotionReport {
        let snapshot = self.input.borrow_mut().fixed_snapshot();
        self.locomotion
            .fixed_tick(&*self.physics, &mut *self.body, &snapshot, dt)
    }

    /// Frame callback. Returns whether any orientation was written.
    pub fn frame_update(&mut self, dt: f32) -> bool {
        let look = self.input.borrow().look_input();
        self.look
            .frame_tick(look, dt, &mut *self.body, &mut *self.head)
    }

    /// Grounded flag from the last fixed tick.
    pub fn is_grounded(&self) -> bool {
        self.locomotion.is_grounded()
    }

    /// Head pitch in degrees.
    pub fn pitch(&self) -> f32 {
        self.look.pitch()
    }

    /// Current body velocity.
    pub fn velocity(&self) -> Vec3 {
        self.body.linear_velocity()
    }

    /// Current body position.
    pub fn position(&self) -> Vec3 {
        self.body.position()
    }

    /// Borrow the shared input cache.
    pub fn input(&self) -> Ref<'_, InputCache> {
        self.input.borrow()
    }
}

impl Drop for FpsController {
    fn drop(&mut self) {
        if let Some(id) = self.subscription {
            tracing::warn!(?id, "controller dropped while still subscribed");
        }
    }
}
