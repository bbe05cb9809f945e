//! Pick-volume selectors
//!
//! A [`Selector`] is built for exactly one object and consumed when it
//! registers that object's pick volume with the engine. Nothing keeps a
//! selector around after population.

use crate::diagnostics::{ResourceGuard, ResourceKind};
use crate::engine::EngineError;
use crate::scene::object::{ObjectHandle, ObjectId};

/// Transient helper that makes one object pickable
#[derive(Debug)]
pub struct Selector {
    object: ObjectId,
    radius: f32,
    guard: ResourceGuard,
}

impl Selector {
    /// Build a selector for the given object
    ///
    /// The pick volume is derived from the object's model kind.
    pub fn new(object: &ObjectHandle<'_>) -> Self {
        let guard = object
            .counters()
            .acquire(ResourceKind::Selector, object.name());
        Self {
            object: object.id(),
            radius: object.kind().pick_radius(),
            guard,
        }
    }

    /// Object this selector was built for
    pub fn object(&self) -> ObjectId {
        self.object
    }

    /// Radius of the pick volume it will register
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Install the pick volume on the object and discard the selector
    ///
    /// Fails when `object` is not the one the selector was built for, or
    /// when the object is already pickable.
    pub fn register(self, object: &mut ObjectHandle<'_>) -> Result<(), EngineError> {
        if object.id() != self.object {
            return Err(EngineError::SceneState(format!(
                "selector for {:?} used on '{}'",
                self.object,
                object.name()
            )));
        }
        if object.object().is_pickable() {
            return Err(EngineError::SceneState(format!(
                "'{}' already has a pick volume",
                object.name()
            )));
        }

        object.object_mut().set_pick_radius(self.radius);
        log::debug!("'{}' is pickable (radius {})", object.name(), self.radius);
        self.guard.release();
        Ok(())
    }
}
