use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use super::{StepStats, World};
use crate::{
    core::body::Body,
    error::{PhysicsError, Result},
    utils::allocator::EntityId,
};

/// Cloneable handle letting a frame driver and force behaviours share one
/// world. Clones alias the same bodies; nothing is copied.
#[derive(Clone, Default)]
pub struct SharedWorld {
    inner: Arc<Mutex<World>>,
}

impl SharedWorld {
    pub fn new(world: World) -> Self {
        Self {
            inner: Arc::new(Mutex::new(world)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, World> {
        self.inner.lock()
    }

    pub fn step(&self, dt: f32) -> Result<StepStats> {
        self.inner.lock().step(dt)
    }

    /// Runs `f` against one body while holding the lock.
    pub fn with_body_mut<R>(&self, id: EntityId, f: impl FnOnce(&mut Body) -> R) -> Result<R> {
        let mut world = self.inner.lock();
        let body = world.body_mut(id).ok_or(PhysicsError::BodyNotFound(id))?;
        Ok(f(body))
    }
}
