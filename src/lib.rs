//! Kinetic2D – a small 2D rigid-extent simulation core.
//!
//! Bodies fall under gravity, feel quadratic drag and surface friction, turn
//! under aerodynamic torques and collide pairwise with restitution. Slow
//! bodies pressed onto terrain go to rest to keep stacks from jittering.
//! A frame driver calls [`World::step`] once per tick and reads each body's
//! pose back for display.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod utils;
pub mod world;

pub use glam::Vec2;

pub use collision::{CollisionDetector, CollisionEvent, GeometricBackend, NoopBackend, ShapeBackend};
pub use config::{Bounds, WorldSettings};
pub use crate::core::{Aabb, Body, BodyBuilder, Hitbox, Material, Shape};
pub use dynamics::{BounceForce, ForceGenerator, ForceRegistry, GravityForce, SpringForce};
pub use error::{BackendError, PhysicsError, Result};
pub use utils::allocator::{Arena, EntityId};
pub use world::{BoundaryEdge, SharedWorld, StepStats, World};

/// Convenience driver that owns a [`World`] together with the force
/// behaviours acting on it.
pub struct Simulation {
    world: World,
    forces: ForceRegistry,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(World::new())
    }
}

impl Simulation {
    pub fn new(world: World) -> Self {
        Self {
            world,
            forces: ForceRegistry::new(),
        }
    }

    /// Adds a body to the world and returns its generated [`EntityId`].
    pub fn add_body(&mut self, body: Body) -> EntityId {
        self.world.add_body(body)
    }

    /// Removes a body along with every behaviour bound to it.
    pub fn remove_body(&mut self, id: EntityId) -> Option<Body> {
        self.forces.remove_body(id);
        self.world.remove_body(id)
    }

    /// Binds a force behaviour to a body.
    pub fn add_force<F: ForceGenerator + 'static>(&mut self, id: EntityId, force: F) {
        self.forces.add_force(id, force);
    }

    /// Runs the behaviours, then advances the world by `dt`.
    pub fn step(&mut self, dt: f32) -> Result<StepStats> {
        self.forces.apply_all(&mut self.world, dt);
        self.world.step(dt)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Immutable access to a body by id.
    pub fn get_body(&self, id: EntityId) -> Option<&Body> {
        self.world.body(id)
    }

    /// Mutable access to a body by id.
    pub fn get_body_mut(&mut self, id: EntityId) -> Option<&mut Body> {
        self.world.body_mut(id)
    }
}
