use glam::Vec2;
use log::{debug, error};

use crate::{
    collision::{detector::CollisionDetector, CollisionEvent, ShapeBackend},
    config::{Bounds, WorldSettings},
    core::{body::Body, types::Aabb},
    dynamics::coefficients,
    error::{PhysicsError, Result},
    utils::{
        allocator::{Arena, EntityId},
        logging::{warn_if_frame_budget_exceeded, ScopedTimer},
    },
};

pub mod boundary;
pub mod energy;
pub mod shared;

pub use boundary::BoundaryEdge;
pub use shared::SharedWorld;

type BoundaryCallback = Box<dyn FnMut(EntityId, BoundaryEdge) + Send>;

/// Counters describing what one call to [`World::step`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    pub integrated: usize,
    pub boundary_hits: usize,
    pub contacts: usize,
}

/// Owns the bodies and drives the per-tick pipeline.
///
/// Each step applies field forces and integrates every active body in
/// insertion order, reflects it off the configured bounds, and then runs
/// exactly one collision sweep over the whole population.
pub struct World {
    bodies: Arena<Body>,
    detector: CollisionDetector,
    settings: WorldSettings,
    active: bool,
    boundary_callback: Option<BoundaryCallback>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            bodies: Arena::new(),
            detector: CollisionDetector::new(),
            settings: WorldSettings::default(),
            active: true,
            boundary_callback: None,
        }
    }

    pub fn with_settings(settings: WorldSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            ..Self::new()
        })
    }

    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    pub fn gravity(&self) -> f32 {
        self.settings.gravity
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.settings.gravity = gravity;
    }

    pub fn wind(&self) -> Option<Vec2> {
        self.settings.wind_enabled.then_some(self.settings.wind)
    }

    pub fn set_wind(&mut self, wind: Vec2) {
        self.settings.wind = wind;
        self.settings.wind_enabled = true;
    }

    pub fn disable_wind(&mut self) {
        self.settings.wind_enabled = false;
    }

    pub fn bounds(&self) -> Bounds {
        self.settings.bounds
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.settings.bounds = bounds;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pause(&mut self) {
        self.active = false;
    }

    pub fn resume(&mut self) {
        self.active = true;
    }

    pub fn detector(&self) -> &CollisionDetector {
        &self.detector
    }

    pub fn detector_mut(&mut self) -> &mut CollisionDetector {
        &mut self.detector
    }

    pub fn set_shape_backend<B>(&mut self, backend: B)
    where
        B: ShapeBackend + 'static,
    {
        self.detector.set_backend(backend);
    }

    pub fn set_collision_observer<F>(&mut self, observer: F)
    where
        F: FnMut(&CollisionEvent) + Send + 'static,
    {
        self.detector.set_observer(observer);
    }

    pub fn set_boundary_callback<F>(&mut self, callback: F)
    where
        F: FnMut(EntityId, BoundaryEdge) + Send + 'static,
    {
        self.boundary_callback = Some(Box::new(callback));
    }

    pub fn add_body(&mut self, body: Body) -> EntityId {
        let id = self.bodies.insert(body);
        debug!("added body {id} ({} total)", self.bodies.len());
        id
    }

    pub fn remove_body(&mut self, id: EntityId) -> Option<Body> {
        let removed = self.bodies.remove(id);
        if removed.is_some() {
            debug!("removed body {id} ({} left)", self.bodies.len());
        }
        removed
    }

    pub fn body(&self, id: EntityId) -> Option<&Body> {
        self.bodies.get(id)
    }

    pub fn body_mut(&mut self, id: EntityId) -> Option<&mut Body> {
        self.bodies.get_mut(id)
    }

    /// Like [`World::body_mut`], but reports a stale handle as an error.
    pub fn try_body_mut(&mut self, id: EntityId) -> Result<&mut Body> {
        self.bodies.get_mut(id).ok_or(PhysicsError::BodyNotFound(id))
    }

    /// Bodies in insertion order.
    pub fn bodies(&self) -> impl Iterator<Item = (EntityId, &Body)> + '_ {
        self.bodies.iter()
    }

    pub fn body_ids(&self) -> Vec<EntityId> {
        self.bodies.ids()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Advances the simulation by `dt`. A paused world does nothing.
    pub fn step(&mut self, dt: f32) -> Result<StepStats> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(PhysicsError::InvalidTimeStep(dt));
        }
        if !self.active {
            return Ok(StepStats::default());
        }

        let step_timer = ScopedTimer::new("world::step");
        let mut stats = StepStats::default();
        let gravity = self.settings.gravity;
        let wind = self.wind();
        let bounds = self.settings.bounds;

        {
            let _timer = ScopedTimer::new("world::integrate");
            for id in self.bodies.ids() {
                let Some(body) = self.bodies.get_mut(id) else {
                    continue;
                };
                if !body.is_active() {
                    continue;
                }

                if body.is_gravity_affected() && !body.is_resting() {
                    body.apply_force(Vec2::new(0.0, body.mass() * gravity), Some(dt));
                }
                if let Some(wind) = wind {
                    Self::apply_wind_drag(body, wind, dt);
                }
                body.update(dt, Some(gravity), wind.is_some());
                stats.integrated += 1;

                for edge in boundary::reflect(body, &bounds) {
                    stats.boundary_hits += 1;
                    if let Some(callback) = self.boundary_callback.as_mut() {
                        callback(id, edge);
                    }
                }
            }
        }

        {
            let _timer = ScopedTimer::new("world::collisions");
            stats.contacts = self.detector.detect(&mut self.bodies);
        }

        self.check_divergence()?;
        warn_if_frame_budget_exceeded(step_timer.elapsed(), self.settings.frame_budget_ms);
        Ok(stats)
    }

    /// Quadratic drag against the air's motion instead of still air.
    fn apply_wind_drag(body: &mut Body, wind: Vec2, dt: f32) {
        if body.is_static() {
            return;
        }
        let relative = body.velocity() - wind;
        let relative_speed = relative.length();
        if relative_speed <= f32::EPSILON {
            return;
        }
        let mut force = coefficients::drag_force(
            body.air_density(),
            relative_speed,
            body.drag_coefficient(),
            body.cross_sectional_area() * crate::config::AREA_SCALE,
        );
        // Drag can at most bring the body to the wind's velocity in one step.
        if dt > 0.0 {
            force = force.min(relative_speed * body.mass() / dt);
        }
        body.apply_force(-relative / relative_speed * force, Some(dt));
    }

    fn check_divergence(&self) -> Result<()> {
        for (id, body) in self.bodies.iter() {
            if !body.has_finite_state() {
                error!("body {id} diverged: position {:?}", body.position());
                return Err(PhysicsError::NumericalDivergence { id });
            }
        }
        Ok(())
    }

    pub fn bodies_at_point(&self, point: Vec2) -> Vec<EntityId> {
        self.detector.bodies_at_point(&self.bodies, point)
    }

    pub fn bodies_in_rectangle(&self, area: Aabb) -> Vec<EntityId> {
        self.detector.bodies_in_rectangle(&self.bodies, area)
    }

    pub fn bodies_near_point(&self, point: Vec2, radius: f32) -> Vec<EntityId> {
        self.detector.bodies_near_point(&self.bodies, point, radius)
    }

    pub fn point_in_body(&self, id: EntityId, point: Vec2) -> bool {
        self.bodies
            .get(id)
            .is_some_and(|body| self.detector.point_in_body(body, point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn drop_ball() -> Body {
        Body::builder()
            .circle(1.0)
            .vacuum()
            .friction(0.0)
            .build()
            .expect("valid body")
    }

    #[test]
    fn gravity_is_integrated_before_position() {
        let mut world = World::new();
        let id = world.add_body(drop_ball());
        world.step(1.0).expect("step");
        let body = world.body(id).unwrap();
        assert_relative_eq!(body.vy(), 9.81);
        assert_relative_eq!(body.y(), 9.81);
    }

    #[test]
    fn paused_world_does_not_move() {
        let mut world = World::new();
        let id = world.add_body(drop_ball());
        world.pause();
        assert_eq!(world.step(1.0).unwrap(), StepStats::default());
        assert_eq!(world.body(id).unwrap().y(), 0.0);
        world.resume();
        assert_eq!(world.step(1.0).unwrap().integrated, 1);
    }

    #[test]
    fn invalid_time_steps_are_rejected() {
        let mut world = World::new();
        assert!(matches!(world.step(-1.0), Err(PhysicsError::InvalidTimeStep(_))));
        assert!(matches!(world.step(f32::NAN), Err(PhysicsError::InvalidTimeStep(_))));
    }

    #[test]
    fn wind_pushes_still_bodies_downwind() {
        let mut world = World::new();
        world.set_gravity(0.0);
        world.set_wind(Vec2::new(50.0, 0.0));
        let id = world.add_body(
            Body::builder()
                .circle(20.0)
                .friction(0.0)
                .build()
                .expect("valid body"),
        );
        world.step(1.0 / 60.0).expect("step");
        let vx = world.body(id).unwrap().vx();
        assert!(vx > 0.0 && vx <= 50.0, "vx = {vx}");
    }

    #[test]
    fn wind_leaves_terrain_alone() {
        let mut world = World::new();
        world.set_wind(Vec2::new(50.0, 0.0));
        let id = world.add_body(
            Body::builder()
                .rectangle(100.0, 10.0)
                .fixed()
                .build()
                .expect("valid body"),
        );
        world.step(1.0 / 60.0).expect("step");
        assert_eq!(world.body(id).unwrap().velocity(), Vec2::ZERO);
    }

    #[test]
    fn stale_handles_are_reported() {
        let mut world = World::new();
        let id = world.add_body(drop_ball());
        world.remove_body(id);
        assert!(matches!(world.try_body_mut(id), Err(PhysicsError::BodyNotFound(_))));
    }
}
