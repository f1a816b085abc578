use glam::Vec2;

use crate::{core::body::Body, utils::allocator::EntityId, world::World};

/// Behaviour that pushes a body through its public force API.
///
/// Generators are ordinary callers: each application changes velocity
/// immediately, so the order generators run in can matter once clamping or
/// resting kicks in.
pub trait ForceGenerator: Send + Sync {
    fn apply(&self, body: &mut Body, dt: f32);
}

/// Constant acceleration independent of the world's own gravity.
pub struct GravityForce {
    pub gravity: Vec2,
}

impl GravityForce {
    pub fn new(gravity: Vec2) -> Self {
        Self { gravity }
    }
}

impl ForceGenerator for GravityForce {
    fn apply(&self, body: &mut Body, dt: f32) {
        if body.is_resting() {
            return;
        }
        body.apply_force(self.gravity * body.mass(), Some(dt));
    }
}

/// Damped Hookean spring pulling the body's centre toward a fixed anchor.
pub struct SpringForce {
    pub anchor: Vec2,
    pub rest_length: f32,
    pub stiffness: f32,
    pub damping: f32,
}

impl ForceGenerator for SpringForce {
    fn apply(&self, body: &mut Body, dt: f32) {
        let displacement = body.center() - self.anchor;
        let distance = displacement.length();
        if distance < 1e-6 {
            return;
        }

        let extension = distance - self.rest_length;
        let spring = -self.stiffness * extension * (displacement / distance);
        let damping = -self.damping * body.velocity();
        body.apply_force(spring + damping, Some(dt));
    }
}

/// Reflects a body off a horizontal floor line using the body's elasticity.
pub struct BounceForce {
    pub floor: f32,
}

impl ForceGenerator for BounceForce {
    fn apply(&self, body: &mut Body, _dt: f32) {
        let bottom = body.y() + body.height();
        if bottom < self.floor || body.vy() <= 0.0 {
            return;
        }
        let impulse = -body.vy() * (1.0 + body.elasticity()) * body.mass();
        body.apply_impulse(Vec2::new(0.0, impulse));
        body.set_position(Vec2::new(body.x(), self.floor - body.height()));
    }
}

/// Generators bound to the bodies they drive.
pub struct ForceRegistry {
    bindings: Vec<(EntityId, Box<dyn ForceGenerator>)>,
}

impl Default for ForceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceRegistry {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    pub fn add_force<F: ForceGenerator + 'static>(&mut self, body: EntityId, force: F) {
        self.bindings.push((body, Box::new(force)));
    }

    /// Drops every generator bound to `body`.
    pub fn remove_body(&mut self, body: EntityId) {
        self.bindings.retain(|(id, _)| *id != body);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Applies every generator in registration order. Stale handles are skipped.
    pub fn apply_all(&self, world: &mut World, dt: f32) {
        for (id, force) in &self.bindings {
            if let Some(body) = world.body_mut(*id) {
                force.apply(body, dt);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ball() -> Body {
        Body::builder()
            .circle(1.0)
            .mass(2.0)
            .vacuum()
            .friction(0.0)
            .build()
            .expect("valid body")
    }

    #[test]
    fn gravity_force_is_mass_independent() {
        let mut body = ball();
        GravityForce::new(Vec2::new(0.0, 10.0)).apply(&mut body, 0.5);
        assert_relative_eq!(body.vy(), 5.0);
    }

    #[test]
    fn spring_pulls_toward_anchor() {
        let mut body = ball();
        let spring = SpringForce {
            anchor: Vec2::new(11.0, 1.0),
            rest_length: 0.0,
            stiffness: 4.0,
            damping: 0.0,
        };
        spring.apply(&mut body, 1.0);
        // Extension 10 along +x, k = 4, m = 2.
        assert_relative_eq!(body.vx(), 20.0, epsilon = 1e-4);
        assert_relative_eq!(body.vy(), 0.0);
    }

    #[test]
    fn bounce_reflects_with_elasticity() {
        let mut body = Body::builder()
            .circle(1.0)
            .position(0.0, 9.5)
            .velocity(0.0, 10.0)
            .elasticity(0.5)
            .build()
            .expect("valid body");
        BounceForce { floor: 10.0 }.apply(&mut body, 0.0);
        assert_relative_eq!(body.vy(), -5.0, epsilon = 1e-5);
        assert_relative_eq!(body.y(), 8.0);
    }

    #[test]
    fn registry_skips_removed_bodies() {
        let mut world = World::new();
        let kept = world.add_body(ball());
        let removed = world.add_body(ball());

        let mut registry = ForceRegistry::new();
        registry.add_force(kept, GravityForce::new(Vec2::new(1.0, 0.0)));
        registry.add_force(removed, GravityForce::new(Vec2::new(1.0, 0.0)));
        world.remove_body(removed);

        registry.apply_all(&mut world, 1.0);
        assert_relative_eq!(world.body(kept).unwrap().vx(), 1.0);

        registry.remove_body(removed);
        assert_eq!(registry.len(), 1);
    }
}
