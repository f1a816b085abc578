//! Pairwise contact geometry and impulse response between two bodies.

use glam::Vec2;
use log::debug;

use super::body::Body;
use crate::{
    collision::backend::{GeometricBackend, ShapeBackend},
    config::{
        HEAVY_MASS_RATIO, REST_ABSOLUTE_SPEED, REST_NORMAL_TOLERANCE, REST_SPEED_THRESHOLD,
    },
    utils::math::sign_or_positive,
};

impl Body {
    /// Overlap test using exact circle/rectangle geometry.
    pub fn collides_with(&self, other: &Body) -> bool {
        self.collides_with_using(other, &GeometricBackend)
    }

    /// Overlap test through `backend`, falling back to bounding boxes on failure.
    pub fn collides_with_using(&self, other: &Body, backend: &dyn ShapeBackend) -> bool {
        match backend.intersects(&self.hitbox(), &other.hitbox()) {
            Ok(hit) => hit,
            Err(err) => {
                debug!("{err}; using bounding boxes");
                self.bounding_box().intersects(&other.bounding_box())
            }
        }
    }

    /// Unit contact normal pointing from `self` toward `other`.
    ///
    /// Two round bodies use the centre-to-centre direction. Anything else uses
    /// the axis of least bounding-box penetration.
    pub fn collision_normal(&self, other: &Body) -> Vec2 {
        let offset = other.center() - self.center();
        if self.shape().is_round() && other.shape().is_round() {
            return offset.try_normalize().unwrap_or(Vec2::Y);
        }

        let overlap = self.bounding_box().overlap(&other.bounding_box());
        if overlap.x < overlap.y {
            Vec2::new(sign_or_positive(offset.x), 0.0)
        } else {
            Vec2::new(0.0, sign_or_positive(offset.y))
        }
    }

    /// Exchanges a restitution impulse along the contact normal.
    ///
    /// Static sides (not gravity-affected, or heavier than the static mass
    /// threshold) absorb nothing. Afterwards a slow body pressed against a
    /// static or much heavier partner comes to rest. Returns the impulse
    /// magnitude applied, or `None` if the pair was already separating or
    /// both sides are static.
    pub fn resolve_collision(&mut self, other: &mut Body) -> Option<f32> {
        self.leave_rest();
        other.leave_rest();

        let self_static = self.is_static();
        let other_static = other.is_static();
        if self_static && other_static {
            return None;
        }

        let normal = self.collision_normal(other);
        let approach = (other.velocity() - self.velocity()).dot(normal);

        let applied = if approach < 0.0 {
            let restitution = (self.elasticity() + other.elasticity()) * 0.5;
            let j = -(1.0 + restitution) * approach;
            let impulse = match (self_static, other_static) {
                (false, false) => {
                    let j = j / (1.0 / self.mass() + 1.0 / other.mass());
                    self.set_velocity(self.velocity() - normal * (j / self.mass()));
                    other.set_velocity(other.velocity() + normal * (j / other.mass()));
                    j
                }
                (true, _) => {
                    other.set_velocity(other.velocity() + normal * j);
                    j * other.mass()
                }
                (_, true) => {
                    self.set_velocity(self.velocity() - normal * j);
                    j * self.mass()
                }
            };
            Some(impulse)
        } else {
            None
        };

        if !self_static && (other_static || other.mass() > self.mass() * HEAVY_MASS_RATIO) {
            self.settle_against(-normal);
        }
        if !other_static && (self_static || self.mass() > other.mass() * HEAVY_MASS_RATIO) {
            other.settle_against(normal);
        }

        applied
    }

    /// `outward` points from the supporting surface into this body.
    fn settle_against(&mut self, outward: Vec2) {
        let speed = self.speed();
        let normal_speed = self.velocity().dot(outward);
        let pressing = speed < REST_SPEED_THRESHOLD && normal_speed < REST_NORMAL_TOLERANCE;
        if pressing || speed < REST_ABSOLUTE_SPEED {
            self.set_velocity(self.velocity() - outward * normal_speed);
            self.enter_rest();
        } else if normal_speed > REST_NORMAL_TOLERANCE {
            self.leave_rest();
        }
    }
}
