use glam::Vec2;
use log::debug;

use super::backend::{GeometricBackend, ShapeBackend};
use crate::{
    config::{WAKE_DISTANCE_FACTOR, WAKE_SPEED_THRESHOLD},
    core::body::Body,
    utils::{
        allocator::{Arena, EntityId},
        math::sign_or_positive,
    },
};

/// Reported to the observer for every overlapping pair, before resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub a: EntityId,
    pub b: EntityId,
    /// Unit normal pointing from `a` toward `b`.
    pub normal: Vec2,
}

type CollisionObserver = Box<dyn FnMut(&CollisionEvent) + Send>;

/// Brute-force pairwise sweep over every active body.
///
/// Pairs are visited as `(i, j > i)` in insertion order, and each resolution
/// mutates the bodies in place, so later pairs in the same sweep observe the
/// results of earlier ones. Intended for populations of roughly 100 bodies
/// or fewer.
pub struct CollisionDetector {
    auto_resolve: bool,
    backend: Box<dyn ShapeBackend>,
    observer: Option<CollisionObserver>,
}

impl Default for CollisionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionDetector {
    pub fn new() -> Self {
        Self {
            auto_resolve: true,
            backend: Box::new(GeometricBackend::new()),
            observer: None,
        }
    }

    pub fn set_backend<B>(&mut self, backend: B)
    where
        B: ShapeBackend + 'static,
    {
        self.backend = Box::new(backend);
    }

    pub fn backend(&self) -> &dyn ShapeBackend {
        self.backend.as_ref()
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn auto_resolve(&self) -> bool {
        self.auto_resolve
    }

    pub fn set_auto_resolve(&mut self, enabled: bool) {
        self.auto_resolve = enabled;
    }

    pub fn set_observer<F>(&mut self, observer: F)
    where
        F: FnMut(&CollisionEvent) + Send + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Runs one sweep and returns the number of overlapping pairs.
    pub fn detect(&mut self, bodies: &mut Arena<Body>) -> usize {
        let ids = bodies.ids();
        let mut contacts = 0;

        for (i, &id_a) in ids.iter().enumerate() {
            for &id_b in &ids[i + 1..] {
                let Some((a, b)) = bodies.get2_mut(id_a, id_b) else {
                    continue;
                };
                if !a.is_active() || !b.is_active() {
                    continue;
                }

                if a.collides_with_using(b, self.backend.as_ref()) {
                    contacts += 1;
                    if let Some(observer) = self.observer.as_mut() {
                        observer(&CollisionEvent {
                            a: id_a,
                            b: id_b,
                            normal: a.collision_normal(b),
                        });
                    }
                    if self.auto_resolve {
                        Self::separate(a, b);
                        a.resolve_collision(b);
                    }
                } else if a.is_resting() || b.is_resting() {
                    Self::wake_if_separated(a, b);
                }
            }
        }

        contacts
    }

    /// Pushes an overlapping pair apart along the axis of smaller box overlap.
    ///
    /// Each side moves by the other's share of the combined mass, so a static
    /// side never moves and two equal bodies split the correction evenly.
    pub fn separate(a: &mut Body, b: &mut Body) {
        let overlap = a.bounding_box().overlap(&b.bounding_box());
        if overlap.x <= 0.0 || overlap.y <= 0.0 {
            return;
        }

        let inverse_a = a.inverse_mass();
        let inverse_b = b.inverse_mass();
        let total = inverse_a + inverse_b;
        if total <= 0.0 {
            return;
        }

        let offset = b.center() - a.center();
        let push = if overlap.x < overlap.y {
            Vec2::new(overlap.x * sign_or_positive(offset.x), 0.0)
        } else {
            Vec2::new(0.0, overlap.y * sign_or_positive(offset.y))
        };

        a.translate(-push * (inverse_a / total));
        b.translate(push * (inverse_b / total));
    }

    fn wake_if_separated(a: &mut Body, b: &mut Body) {
        let distance = a.center().distance(b.center());
        let reach = WAKE_DISTANCE_FACTOR * (a.average_half_extent() + b.average_half_extent());
        if distance <= reach {
            return;
        }
        for body in [a, b] {
            if body.is_resting() && body.speed() > WAKE_SPEED_THRESHOLD {
                debug!("separated body at {:?} leaves rest", body.position());
                body.leave_rest();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(x: f32, y: f32, mass: f32) -> Body {
        Body::builder()
            .rectangle(10.0, 10.0)
            .position(x, y)
            .mass(mass)
            .build()
            .expect("valid body")
    }

    #[test]
    fn separation_is_weighted_by_opposing_mass() {
        let mut light = square(0.0, 0.0, 1.0);
        let mut heavy = square(6.0, 0.0, 3.0);
        CollisionDetector::separate(&mut light, &mut heavy);
        // Overlap of 4 on x: the light body takes 3/4 of it.
        assert_relative_eq!(light.x(), -3.0, epsilon = 1e-5);
        assert_relative_eq!(heavy.x(), 7.0, epsilon = 1e-5);
        assert!(!light.bounding_box().intersects(&heavy.bounding_box()));
    }

    #[test]
    fn static_side_never_moves() {
        let mut ground = Body::builder()
            .rectangle(100.0, 10.0)
            .position(0.0, 10.0)
            .fixed()
            .build()
            .expect("valid body");
        let mut crate_box = square(10.0, 2.0, 1.0);
        CollisionDetector::separate(&mut ground, &mut crate_box);
        assert_eq!(ground.position(), Vec2::new(0.0, 10.0));
        assert_relative_eq!(crate_box.y(), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn observer_sees_each_overlapping_pair() {
        use std::sync::{Arc, Mutex};

        let mut bodies = Arena::new();
        let a = bodies.insert(square(0.0, 0.0, 1.0));
        let b = bodies.insert(square(5.0, 0.0, 1.0));
        bodies.insert(square(100.0, 0.0, 1.0));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut detector = CollisionDetector::new();
        detector.set_auto_resolve(false);
        detector.set_observer(move |event| sink.lock().unwrap().push((event.a, event.b)));

        assert_eq!(detector.detect(&mut bodies), 1);
        assert_eq!(*seen.lock().unwrap(), vec![(a, b)]);
        // Without auto-resolve nothing moves.
        assert_eq!(bodies.get(b).unwrap().x(), 5.0);
    }

    #[test]
    fn inactive_bodies_are_skipped() {
        let mut bodies = Arena::new();
        bodies.insert(square(0.0, 0.0, 1.0));
        let mut ghost = square(5.0, 0.0, 1.0);
        ghost.set_active(false);
        bodies.insert(ghost);
        assert_eq!(CollisionDetector::new().detect(&mut bodies), 0);
    }

    #[test]
    fn separated_resting_body_wakes_when_moving() {
        let mut bodies = Arena::new();
        let a = bodies.insert(square(0.0, 0.0, 1.0));
        let b = bodies.insert(square(100.0, 0.0, 1.0));
        {
            let body = bodies.get_mut(a).unwrap();
            assert!(body.mark_resting());
            body.set_velocity(Vec2::new(1.0, 0.0));
        }
        bodies.get_mut(b).unwrap().mark_resting();

        CollisionDetector::new().detect(&mut bodies);
        assert!(!bodies.get(a).unwrap().is_resting());
        // Still, so it stays asleep.
        assert!(bodies.get(b).unwrap().is_resting());
    }
}
