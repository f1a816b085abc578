//! Linear-scan spatial queries over the body arena.

use glam::Vec2;
use log::debug;

use super::detector::CollisionDetector;
use crate::{
    core::{body::Body, hitbox::Hitbox, types::Aabb},
    utils::allocator::{Arena, EntityId},
};

impl CollisionDetector {
    /// Whether `point` lies inside `body`'s collision shape.
    pub fn point_in_body(&self, body: &Body, point: Vec2) -> bool {
        match self.backend().contains_point(&body.hitbox(), point) {
            Ok(inside) => inside,
            Err(err) => {
                debug!("{err}; using bounding box");
                body.bounding_box().contains_point(point)
            }
        }
    }

    /// Active bodies containing `point`, in insertion order.
    pub fn bodies_at_point(&self, bodies: &Arena<Body>, point: Vec2) -> Vec<EntityId> {
        bodies
            .iter()
            .filter(|(_, body)| body.is_active() && self.point_in_body(body, point))
            .map(|(id, _)| id)
            .collect()
    }

    /// Active bodies overlapping `area`, in insertion order.
    pub fn bodies_in_rectangle(&self, bodies: &Arena<Body>, area: Aabb) -> Vec<EntityId> {
        let probe = Hitbox::create_rect(area.min, area.size());
        bodies
            .iter()
            .filter(|(_, body)| body.is_active())
            .filter(|(_, body)| match self.backend().intersects(&probe, &body.hitbox()) {
                Ok(hit) => hit,
                Err(err) => {
                    debug!("{err}; using bounding box");
                    area.intersects(&body.bounding_box())
                }
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// Active bodies whose shape comes within `radius` of `point`, nearest
    /// centre first.
    pub fn bodies_near_point(
        &self,
        bodies: &Arena<Body>,
        point: Vec2,
        radius: f32,
    ) -> Vec<EntityId> {
        let probe = Hitbox::create_circle(point, radius);
        let mut hits: Vec<(EntityId, f32)> = bodies
            .iter()
            .filter(|(_, body)| body.is_active())
            .filter(|(_, body)| match self.backend().intersects(&probe, &body.hitbox()) {
                Ok(hit) => hit,
                Err(err) => {
                    debug!("{err}; using centre distance");
                    body.center().distance(point) <= radius
                }
            })
            .map(|(id, body)| (id, body.center().distance(point)))
            .collect();

        hits.sort_by(|a, b| a.1.total_cmp(&b.1));
        hits.into_iter().map(|(id, _)| id).collect()
    }
}
