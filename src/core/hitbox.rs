use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::types::Aabb;

/// Collision-shape handle attached to a body.
///
/// Round bodies get a circle; every other shape collides as its axis-aligned
/// bounding rectangle. The handle is created lazily and re-posed after every
/// integration step. The pose carries position and extent only: a rotated
/// rectangle still collides as its unrotated box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Hitbox {
    Circle { center: Vec2, radius: f32 },
    Rect { origin: Vec2, size: Vec2 },
}

impl Hitbox {
    pub fn create_circle(center: Vec2, radius: f32) -> Self {
        Hitbox::Circle { center, radius }
    }

    pub fn create_rect(origin: Vec2, size: Vec2) -> Self {
        Hitbox::Rect { origin, size }
    }

    /// Moves the shape so its bounding box starts at `origin` with extent `size`.
    pub fn update_pose(&mut self, origin: Vec2, size: Vec2) {
        match self {
            Hitbox::Circle { center, radius } => {
                *center = origin + size * 0.5;
                *radius = size.min_element() * 0.5;
            }
            Hitbox::Rect {
                origin: rect_origin,
                size: rect_size,
            } => {
                *rect_origin = origin;
                *rect_size = size;
            }
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        match *self {
            Hitbox::Circle { center, radius } => {
                Aabb::new(center - Vec2::splat(radius), center + Vec2::splat(radius))
            }
            Hitbox::Rect { origin, size } => Aabb::from_origin_size(origin, size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_pose_recenters_circle() {
        let mut hitbox = Hitbox::create_circle(Vec2::ZERO, 1.0);
        hitbox.update_pose(Vec2::new(10.0, 20.0), Vec2::new(8.0, 6.0));
        assert_eq!(
            hitbox,
            Hitbox::Circle {
                center: Vec2::new(14.0, 23.0),
                radius: 3.0
            }
        );
    }

    #[test]
    fn rect_bounding_box_matches_pose() {
        let hitbox = Hitbox::create_rect(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
        let aabb = hitbox.bounding_box();
        assert_eq!(aabb.min, Vec2::new(1.0, 2.0));
        assert_eq!(aabb.max, Vec2::new(4.0, 6.0));
    }
}
