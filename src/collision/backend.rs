use glam::Vec2;

use crate::{core::hitbox::Hitbox, error::BackendError};

/// Pluggable geometric intersection tests over [`Hitbox`] handles.
///
/// Every failure is recoverable: callers fall back to bounding-box arithmetic
/// on the raw body extents.
pub trait ShapeBackend: Send + Sync {
    fn name(&self) -> &str;

    fn intersects(&self, a: &Hitbox, b: &Hitbox) -> Result<bool, BackendError>;

    fn contains_point(&self, shape: &Hitbox, point: Vec2) -> Result<bool, BackendError>;
}

/// Exact circle/rectangle tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct GeometricBackend;

impl GeometricBackend {
    pub fn new() -> Self {
        Self
    }

    fn circle_rect(center: Vec2, radius: f32, origin: Vec2, size: Vec2) -> bool {
        let closest = center.clamp(origin, origin + size);
        closest.distance_squared(center) < radius * radius
    }
}

impl ShapeBackend for GeometricBackend {
    fn name(&self) -> &str {
        "geometric"
    }

    fn intersects(&self, a: &Hitbox, b: &Hitbox) -> Result<bool, BackendError> {
        let hit = match (*a, *b) {
            (
                Hitbox::Circle {
                    center: ca,
                    radius: ra,
                },
                Hitbox::Circle {
                    center: cb,
                    radius: rb,
                },
            ) => ca.distance_squared(cb) < (ra + rb) * (ra + rb),
            (Hitbox::Circle { center, radius }, Hitbox::Rect { origin, size })
            | (Hitbox::Rect { origin, size }, Hitbox::Circle { center, radius }) => {
                Self::circle_rect(center, radius, origin, size)
            }
            (Hitbox::Rect { .. }, Hitbox::Rect { .. }) => {
                a.bounding_box().intersects(&b.bounding_box())
            }
        };
        Ok(hit)
    }

    fn contains_point(&self, shape: &Hitbox, point: Vec2) -> Result<bool, BackendError> {
        let inside = match *shape {
            Hitbox::Circle { center, radius } => center.distance_squared(point) <= radius * radius,
            Hitbox::Rect { .. } => shape.bounding_box().contains_point(point),
        };
        Ok(inside)
    }
}

/// Backend that is never available, forcing the bounding-box fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBackend;

impl NoopBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ShapeBackend for NoopBackend {
    fn name(&self) -> &str {
        "noop"
    }

    fn intersects(&self, _a: &Hitbox, _b: &Hitbox) -> Result<bool, BackendError> {
        Err(BackendError::Unavailable("noop"))
    }

    fn contains_point(&self, _shape: &Hitbox, _point: Vec2) -> Result<bool, BackendError> {
        Err(BackendError::Unavailable("noop"))
    }
}
