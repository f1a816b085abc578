use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Aerodynamic/inertial shape class of a body.
///
/// `Sphere`/`Circle` and `Cube`/`Rectangle` are the 3D and 2D names of the same
/// profile, but cubes and rectangles carry slightly different drag coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Sphere,
    #[default]
    Circle,
    Cube,
    Rectangle,
    FlatPlate,
    Cylinder,
}

impl Shape {
    /// Round shapes collide as circles; everything else as its bounding rectangle.
    pub fn is_round(self) -> bool {
        matches!(self, Shape::Sphere | Shape::Circle)
    }
}

/// Surface coefficients set together on a body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Restitution in [0, 1].
    pub elasticity: f32,
    /// Coulomb sliding coefficient.
    pub friction: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            elasticity: 0.5,
            friction: 0.3,
        }
    }
}

impl Material {
    pub fn rubber() -> Self {
        Self {
            elasticity: 0.8,
            friction: 0.7,
        }
    }

    pub fn steel() -> Self {
        Self {
            elasticity: 0.4,
            friction: 0.44,
        }
    }

    pub fn ice() -> Self {
        Self {
            elasticity: 0.05,
            friction: 0.03,
        }
    }

    pub fn wood() -> Self {
        Self {
            elasticity: 0.3,
            friction: 0.4,
        }
    }

    /// Frictionless and perfectly elastic.
    pub fn ideal() -> Self {
        Self {
            elasticity: 1.0,
            friction: 0.0,
        }
    }
}

/// Axis-aligned rectangle in world space (y down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Overlap extent on each axis; negative components mean a gap.
    pub fn overlap(&self, other: &Aabb) -> Vec2 {
        let x = self.max.x.min(other.max.x) - self.min.x.max(other.min.x);
        let y = self.max.y.min(other.max.y) - self.min.y.max(other.min.y);
        Vec2::new(x, y)
    }
}
