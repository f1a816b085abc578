//! Collision detection: shape backends, the pairwise detector and spatial queries.

pub mod backend;
pub mod detector;
pub mod queries;

pub use backend::{GeometricBackend, NoopBackend, ShapeBackend};
pub use detector::{CollisionDetector, CollisionEvent};
