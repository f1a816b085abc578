//! Core types describing simulated bodies and their contact response.

pub mod body;
pub mod contact;
pub mod hitbox;
pub mod types;

pub use body::{Body, BodyBuilder};
pub use hitbox::Hitbox;
pub use types::{Aabb, Material, Shape};
