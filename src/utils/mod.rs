//! Utility helpers: the body arena, phase timing and math extensions.

pub mod allocator;
pub mod logging;
pub mod math;

pub use allocator::{Arena, EntityId};
pub use math::*;
