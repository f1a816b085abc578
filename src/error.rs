//! Error types surfaced by the simulation core.

use thiserror::Error;

use crate::utils::allocator::EntityId;

/// Failures reported by body construction, settings loading and stepping.
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// A body or world parameter is outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// `World::step` was called with a negative or non-finite delta.
    #[error("invalid time step: {0}")]
    InvalidTimeStep(f32),
    /// A body's state became NaN or infinite.
    #[error("numerical divergence detected on body {id}")]
    NumericalDivergence { id: EntityId },
    /// The handle does not refer to a live body.
    #[error("body {0} not found")]
    BodyNotFound(EntityId),
    /// Settings could not be parsed.
    #[error("settings parse error: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Convenient `Result` alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, PhysicsError>;

/// Recoverable failure from a collision-shape backend.
///
/// Never escapes the crate's public API: callers fall back to bounding-box math.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("collision-shape backend `{0}` is unavailable")]
    Unavailable(&'static str),
}
