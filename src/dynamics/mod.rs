//! Simulation dynamics: shape coefficients and external force behaviours.

pub mod coefficients;
pub mod forces;

pub use forces::{BounceForce, ForceGenerator, ForceRegistry, GravityForce, SpringForce};
