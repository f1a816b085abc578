//! Global configuration constants and loadable world settings.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, Result};

/// Default gravity magnitude, pulling toward +y (screen space, y down).
pub const DEFAULT_GRAVITY: f32 = 9.81;

/// Sea-level air density (kg/m³).
pub const DEFAULT_AIR_DENSITY: f32 = 1.225;

/// Default upper bound on each body's speed.
pub const DEFAULT_MAX_VELOCITY: f32 = 2000.0;

/// Default stability factor for self-aligning bodies.
pub const DEFAULT_STABILITY_FACTOR: f32 = 0.1;

/// Converts stored cross-section units (px²) into the drag model's m² (1 px = 1 cm).
pub const AREA_SCALE: f32 = 1.0e-4;

/// Rolling resistance as a fraction of the sliding friction coefficient.
pub const ROLLING_RESISTANCE_RATIO: f32 = 0.02;

/// Tolerance of `|ω - v/r|` under which contact counts as rolling.
pub const ROLLING_TOLERANCE: f32 = 0.1;

/// Below this speed neither sliding nor rolling friction is applied.
pub const FRICTION_MIN_SPEED: f32 = 0.01;

/// Minimum speed for aerodynamic self-alignment.
pub const ALIGN_MIN_SPEED: f32 = 0.5;

/// Hard clamp on angular velocity (rad/s).
pub const MAX_ANGULAR_VELOCITY: f32 = 20.0;

/// Speeds under this start decaying toward zero every step.
pub const DRIFT_SPEED_THRESHOLD: f32 = 0.1;

/// Per-step multiplier applied to drifting velocities.
pub const DRIFT_DECAY: f32 = 0.9;

/// Drifting velocities under this snap to exactly zero.
pub const DRIFT_SNAP_THRESHOLD: f32 = 0.01;

/// A resting body with residual speed over this is zeroed.
pub const RESTING_RESIDUAL_SPEED: f32 = 1.0e-3;

/// Bodies heavier than this behave as immovable during resolution.
pub const STATIC_MASS_THRESHOLD: f32 = 1.0e6;

/// Mass ratio above which the heavier side of a contact is treated as ground.
pub const HEAVY_MASS_RATIO: f32 = 10.0;

/// Post-impulse speed below which a body on heavy ground may come to rest.
pub const REST_SPEED_THRESHOLD: f32 = 1.0;

/// Post-impulse speed below which a body rests regardless of direction.
pub const REST_ABSOLUTE_SPEED: f32 = 0.2;

/// Normal velocity still counted as pressing into the surface.
pub const REST_NORMAL_TOLERANCE: f32 = 0.5;

/// Separation factor on the average half extents for waking resting pairs.
pub const WAKE_DISTANCE_FACTOR: f32 = 1.5;

/// Speed a resting body needs before separation wakes it.
pub const WAKE_SPEED_THRESHOLD: f32 = 0.1;

/// Default frame budget for step timing warnings (ms, 0 disables).
pub const DEFAULT_FRAME_BUDGET_MS: f32 = 16.0;

/// Optional axis-aligned limits of the world. Any edge may be unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub left: Option<f32>,
    pub right: Option<f32>,
    pub top: Option<f32>,
    pub bottom: Option<f32>,
}

impl Bounds {
    /// Closed box from `(left, top)` to `(right, bottom)`.
    pub fn rect(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
            top: Some(top),
            bottom: Some(bottom),
        }
    }
}

/// World-level settings. Missing JSON fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub gravity: f32,
    pub wind: Vec2,
    pub wind_enabled: bool,
    pub bounds: Bounds,
    pub frame_budget_ms: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            wind: Vec2::ZERO,
            wind_enabled: false,
            bounds: Bounds::default(),
            frame_budget_ms: DEFAULT_FRAME_BUDGET_MS,
        }
    }
}

impl WorldSettings {
    pub fn from_json(source: &str) -> Result<Self> {
        let settings: WorldSettings = serde_json::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidConfiguration(format!(
                "gravity must be finite, got {}",
                self.gravity
            )));
        }
        if !self.wind.is_finite() {
            return Err(PhysicsError::InvalidConfiguration(
                "wind must be finite".into(),
            ));
        }
        let Bounds {
            left,
            right,
            top,
            bottom,
        } = self.bounds;
        if let (Some(l), Some(r)) = (left, right) {
            if l >= r {
                return Err(PhysicsError::InvalidConfiguration(format!(
                    "left bound {l} must be less than right bound {r}"
                )));
            }
        }
        if let (Some(t), Some(b)) = (top, bottom) {
            if t >= b {
                return Err(PhysicsError::InvalidConfiguration(format!(
                    "top bound {t} must be less than bottom bound {b}"
                )));
            }
        }
        Ok(())
    }
}
