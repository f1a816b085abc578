//! Shape-indexed aerodynamic and inertial coefficients, plus the scalar force
//! formulas the body integrator consumes. Everything here is pure.

use std::f32::consts::PI;

use crate::config::ROLLING_TOLERANCE;
use crate::core::types::Shape;

/// Characteristic radius of a body: half its smaller extent.
pub fn characteristic_radius(width: f32, height: f32) -> f32 {
    width.min(height) * 0.5
}

/// Characteristic size used for rotational drag: the larger extent.
pub fn characteristic_size(width: f32, height: f32) -> f32 {
    width.max(height)
}

pub fn drag_coefficient(shape: Shape) -> f32 {
    match shape {
        Shape::Sphere | Shape::Circle => 0.47,
        Shape::Cube => 0.80,
        Shape::Rectangle => 0.82,
        Shape::FlatPlate => 1.28,
        Shape::Cylinder => 0.82,
    }
}

/// Frontal area in the body's stored units (px²).
pub fn cross_sectional_area(shape: Shape, width: f32, height: f32) -> f32 {
    match shape {
        Shape::Sphere | Shape::Circle => {
            let r = characteristic_radius(width, height);
            PI * r * r
        }
        Shape::Cube | Shape::Rectangle | Shape::FlatPlate | Shape::Cylinder => width * height,
    }
}

/// Moment of inertia about the centre, perpendicular to the plane.
pub fn moment_of_inertia(shape: Shape, mass: f32, width: f32, height: f32) -> f32 {
    match shape {
        Shape::Sphere | Shape::Circle => {
            let r = characteristic_radius(width, height);
            0.4 * mass * r * r
        }
        Shape::Cube | Shape::Rectangle | Shape::FlatPlate => {
            mass * (width * width + height * height) / 12.0
        }
        Shape::Cylinder => {
            let r = characteristic_radius(width, height);
            mass * (3.0 * r * r + height * height) / 12.0
        }
    }
}

/// Quadratic drag magnitude `½·ρ·v²·Cd·A`. Direction opposes velocity.
pub fn drag_force(air_density: f32, speed: f32, drag_coefficient: f32, area: f32) -> f32 {
    0.5 * air_density * speed * speed * drag_coefficient * area
}

/// Coulomb friction magnitude `μ·N`.
pub fn friction_force(mu: f32, normal_force: f32) -> f32 {
    mu * normal_force
}

/// Rolling resistance torque magnitude `μ_roll·N·r`.
pub fn rolling_torque(mu_roll: f32, normal_force: f32, radius: f32) -> f32 {
    mu_roll * normal_force * radius
}

/// Signed rotational drag `-½·ρ·Cd·A_rot·ω²·sign(ω)`.
pub fn angular_damping_torque(
    air_density: f32,
    drag_coefficient: f32,
    rotational_area: f32,
    angular_velocity: f32,
) -> f32 {
    -0.5 * air_density
        * drag_coefficient
        * rotational_area
        * angular_velocity
        * angular_velocity
        * angular_velocity.signum()
}

/// Whether the surface speed of the rim matches the linear speed.
pub fn is_rolling(speed: f32, angular_speed: f32, radius: f32) -> bool {
    if radius <= 0.0 {
        return false;
    }
    (angular_speed - speed / radius).abs() < ROLLING_TOLERANCE
}
