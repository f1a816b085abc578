//! Small scalar and vector helpers layered on top of `glam`.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// Wraps an angle into the half-open range (-π, π].
pub fn normalize_angle(angle: f32) -> f32 {
    let mut wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped -= TAU;
    }
    wrapped
}

/// Signed shortest rotation taking `from` onto `to`, in (-π, π].
pub fn angle_difference(to: f32, from: f32) -> f32 {
    normalize_angle(to - from)
}

/// Scales `v` down so its magnitude does not exceed `max`.
pub fn clamp_magnitude(v: Vec2, max: f32) -> Vec2 {
    let length_sq = v.length_squared();
    if length_sq > max * max && length_sq > 0.0 {
        v * (max / length_sq.sqrt())
    } else {
        v
    }
}

/// Sign that treats zero as positive, so callers always get a usable axis.
pub fn sign_or_positive(value: f32) -> f32 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}
