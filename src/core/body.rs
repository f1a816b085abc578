use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};

use super::{
    hitbox::Hitbox,
    types::{Aabb, Material, Shape},
};
use crate::{
    config::{
        ALIGN_MIN_SPEED, AREA_SCALE, DEFAULT_AIR_DENSITY, DEFAULT_MAX_VELOCITY,
        DEFAULT_STABILITY_FACTOR, DRIFT_DECAY, DRIFT_SNAP_THRESHOLD, DRIFT_SPEED_THRESHOLD,
        FRICTION_MIN_SPEED, MAX_ANGULAR_VELOCITY, RESTING_RESIDUAL_SPEED, REST_ABSOLUTE_SPEED,
        ROLLING_RESISTANCE_RATIO, STATIC_MASS_THRESHOLD,
    },
    dynamics::coefficients,
    error::{PhysicsError, Result},
    utils::math::{angle_difference, clamp_magnitude},
};

/// A rigid 2D extent with linear and rotational state.
///
/// `position` is the top-left corner of the bounding extent (y grows downward).
/// Build one with [`Body::builder`]; the resting flag is only reachable through
/// collision resolution or [`Body::mark_resting`].
#[derive(Debug, Clone)]
pub struct Body {
    position: Vec2,
    velocity: Vec2,
    max_velocity: f32,
    mass: f32,
    material: Material,
    shape: Shape,
    drag_coefficient: f32,
    cross_sectional_area: f32,
    air_density: f32,
    moment_of_inertia: f32,
    size: Vec2,
    angle: f32,
    angular_velocity: f32,
    auto_align: bool,
    stability_factor: f32,
    active: bool,
    gravity_affected: bool,
    pub(crate) resting: bool,
    hitbox: Option<Hitbox>,
}

impl Body {
    pub fn builder() -> BodyBuilder {
        BodyBuilder::new()
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn vx(&self) -> f32 {
        self.velocity.x
    }

    pub fn vy(&self) -> f32 {
        self.velocity.y
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn max_velocity(&self) -> f32 {
        self.max_velocity
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Zero for bodies that behave as immovable during contact.
    pub fn inverse_mass(&self) -> f32 {
        if self.is_static() {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn elasticity(&self) -> f32 {
        self.material.elasticity
    }

    pub fn friction(&self) -> f32 {
        self.material.friction
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn drag_coefficient(&self) -> f32 {
        self.drag_coefficient
    }

    pub fn cross_sectional_area(&self) -> f32 {
        self.cross_sectional_area
    }

    pub fn air_density(&self) -> f32 {
        self.air_density
    }

    pub fn moment_of_inertia(&self) -> f32 {
        self.moment_of_inertia
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Mean of the two half extents.
    pub fn average_half_extent(&self) -> f32 {
        (self.size.x + self.size.y) * 0.25
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    pub fn auto_align(&self) -> bool {
        self.auto_align
    }

    pub fn stability_factor(&self) -> f32 {
        self.stability_factor
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_gravity_affected(&self) -> bool {
        self.gravity_affected
    }

    /// Terrain-like: ignores gravity or is too heavy to be moved by contact.
    pub fn is_static(&self) -> bool {
        !self.gravity_affected || self.mass > STATIC_MASS_THRESHOLD
    }

    pub fn is_resting(&self) -> bool {
        self.resting
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_origin_size(self.position, self.size)
    }

    /// Current collision shape, derived from the pose if not created yet.
    pub fn hitbox(&self) -> Hitbox {
        self.hitbox.unwrap_or_else(|| self.fresh_hitbox())
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.sync_hitbox();
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.set_position(self.position + offset);
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = clamp_magnitude(velocity, self.max_velocity);
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
        self.sync_hitbox();
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: f32) {
        self.angular_velocity = angular_velocity.clamp(-MAX_ANGULAR_VELOCITY, MAX_ANGULAR_VELOCITY);
    }

    /// Applies `force` over `dt` (`v += F/m·dt`), or as an instantaneous
    /// impulse (`v += F/m`) when `dt` is `None`. No-op while inactive.
    pub fn apply_force(&mut self, force: Vec2, dt: Option<f32>) {
        if !self.active {
            return;
        }
        let delta = force / self.mass;
        let delta = match dt {
            Some(dt) => delta * dt,
            None => delta,
        };
        self.set_velocity(self.velocity + delta);
    }

    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.apply_force(impulse, None);
    }

    /// `ω += τ/I`, with no time scaling.
    pub fn apply_torque(&mut self, torque: f32) {
        if !self.active {
            return;
        }
        self.angular_velocity += torque / self.moment_of_inertia;
    }

    /// Puts the body to rest if it is already nearly still.
    pub fn mark_resting(&mut self) -> bool {
        if self.speed() >= REST_ABSOLUTE_SPEED {
            return false;
        }
        self.velocity = Vec2::ZERO;
        self.angular_velocity = 0.0;
        self.resting = true;
        true
    }

    pub fn clear_resting(&mut self) {
        self.resting = false;
    }

    /// Advances the body by `dt`.
    ///
    /// `gravity` is only used as the normal load for contact friction; the
    /// gravitational force itself is applied by the caller beforehand.
    pub fn update(&mut self, dt: f32, gravity: Option<f32>, skip_air_resistance: bool) {
        if !self.active {
            return;
        }

        if !skip_air_resistance {
            self.apply_air_resistance(dt);
        }
        self.apply_surface_friction(dt, gravity.unwrap_or(0.0));

        self.velocity = clamp_magnitude(self.velocity, self.max_velocity);

        if self.resting {
            if self.speed() > RESTING_RESIDUAL_SPEED {
                self.velocity = Vec2::ZERO;
            }
            self.angular_velocity = 0.0;
            return;
        }

        self.position += self.velocity * dt;

        self.apply_alignment_torque();
        self.apply_angular_damping();

        self.angle += self.angular_velocity * dt;
        self.angular_velocity = self
            .angular_velocity
            .clamp(-MAX_ANGULAR_VELOCITY, MAX_ANGULAR_VELOCITY);
        self.sync_hitbox();

        self.suppress_drift();
    }

    pub(crate) fn sync_hitbox(&mut self) {
        let (origin, size) = (self.position, self.size);
        match self.hitbox.as_mut() {
            Some(hitbox) => hitbox.update_pose(origin, size),
            None => self.hitbox = Some(self.fresh_hitbox()),
        }
    }

    fn fresh_hitbox(&self) -> Hitbox {
        if self.shape.is_round() {
            Hitbox::create_circle(self.center(), self.size.min_element() * 0.5)
        } else {
            Hitbox::create_rect(self.position, self.size)
        }
    }

    fn apply_air_resistance(&mut self, dt: f32) {
        let speed = self.speed();
        if speed <= f32::EPSILON {
            return;
        }
        let force = coefficients::drag_force(
            self.air_density,
            speed,
            self.drag_coefficient,
            self.cross_sectional_area * AREA_SCALE,
        );
        self.decelerate(force, dt);
    }

    fn apply_surface_friction(&mut self, dt: f32, gravity: f32) {
        let speed = self.speed();
        if speed <= FRICTION_MIN_SPEED {
            return;
        }
        // y-up worlds pass negative gravity.
        let normal_force = self.mass * gravity.abs();
        if normal_force <= 0.0 || self.material.friction <= 0.0 {
            return;
        }

        let radius = coefficients::characteristic_radius(self.size.x, self.size.y);
        if coefficients::is_rolling(speed, self.angular_velocity.abs(), radius) {
            let torque = coefficients::rolling_torque(
                self.material.friction * ROLLING_RESISTANCE_RATIO,
                normal_force,
                radius,
            );
            self.resist_spin(torque);
        } else {
            let force = coefficients::friction_force(self.material.friction, normal_force);
            self.decelerate(force, dt);
        }
    }

    fn apply_alignment_torque(&mut self) {
        if !self.auto_align {
            return;
        }
        let speed = self.speed();
        if speed <= ALIGN_MIN_SPEED {
            return;
        }
        let heading = self.velocity.y.atan2(self.velocity.x);
        let error = angle_difference(heading, self.angle);
        self.apply_torque(self.stability_factor * error * speed);
    }

    fn apply_angular_damping(&mut self) {
        if self.angular_velocity == 0.0 {
            return;
        }
        let size = coefficients::characteristic_size(self.size.x, self.size.y);
        let torque = coefficients::angular_damping_torque(
            self.air_density,
            self.drag_coefficient,
            size * size * AREA_SCALE,
            self.angular_velocity,
        );
        self.resist_spin(torque.abs());
    }

    /// Removes up to `force/m·dt` of speed along the direction of travel.
    /// Resistive forces stop the body; they never reverse it.
    fn decelerate(&mut self, force: f32, dt: f32) {
        let speed = self.speed();
        if speed <= 0.0 || force <= 0.0 {
            return;
        }
        let loss = force / self.mass * dt;
        if loss >= speed {
            self.velocity = Vec2::ZERO;
        } else {
            let direction = self.velocity / speed;
            self.apply_force(-direction * force, Some(dt));
        }
    }

    /// Torque counterpart of [`Body::decelerate`].
    fn resist_spin(&mut self, torque: f32) {
        let omega = self.angular_velocity;
        if omega == 0.0 || torque <= 0.0 {
            return;
        }
        if torque / self.moment_of_inertia >= omega.abs() {
            self.angular_velocity = 0.0;
        } else {
            self.apply_torque(-omega.signum() * torque);
        }
    }

    fn suppress_drift(&mut self) {
        if self.speed() >= DRIFT_SPEED_THRESHOLD {
            return;
        }
        self.velocity *= DRIFT_DECAY;
        self.angular_velocity *= DRIFT_DECAY;
        if self.speed() < DRIFT_SNAP_THRESHOLD {
            self.velocity = Vec2::ZERO;
        }
        if self.angular_velocity.abs() < DRIFT_SNAP_THRESHOLD {
            self.angular_velocity = 0.0;
        }
    }

    pub(crate) fn enter_rest(&mut self) {
        if !self.resting {
            debug!("body at {:?} came to rest", self.position);
        }
        self.resting = true;
    }

    pub(crate) fn leave_rest(&mut self) {
        if self.resting {
            debug!("body at {:?} woke up", self.position);
        }
        self.resting = false;
    }

    pub(crate) fn has_finite_state(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.angle.is_finite()
            && self.angular_velocity.is_finite()
    }
}

/// Declarative body description. Unset aerodynamic and inertial values are
/// derived from shape and extent when the body is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyBuilder {
    position: Vec2,
    velocity: Vec2,
    size: Vec2,
    mass: f32,
    material: Material,
    shape: Shape,
    max_velocity: f32,
    drag_coefficient: Option<f32>,
    cross_sectional_area: Option<f32>,
    air_density: f32,
    moment_of_inertia: Option<f32>,
    angle: f32,
    angular_velocity: f32,
    auto_align: bool,
    stability_factor: f32,
    active: bool,
    gravity_affected: bool,
}

impl Default for BodyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BodyBuilder {
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            size: Vec2::splat(1.0),
            mass: 1.0,
            material: Material::default(),
            shape: Shape::default(),
            max_velocity: DEFAULT_MAX_VELOCITY,
            drag_coefficient: None,
            cross_sectional_area: None,
            air_density: DEFAULT_AIR_DENSITY,
            moment_of_inertia: None,
            angle: 0.0,
            angular_velocity: 0.0,
            auto_align: false,
            stability_factor: DEFAULT_STABILITY_FACTOR,
            active: true,
            gravity_affected: true,
        }
    }

    /// Round body of the given radius.
    pub fn circle(mut self, radius: f32) -> Self {
        self.shape = Shape::Circle;
        self.size = Vec2::splat(radius * 2.0);
        self
    }

    pub fn rectangle(mut self, width: f32, height: f32) -> Self {
        self.shape = Shape::Rectangle;
        self.size = Vec2::new(width, height);
        self
    }

    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = Vec2::new(width, height);
        self
    }

    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    pub fn velocity(mut self, vx: f32, vy: f32) -> Self {
        self.velocity = Vec2::new(vx, vy);
        self
    }

    pub fn mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn elasticity(mut self, elasticity: f32) -> Self {
        self.material.elasticity = elasticity;
        self
    }

    pub fn friction(mut self, friction: f32) -> Self {
        self.material.friction = friction;
        self
    }

    pub fn max_velocity(mut self, max_velocity: f32) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    pub fn drag_coefficient(mut self, drag_coefficient: f32) -> Self {
        self.drag_coefficient = Some(drag_coefficient);
        self
    }

    pub fn cross_sectional_area(mut self, area: f32) -> Self {
        self.cross_sectional_area = Some(area);
        self
    }

    pub fn air_density(mut self, air_density: f32) -> Self {
        self.air_density = air_density;
        self
    }

    /// Disables air resistance for this body.
    pub fn vacuum(self) -> Self {
        self.air_density(0.0)
    }

    pub fn moment_of_inertia(mut self, moment_of_inertia: f32) -> Self {
        self.moment_of_inertia = Some(moment_of_inertia);
        self
    }

    pub fn angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Makes the body turn to face its direction of travel.
    pub fn auto_align(mut self, stability_factor: f32) -> Self {
        self.auto_align = true;
        self.stability_factor = stability_factor;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn gravity_affected(mut self, gravity_affected: bool) -> Self {
        self.gravity_affected = gravity_affected;
        self
    }

    /// Immovable terrain: ignores gravity and absorbs contact impulses.
    pub fn fixed(self) -> Self {
        self.gravity_affected(false)
    }

    pub fn build(self) -> Result<Body> {
        self.validate()?;

        let (width, height) = (self.size.x, self.size.y);
        let drag_coefficient = self
            .drag_coefficient
            .unwrap_or_else(|| coefficients::drag_coefficient(self.shape));
        let cross_sectional_area = self
            .cross_sectional_area
            .unwrap_or_else(|| coefficients::cross_sectional_area(self.shape, width, height));
        let moment_of_inertia = self.moment_of_inertia.unwrap_or_else(|| {
            coefficients::moment_of_inertia(self.shape, self.mass, width, height)
        });

        let mut body = Body {
            position: self.position,
            velocity: clamp_magnitude(self.velocity, self.max_velocity),
            max_velocity: self.max_velocity,
            mass: self.mass,
            material: self.material,
            shape: self.shape,
            drag_coefficient,
            cross_sectional_area,
            air_density: self.air_density,
            moment_of_inertia,
            size: self.size,
            angle: self.angle,
            angular_velocity: self
                .angular_velocity
                .clamp(-MAX_ANGULAR_VELOCITY, MAX_ANGULAR_VELOCITY),
            auto_align: self.auto_align,
            stability_factor: self.stability_factor,
            active: self.active,
            gravity_affected: self.gravity_affected,
            resting: false,
            hitbox: None,
        };
        body.sync_hitbox();
        Ok(body)
    }

    fn validate(&self) -> Result<()> {
        fn invalid(message: String) -> Result<()> {
            Err(PhysicsError::InvalidConfiguration(message))
        }

        if !(self.mass.is_finite() && self.mass > 0.0) {
            return invalid(format!("mass must be positive and finite, got {}", self.mass));
        }
        if !(self.size.is_finite() && self.size.x > 0.0 && self.size.y > 0.0) {
            return invalid(format!("extent must be positive, got {:?}", self.size));
        }
        if !(0.0..=1.0).contains(&self.material.elasticity) {
            return invalid(format!(
                "elasticity must lie in [0, 1], got {}",
                self.material.elasticity
            ));
        }
        if !(self.material.friction.is_finite() && self.material.friction >= 0.0) {
            return invalid(format!(
                "friction must be non-negative, got {}",
                self.material.friction
            ));
        }
        if !(self.max_velocity.is_finite() && self.max_velocity > 0.0) {
            return invalid(format!(
                "max velocity must be positive, got {}",
                self.max_velocity
            ));
        }
        if !(self.air_density.is_finite() && self.air_density >= 0.0) {
            return invalid(format!(
                "air density must be non-negative, got {}",
                self.air_density
            ));
        }
        let overrides = [
            ("drag coefficient", self.drag_coefficient),
            ("cross-sectional area", self.cross_sectional_area),
        ];
        for (name, value) in overrides {
            if let Some(value) = value {
                if !(value.is_finite() && value >= 0.0) {
                    return invalid(format!("{name} must be non-negative, got {value}"));
                }
            }
        }
        if let Some(inertia) = self.moment_of_inertia {
            if !(inertia.is_finite() && inertia > 0.0) {
                return invalid(format!("moment of inertia must be positive, got {inertia}"));
            }
        }
        if !(self.position.is_finite()
            && self.velocity.is_finite()
            && self.angle.is_finite()
            && self.angular_velocity.is_finite()
            && self.stability_factor.is_finite())
        {
            return invalid("initial state must be finite".into());
        }
        Ok(())
    }
}
