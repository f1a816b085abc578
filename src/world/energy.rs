//! Aggregate energy bookkeeping.

use super::World;

impl World {
    /// Sum of `½·m·v²` over active bodies.
    pub fn kinetic_energy(&self) -> f32 {
        self.bodies()
            .filter(|(_, body)| body.is_active())
            .map(|(_, body)| body.kinetic_energy())
            .sum()
    }

    /// Reference height for potential energy (y grows downward).
    ///
    /// The highest top surface among terrain bodies (active, not affected by
    /// gravity); otherwise the bottom bound; otherwise zero.
    pub fn ground_level(&self) -> f32 {
        self.bodies()
            .filter(|(_, body)| body.is_active() && !body.is_gravity_affected())
            .map(|(_, body)| body.y())
            .reduce(f32::min)
            .or(self.bounds().bottom)
            .unwrap_or(0.0)
    }

    /// `Σ m·g·(ground − bottom)` over gravity-affected active bodies. Zero for
    /// a body sitting on the ground.
    pub fn potential_energy(&self) -> f32 {
        let ground = self.ground_level();
        let gravity = self.gravity();
        self.bodies()
            .filter(|(_, body)| body.is_active() && body.is_gravity_affected())
            .map(|(_, body)| {
                let bottom = body.y() + body.height();
                body.mass() * gravity * (ground - bottom)
            })
            .sum()
    }

    pub fn total_energy(&self) -> f32 {
        self.kinetic_energy() + self.potential_energy()
    }
}
