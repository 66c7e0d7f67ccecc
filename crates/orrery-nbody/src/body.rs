//! Bodies resolved at full positional fidelity.

use nalgebra::Vector3;
use orrery_core::BodyId;

/// A body in the N-body integrator, SI units throughout.
///
/// Created at system initialization (from scratch or from a finalized
/// accretion result), mutated every integration step, destroyed on merge.
#[derive(Clone, Debug, PartialEq)]
pub struct CelestialBody {
    /// Handle of this body within its system.
    pub id: BodyId,
    /// Mass, kg. Always positive.
    pub mass_kg: f64,
    /// Position, m.
    pub position_m: Vector3<f64>,
    /// Velocity, m/s.
    pub velocity_mps: Vector3<f64>,
    /// Physical radius for collision detection, m. Always positive.
    pub radius_m: f64,
}

impl CelestialBody {
    /// Linear momentum, kg m/s.
    pub fn momentum(&self) -> Vector3<f64> {
        self.velocity_mps * self.mass_kg
    }

    /// Kinetic energy, J.
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass_kg * self.velocity_mps.norm_squared()
    }
}
