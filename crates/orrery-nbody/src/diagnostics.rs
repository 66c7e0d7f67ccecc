//! Conserved-quantity diagnostics.
//!
//! RK4 is not symplectic, so these quantities drift slowly; sampling
//! them before and after a run is the standard way to bound integration
//! error and to confirm that merges conserve what they should.

use nalgebra::Vector3;

use crate::integrator::{NBodySystem, MIN_SEPARATION_M};

/// Kinetic, potential, and total mechanical energy of a system, J.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyBreakdown {
    /// Sum of `1/2 m v^2` over all bodies.
    pub kinetic: f64,
    /// Sum of `-G m_i m_j / r` over all unordered pairs.
    pub potential: f64,
    /// `kinetic + potential`.
    pub total: f64,
}

/// Barycenter position and velocity of a system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CenterOfMass {
    /// Mass-weighted mean position, m.
    pub position: Vector3<f64>,
    /// Mass-weighted mean velocity, m/s.
    pub velocity: Vector3<f64>,
}

/// Total mechanical energy of the system.
///
/// Pairs closer than the integrator's singularity guard are skipped,
/// matching the force law they actually experience.
pub fn energy(system: &NBodySystem) -> EnergyBreakdown {
    let bodies = system.bodies();
    let g = system.context().g;

    let kinetic: f64 = bodies.iter().map(|b| b.kinetic_energy()).sum();

    let mut potential = 0.0;
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let distance = (bodies[j].position_m - bodies[i].position_m).norm();
            if distance < MIN_SEPARATION_M {
                continue;
            }
            potential -= g * bodies[i].mass_kg * bodies[j].mass_kg / distance;
        }
    }

    EnergyBreakdown {
        kinetic,
        potential,
        total: kinetic + potential,
    }
}

/// Total angular momentum about the origin, kg m^2/s.
pub fn angular_momentum(system: &NBodySystem) -> Vector3<f64> {
    system
        .bodies()
        .iter()
        .map(|b| b.position_m.cross(&b.velocity_mps) * b.mass_kg)
        .sum()
}

/// Barycenter position and velocity.
///
/// An empty system has no barycenter; this returns the origin at rest,
/// which keeps conservation checks on an emptied system trivially true.
pub fn center_of_mass(system: &NBodySystem) -> CenterOfMass {
    let bodies = system.bodies();
    let total_mass: f64 = bodies.iter().map(|b| b.mass_kg).sum();
    if total_mass <= 0.0 {
        return CenterOfMass {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
        };
    }
    let position = bodies
        .iter()
        .map(|b| b.position_m * b.mass_kg)
        .sum::<Vector3<f64>>()
        / total_mass;
    let velocity = bodies.iter().map(|b| b.momentum()).sum::<Vector3<f64>>() / total_mass;
    CenterOfMass { position, velocity }
}
