//! Accreting bodies prior to planetary stability.

use nalgebra::Vector3;
use orrery_core::BodyId;

use crate::composition::Composition;

/// An intermediate accreting body.
///
/// Protoplanets are plain values held in a contiguous vector; a merge
/// consumes its two constituents and appends a replacement with a fresh
/// [`BodyId`]. Nothing mutates a protoplanet in place except the
/// per-iteration eccentricity stirring.
#[derive(Clone, Debug, PartialEq)]
pub struct Protoplanet {
    /// Handle of this body within its simulation run.
    pub id: BodyId,
    /// Mass, kg. Always positive.
    pub mass_kg: f64,
    /// Semi-major axis, AU. Always positive.
    pub orbit_au: f64,
    /// Orbital eccentricity in `[0, 1)`.
    pub eccentricity: f64,
    /// Orbital phase angle, radians. Sampled once at disk initialization;
    /// the in-plane position is derived from it rather than stored.
    pub phase: f64,
    /// Bulk composition, fractions summing to ~1.
    pub composition: Composition,
}

impl Protoplanet {
    /// In-plane position derived from orbit and phase, in AU.
    pub fn position_au(&self) -> Vector3<f64> {
        Vector3::new(
            self.orbit_au * self.phase.cos(),
            self.orbit_au * self.phase.sin(),
            0.0,
        )
    }

    /// Hill radius in AU: `a * (m / 3M)^(1/3)`.
    ///
    /// The radius of gravitational dominance around this body's orbit,
    /// for a central star of `star_mass_kg`.
    pub fn hill_radius_au(&self, star_mass_kg: f64) -> f64 {
        self.orbit_au * (self.mass_kg / (3.0 * star_mass_kg)).cbrt()
    }
}
