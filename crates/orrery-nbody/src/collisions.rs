//! Sphere-overlap collision detection and inelastic merging.

use orrery_core::BodyId;

use crate::body::CelestialBody;
use crate::error::SystemError;
use crate::integrator::NBodySystem;

impl NBodySystem {
    /// All body pairs whose physical spheres currently overlap, in
    /// ascending index order.
    ///
    /// Detection only; resolving the overlaps is the caller's decision,
    /// normally via [`merge_bodies`](NBodySystem::merge_bodies).
    pub fn detect_collisions(&self) -> Vec<(BodyId, BodyId)> {
        let bodies = self.bodies();
        let mut pairs = Vec::new();
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let distance = (bodies[j].position_m - bodies[i].position_m).norm();
                if distance < bodies[i].radius_m + bodies[j].radius_m {
                    pairs.push((bodies[i].id, bodies[j].id));
                }
            }
        }
        pairs
    }

    /// Merge two bodies into one, conserving mass and linear momentum.
    ///
    /// The merged body sits at the mass-weighted barycenter with the
    /// mass-weighted (momentum-conserving) velocity, and its radius
    /// assumes equal constituent density: `r = (r1^3 + r2^3)^(1/3)`.
    /// Both inputs are removed and the merged body is appended under a
    /// fresh id, which is returned.
    ///
    /// # Errors
    ///
    /// Fails if the ids are equal or either is not in the system; the
    /// system is unchanged on error.
    pub fn merge_bodies(&mut self, id1: BodyId, id2: BodyId) -> Result<BodyId, SystemError> {
        if id1 == id2 {
            return Err(SystemError::MergeWithSelf { id: id1 });
        }
        let index_of = |bodies: &[CelestialBody], id: BodyId| {
            bodies
                .iter()
                .position(|b| b.id == id)
                .ok_or(SystemError::UnknownBody { id })
        };
        let i = index_of(self.bodies(), id1)?;
        let j = index_of(self.bodies(), id2)?;

        let merged_id = BodyId(self.allocate_id());
        let bodies = self.bodies_mut();
        // Remove the higher index first so the lower stays valid.
        let (hi, lo) = if i > j { (i, j) } else { (j, i) };
        let a = bodies.swap_remove(hi);
        let b = bodies.swap_remove(lo);

        let total_mass = a.mass_kg + b.mass_kg;
        let position = (a.position_m * a.mass_kg + b.position_m * b.mass_kg) / total_mass;
        let velocity = (a.momentum() + b.momentum()) / total_mass;
        let radius = (a.radius_m.powi(3) + b.radius_m.powi(3)).cbrt();

        bodies.push(CelestialBody {
            id: merged_id,
            mass_kg: total_mass,
            position_m: position,
            velocity_mps: velocity,
            radius_m: radius,
        });
        Ok(merged_id)
    }
}
