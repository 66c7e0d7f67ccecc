//! Benchmark profiles for the Orrery planetary formation library.
//!
//! Provides pre-built configurations shared by the benches:
//!
//! - [`reference_disk`]: the default 100-body disk
//! - [`dense_disk`]: a 1000-body disk for stressing the collision pass
//! - [`solar_analogue`]: a star with `n` planets, ready for RK4 stepping

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use orrery_core::PhysicsContext;
use orrery_disk::DiskConfig;
use orrery_nbody::{initialize_planetary_system, CelestialBody, PlanetSpec};

/// The default disk profile: 100 bodies between 0.1 and 30 AU.
pub fn reference_disk() -> DiskConfig {
    DiskConfig::default()
}

/// A dense disk profile: 1000 bodies, same geometry as the default.
///
/// Stresses the O(N^2) collision pass of the accretion loop.
pub fn dense_disk() -> DiskConfig {
    DiskConfig {
        num_bodies: 1000,
        ..DiskConfig::default()
    }
}

/// A solar-mass star with `n` Earth-mass planets spread from 0.4 AU
/// outward on circular orbits.
pub fn solar_analogue(n: usize, ctx: &PhysicsContext) -> Vec<CelestialBody> {
    let planets: Vec<PlanetSpec> = (0..n)
        .map(|i| PlanetSpec {
            mass_kg: ctx.earth_mass_kg,
            radius_m: ctx.earth_radius_m,
            orbit_radius_au: 0.4 + i as f64 * 0.7,
            eccentricity: 0.0,
        })
        .collect();
    initialize_planetary_system(ctx.solar_mass_kg, &planets, ctx)
        .expect("benchmark profile is valid")
}
