//! Orrery: deterministic planetary formation simulation.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Orrery sub-crates. For most users, adding `orrery` as a single
//! dependency is sufficient.
//!
//! Formation runs in two stages. The statistical stage
//! ([`disk::initialize_disk`] then [`disk::simulate`]) seeds thousands of
//! planetesimals from a surface density profile and collapses them through
//! seeded Monte Carlo accretion into a handful of planets. The resolved
//! stage ([`nbody::NBodySystem`]) integrates those survivors as a full
//! N-body system with RK4, merging bodies whose spheres collide.
//!
//! # Quick start
//!
//! ```rust
//! use orrery::prelude::*;
//!
//! let ctx = PhysicsContext::default();
//! let mut rng = SimRng::from_seed_str("my-world");
//!
//! // Seed a protoplanetary disk and accrete it into planets.
//! let disk = DiskConfig::default();
//! let bodies = initialize_disk(&disk, &ctx, &mut rng).unwrap();
//! let run = simulate(&AccretionConfig::default(), &ctx, bodies, &mut rng).unwrap();
//! assert!(run.bodies.len() <= disk.num_bodies);
//!
//! // The same seed always produces the same planets.
//! let mut rng2 = SimRng::from_seed_str("my-world");
//! let bodies2 = initialize_disk(&disk, &ctx, &mut rng2).unwrap();
//! let run2 = simulate(&AccretionConfig::default(), &ctx, bodies2, &mut rng2).unwrap();
//! assert_eq!(run.bodies.len(), run2.bodies.len());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`core`] | `orrery-core` | [`core::BodyId`], [`core::PhysicsContext`], seeded RNG |
//! | [`disk`] | `orrery-disk` | Disk initialization, Monte Carlo accretion, planet classification |
//! | [`nbody`] | `orrery-nbody` | RK4 integrator, collision merging, conservation diagnostics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Shared identity, physics constants, and seeded randomness (`orrery-core`).
///
/// Contains [`core::BodyId`], the [`core::PhysicsContext`] constant bundle,
/// and the [`core::RandomSource`] trait with its [`core::SimRng`]
/// implementation.
pub use orrery_core as core;

/// Statistical formation stage (`orrery-disk`).
///
/// Seed a population with [`disk::initialize_disk`], collapse it with
/// [`disk::simulate`], and label survivors with [`disk::classify_planets`].
pub use orrery_disk as disk;

/// Resolved N-body stage (`orrery-nbody`).
///
/// [`nbody::NBodySystem`] advances pairwise gravity with RK4;
/// [`nbody::diagnostics`] exposes the conserved quantities used to bound
/// integration error.
pub use orrery_nbody as nbody;

/// Common imports for typical Orrery usage.
///
/// ```rust
/// use orrery::prelude::*;
/// ```
pub mod prelude {
    // Identity, constants, randomness
    pub use orrery_core::{BodyId, PhysicsContext, RandomSource, SimRng};

    // Statistical stage
    pub use orrery_disk::{
        classify_planets, initialize_disk, simulate, AccretionConfig, AccretionError,
        AccretionResult, Composition, DiskConfig, DiskError, Planet, PlanetClass, Protoplanet,
        StopReason,
    };

    // Resolved stage
    pub use orrery_nbody::{
        angular_momentum, center_of_mass, circular_orbit_velocity, energy,
        initialize_planetary_system, CelestialBody, CenterOfMass, EnergyBreakdown, NBodyState,
        NBodySystem, PlanetSpec, SystemError,
    };
}
