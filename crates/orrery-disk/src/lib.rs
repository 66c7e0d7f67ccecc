//! Protoplanetary disk initialization and Monte Carlo accretion.
//!
//! Two stages, usable independently:
//!
//! 1. [`initialize_disk`] draws a seeded population of protoplanets from a
//!    surface-density profile.
//! 2. [`simulate`] grows that population into a small set of stable bodies
//!    through probabilistic Hill-sphere collisions, mass-conserving merges,
//!    and gravitational stirring.
//!
//! Both stages are deterministic given a seeded [`orrery_core::SimRng`].

pub mod accretion;
pub mod composition;
pub mod disk;
pub mod planets;
pub mod protoplanet;

pub use accretion::{simulate, AccretionConfig, AccretionError, AccretionResult, StopReason};
pub use composition::Composition;
pub use disk::{initialize_disk, DiskConfig, DiskError};
pub use planets::{classify_planets, Planet, PlanetClass};
pub use protoplanet::Protoplanet;
