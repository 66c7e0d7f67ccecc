//! Deterministic N-body integration for resolved planetary systems.
//!
//! Once accretion has reduced a disk to a handful of bodies (or for any
//! caller-supplied system), [`NBodySystem`] advances exact pairwise
//! Newtonian gravity with a fixed-step fourth-order Runge-Kutta
//! integrator, detects sphere overlaps, and merges colliding bodies
//! inelastically. The [`diagnostics`] module provides the conserved
//! quantities used to validate integrator correctness.

pub mod body;
pub mod collisions;
pub mod diagnostics;
pub mod error;
pub mod integrator;
pub mod system;

pub use body::CelestialBody;
pub use diagnostics::{angular_momentum, center_of_mass, energy, CenterOfMass, EnergyBreakdown};
pub use error::SystemError;
pub use integrator::{NBodyState, NBodySystem};
pub use system::{circular_orbit_velocity, initialize_planetary_system, PlanetSpec};
