//! Core types shared by the Orrery simulation crates.

pub mod id;
pub mod physics;
pub mod rng;

pub use id::BodyId;
pub use physics::PhysicsContext;
pub use rng::{RandomSource, SimRng};
