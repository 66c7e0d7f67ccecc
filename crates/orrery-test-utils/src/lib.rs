//! Shared test doubles for the Orrery crates.

pub mod rng;

pub use rng::{ForcedRng, ScriptedRng};
