//! Classification of surviving accretion bodies into planets.
//!
//! Downstream world-generation consumes planets, not protoplanets: each
//! surviving body gets a class and an estimated physical radius derived
//! from its mass and composition.

use orrery_core::PhysicsContext;

use crate::accretion::AccretionResult;
use crate::composition::Composition;
use crate::protoplanet::Protoplanet;

/// Broad planet class derived from bulk composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanetClass {
    /// Silicate-dominated body.
    Rocky,
    /// Volatile-ice-dominated body.
    IceGiant,
    /// H/He-envelope-dominated body.
    GasGiant,
}

/// A formed planet, ready for downstream consumers.
#[derive(Clone, Debug)]
pub struct Planet {
    /// Mass, kg.
    pub mass_kg: f64,
    /// Estimated physical radius, m.
    pub radius_m: f64,
    /// Semi-major axis, AU.
    pub orbit_au: f64,
    /// Orbital eccentricity.
    pub eccentricity: f64,
    /// Bulk composition.
    pub composition: Composition,
    /// Broad class.
    pub class: PlanetClass,
}

/// Approximate Jupiter radius; gas giant radii are nearly independent of
/// mass across the relevant range.
const GAS_GIANT_RADIUS_M: f64 = 6.0e7;

/// Mass-radius exponent for rocky/icy bodies, `R ∝ M^0.27`.
const ROCKY_MASS_RADIUS_EXPONENT: f64 = 0.27;

fn classify(composition: &Composition) -> PlanetClass {
    if composition.gas > 0.5 {
        PlanetClass::GasGiant
    } else if composition.ice > 0.3 {
        PlanetClass::IceGiant
    } else {
        PlanetClass::Rocky
    }
}

fn estimate_radius_m(body: &Protoplanet, ctx: &PhysicsContext) -> f64 {
    if body.composition.gas > 0.5 {
        GAS_GIANT_RADIUS_M
    } else {
        ctx.earth_radius_m * (body.mass_kg / ctx.earth_mass_kg).powf(ROCKY_MASS_RADIUS_EXPONENT)
    }
}

/// Convert an accretion result into planets sorted by orbital radius.
pub fn classify_planets(result: &AccretionResult, ctx: &PhysicsContext) -> Vec<Planet> {
    let mut planets: Vec<Planet> = result
        .bodies
        .iter()
        .map(|body| Planet {
            mass_kg: body.mass_kg,
            radius_m: estimate_radius_m(body, ctx),
            orbit_au: body.orbit_au,
            eccentricity: body.eccentricity,
            composition: body.composition,
            class: classify(&body.composition),
        })
        .collect();
    planets.sort_by(|a, b| a.orbit_au.total_cmp(&b.orbit_au));
    planets
}
