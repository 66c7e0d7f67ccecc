//! Helpers for assembling planetary systems in resolved coordinates.

use nalgebra::Vector3;
use orrery_core::{BodyId, PhysicsContext};

use crate::body::CelestialBody;
use crate::error::SystemError;

/// Bulk properties of one planet to place around a star.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanetSpec {
    /// Mass, kg.
    pub mass_kg: f64,
    /// Physical radius, m.
    pub radius_m: f64,
    /// Orbital distance from the star, AU.
    pub orbit_radius_au: f64,
    /// Orbital eccentricity in `[0, 1)`.
    pub eccentricity: f64,
}

/// Periapsis speed for an orbit of the given radius and eccentricity,
/// `sqrt(G M / r) * sqrt((1 + e) / (1 - e))`, in m/s.
///
/// With `e = 0` this is the circular orbit speed.
///
/// # Errors
///
/// Rejects non-positive central mass or orbit radius and eccentricity
/// outside `[0, 1)`.
pub fn circular_orbit_velocity(
    ctx: &PhysicsContext,
    central_mass_kg: f64,
    orbit_radius_m: f64,
    eccentricity: f64,
) -> Result<f64, SystemError> {
    if !central_mass_kg.is_finite() || central_mass_kg <= 0.0 {
        return Err(SystemError::NonPositiveMass {
            value: central_mass_kg,
        });
    }
    if !orbit_radius_m.is_finite() || orbit_radius_m <= 0.0 {
        return Err(SystemError::NonPositiveOrbitRadius {
            value: orbit_radius_m,
        });
    }
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(SystemError::EccentricityOutOfRange {
            value: eccentricity,
        });
    }
    let circular = (ctx.g * central_mass_kg / orbit_radius_m).sqrt();
    Ok(circular * ((1.0 + eccentricity) / (1.0 - eccentricity)).sqrt())
}

/// Build a star-plus-planets body list ready for [`NBodySystem::new`].
///
/// The star takes id 0 at the origin, at rest, with the context's solar
/// radius. Planet `i` of `n` is placed in the orbital plane at angle
/// `2 pi i / n` with tangential (prograde) velocity from
/// [`circular_orbit_velocity`], and takes id `i + 1`.
///
/// # Errors
///
/// Rejects a non-positive star mass, and any planet with non-positive
/// mass, radius, or orbit radius, or eccentricity outside `[0, 1)`.
///
/// [`NBodySystem::new`]: crate::integrator::NBodySystem::new
pub fn initialize_planetary_system(
    star_mass_kg: f64,
    planets: &[PlanetSpec],
    ctx: &PhysicsContext,
) -> Result<Vec<CelestialBody>, SystemError> {
    if !star_mass_kg.is_finite() || star_mass_kg <= 0.0 {
        return Err(SystemError::NonPositiveMass {
            value: star_mass_kg,
        });
    }

    let mut bodies = Vec::with_capacity(planets.len() + 1);
    bodies.push(CelestialBody {
        id: BodyId(0),
        mass_kg: star_mass_kg,
        position_m: Vector3::zeros(),
        velocity_mps: Vector3::zeros(),
        radius_m: ctx.solar_radius_m,
    });

    for (i, planet) in planets.iter().enumerate() {
        if !planet.mass_kg.is_finite() || planet.mass_kg <= 0.0 {
            return Err(SystemError::NonPositiveMass {
                value: planet.mass_kg,
            });
        }
        if !planet.radius_m.is_finite() || planet.radius_m <= 0.0 {
            return Err(SystemError::NonPositiveRadius {
                value: planet.radius_m,
            });
        }
        let orbit_radius_m = ctx.au_to_m(planet.orbit_radius_au);
        let speed =
            circular_orbit_velocity(ctx, star_mass_kg, orbit_radius_m, planet.eccentricity)?;

        // Spread planets evenly in phase so close spacings in orbit
        // radius do not start as close approaches in space.
        let angle = std::f64::consts::TAU * i as f64 / planets.len() as f64;
        let (sin, cos) = angle.sin_cos();
        bodies.push(CelestialBody {
            id: BodyId(i as u64 + 1),
            mass_kg: planet.mass_kg,
            position_m: Vector3::new(orbit_radius_m * cos, orbit_radius_m * sin, 0.0),
            velocity_mps: Vector3::new(-speed * sin, speed * cos, 0.0),
            radius_m: planet.radius_m,
        });
    }
    Ok(bodies)
}
