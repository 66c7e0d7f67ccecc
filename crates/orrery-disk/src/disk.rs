//! Protoplanetary disk initialization.
//!
//! Builds a seeded population of protoplanets from a disk mass/radius
//! profile. Orbital radii follow the Minimum-Mass-Solar-Nebula surface
//! density `Σ(r) ∝ r^(-3/2)` via inverse-transform sampling; per-body
//! masses carry multiplicative log-normal noise so the population has
//! realistic diversity instead of uniform lumps.

use std::error::Error;
use std::fmt;

use orrery_core::{BodyId, PhysicsContext, RandomSource};

use crate::composition::Composition;
use crate::protoplanet::Protoplanet;

/// Configuration for one disk initialization.
#[derive(Clone, Debug)]
pub struct DiskConfig {
    /// Total disk mass in solar masses. Must be positive.
    pub disk_mass_solar: f64,
    /// Inner edge of the disk, AU. Must be positive.
    pub inner_radius_au: f64,
    /// Outer edge of the disk, AU. Must exceed the inner edge.
    pub outer_radius_au: f64,
    /// Number of protoplanets to draw. Must be at least 1.
    pub num_bodies: usize,
    /// Stellar luminosity in solar units; sets the frost line. Must be
    /// positive.
    pub stellar_luminosity: f64,
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            disk_mass_solar: 0.01,
            inner_radius_au: 0.1,
            outer_radius_au: 30.0,
            num_bodies: 100,
            stellar_luminosity: 1.0,
        }
    }
}

impl DiskConfig {
    /// Validate all structural invariants.
    ///
    /// Invalid configuration is a contract violation caught here at the
    /// boundary; the sampling loop itself never fails.
    pub fn validate(&self) -> Result<(), DiskError> {
        if !self.disk_mass_solar.is_finite() || self.disk_mass_solar <= 0.0 {
            return Err(DiskError::NonPositiveDiskMass {
                value: self.disk_mass_solar,
            });
        }
        if !self.inner_radius_au.is_finite() || self.inner_radius_au <= 0.0 {
            return Err(DiskError::NonPositiveRadius {
                value: self.inner_radius_au,
            });
        }
        if !self.outer_radius_au.is_finite() || self.outer_radius_au <= self.inner_radius_au {
            return Err(DiskError::RadiusOrdering {
                inner: self.inner_radius_au,
                outer: self.outer_radius_au,
            });
        }
        if self.num_bodies == 0 {
            return Err(DiskError::ZeroBodies);
        }
        if !self.stellar_luminosity.is_finite() || self.stellar_luminosity <= 0.0 {
            return Err(DiskError::NonPositiveLuminosity {
                value: self.stellar_luminosity,
            });
        }
        Ok(())
    }
}

/// Errors detected during [`DiskConfig::validate`].
#[derive(Clone, Debug, PartialEq)]
pub enum DiskError {
    /// Disk mass is zero, negative, or non-finite.
    NonPositiveDiskMass {
        /// The offending value.
        value: f64,
    },
    /// Inner radius is zero, negative, or non-finite.
    NonPositiveRadius {
        /// The offending value.
        value: f64,
    },
    /// Outer radius does not exceed the inner radius.
    RadiusOrdering {
        /// Configured inner edge.
        inner: f64,
        /// Configured outer edge.
        outer: f64,
    },
    /// Requested body count is zero.
    ZeroBodies,
    /// Stellar luminosity is zero, negative, or non-finite.
    NonPositiveLuminosity {
        /// The offending value.
        value: f64,
    },
}

impl fmt::Display for DiskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveDiskMass { value } => {
                write!(f, "disk mass must be positive, got {value}")
            }
            Self::NonPositiveRadius { value } => {
                write!(f, "inner radius must be positive, got {value}")
            }
            Self::RadiusOrdering { inner, outer } => {
                write!(f, "outer radius ({outer}) must exceed inner radius ({inner})")
            }
            Self::ZeroBodies => write!(f, "num_bodies must be at least 1"),
            Self::NonPositiveLuminosity { value } => {
                write!(f, "stellar luminosity must be positive, got {value}")
            }
        }
    }
}

impl Error for DiskError {}

/// Surface density profile `Σ(r) ∝ r^(-3/2)`, unnormalized.
fn surface_density(r_au: f64) -> f64 {
    r_au.powf(-1.5)
}

/// Draw an orbital radius by inverse-transform sampling against
/// `Σ(r) ∝ r^(-3/2)`. The corresponding CDF is proportional to `sqrt(r)`,
/// so a uniform sample maps to `r = (sqrt(inner) + u * (sqrt(outer) -
/// sqrt(inner)))^2`.
fn sample_orbital_radius(inner_au: f64, outer_au: f64, rng: &mut dyn RandomSource) -> f64 {
    let u = rng.uniform();
    let cdf = inner_au.sqrt() + u * (outer_au.sqrt() - inner_au.sqrt());
    cdf * cdf
}

/// Build a seeded population of protoplanets from a disk profile.
///
/// Identical seed and configuration produce a bit-reproducible body list;
/// the seed is reused elsewhere to regenerate the same world.
///
/// # Errors
///
/// Returns a [`DiskError`] if the configuration violates its contract.
pub fn initialize_disk(
    config: &DiskConfig,
    ctx: &PhysicsContext,
    rng: &mut dyn RandomSource,
) -> Result<Vec<Protoplanet>, DiskError> {
    config.validate()?;

    let total_mass_kg = ctx.solar_masses_to_kg(config.disk_mass_solar);
    let frost_line_au = ctx.frost_line_au(config.stellar_luminosity);
    let n = config.num_bodies;

    let mut bodies = Vec::with_capacity(n);
    for i in 0..n {
        let orbit_au = sample_orbital_radius(config.inner_radius_au, config.outer_radius_au, rng);

        // Local surface density sets the mass budget for this body;
        // log-normal noise spreads the population over ~an order of
        // magnitude.
        let mass_fraction = surface_density(orbit_au) / n as f64;
        let mass_kg = total_mass_kg * mass_fraction * rng.log_normal(0.0, 0.5);

        let composition = Composition::for_orbit(orbit_au, frost_line_au);

        // Beta(1,10) keeps initial orbits near-circular.
        let eccentricity = rng.beta(1.0, 10.0);
        let phase = rng.uniform() * std::f64::consts::TAU;

        bodies.push(Protoplanet {
            id: BodyId(i as u64),
            mass_kg,
            orbit_au,
            eccentricity,
            phase,
            composition,
        });
    }

    Ok(bodies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::SimRng;
    use orrery_test_utils::ScriptedRng;

    fn solar_ctx() -> PhysicsContext {
        PhysicsContext::default()
    }

    #[test]
    fn validate_default_succeeds() {
        assert!(DiskConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_positive_mass() {
        let cfg = DiskConfig {
            disk_mass_solar: 0.0,
            ..DiskConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(DiskError::NonPositiveDiskMass { value: 0.0 })
        );
    }

    #[test]
    fn validate_rejects_inverted_radii() {
        let cfg = DiskConfig {
            inner_radius_au: 5.0,
            outer_radius_au: 1.0,
            ..DiskConfig::default()
        };
        match cfg.validate() {
            Err(DiskError::RadiusOrdering { .. }) => {}
            other => panic!("expected RadiusOrdering, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_zero_bodies() {
        let cfg = DiskConfig {
            num_bodies: 0,
            ..DiskConfig::default()
        };
        assert_eq!(cfg.validate(), Err(DiskError::ZeroBodies));
    }

    #[test]
    fn validate_rejects_nan_luminosity() {
        let cfg = DiskConfig {
            stellar_luminosity: f64::NAN,
            ..DiskConfig::default()
        };
        match cfg.validate() {
            Err(DiskError::NonPositiveLuminosity { .. }) => {}
            other => panic!("expected NonPositiveLuminosity, got {other:?}"),
        }
    }

    #[test]
    fn radius_sampling_stays_in_bounds() {
        let mut rng = SimRng::from_seed(11);
        for _ in 0..1_000 {
            let r = sample_orbital_radius(0.1, 30.0, &mut rng);
            assert!((0.1..=30.0).contains(&r), "sampled {r} outside disk");
        }
    }

    #[test]
    fn radius_sampling_inverts_the_cdf_endpoints() {
        // u = 0 maps to the inner edge, u = 1 to the outer edge, and the
        // CDF midpoint to ((sqrt(in) + sqrt(out)) / 2)^2.
        let mut rng = ScriptedRng::new(vec![0.0, 1.0, 0.5], 0.0);
        assert!((sample_orbital_radius(0.1, 30.0, &mut rng) - 0.1).abs() < 1e-12);
        assert!((sample_orbital_radius(0.1, 30.0, &mut rng) - 30.0).abs() < 1e-12);
        let mid = {
            let c = (0.1f64.sqrt() + 30.0f64.sqrt()) / 2.0;
            c * c
        };
        assert!((sample_orbital_radius(0.1, 30.0, &mut rng) - mid).abs() < 1e-12);
        assert_eq!(rng.consumed(), 3);
    }

    #[test]
    fn radius_sampling_prefers_inner_disk() {
        // Σ ∝ r^(-3/2): more than half of the draws should land inside
        // the geometric midpoint of the sqrt-r CDF.
        let mut rng = SimRng::from_seed(12);
        let midpoint = {
            let c = (0.1f64.sqrt() + 30.0f64.sqrt()) / 2.0;
            c * c
        };
        let inner = (0..2_000)
            .filter(|_| sample_orbital_radius(0.1, 30.0, &mut rng) < midpoint)
            .count();
        assert!((900..1100).contains(&inner), "CDF midpoint split was {inner}/2000");
    }

    #[test]
    fn composition_tracks_frost_line() {
        let ctx = solar_ctx();
        let mut rng = SimRng::from_seed(3);
        let cfg = DiskConfig::default();
        let frost = ctx.frost_line_au(cfg.stellar_luminosity);

        let bodies = initialize_disk(&cfg, &ctx, &mut rng).unwrap();
        for body in &bodies {
            let expected = Composition::for_orbit(body.orbit_au, frost);
            assert_eq!(body.composition, expected);
        }
    }

    #[test]
    fn ids_are_sequential() {
        let ctx = solar_ctx();
        let mut rng = SimRng::from_seed(3);
        let bodies = initialize_disk(&DiskConfig::default(), &ctx, &mut rng).unwrap();
        for (i, body) in bodies.iter().enumerate() {
            assert_eq!(body.id.0, i as u64);
        }
    }
}
