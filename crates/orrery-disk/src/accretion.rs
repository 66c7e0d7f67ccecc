//! Monte Carlo accretion loop.
//!
//! Iteratively grows a protoplanet population into a small set of stable
//! bodies: probabilistic collision detection via Hill-sphere overlap,
//! mass/momentum/composition-conserving merges, Gaussian eccentricity
//! stirring, and an adjacent-pair spacing test for long-term stability.
//!
//! Merges are resolved atomically at the end of each iteration: the
//! collision pass records pending pairs against an explicit claimed set
//! (each body participates in at most one merge per iteration), then the
//! body vector is rebuilt once — survivors in order, merged bodies
//! appended in pair order. This keeps the run bit-deterministic for a
//! given seed and configuration.

use std::error::Error;
use std::fmt;

use indexmap::IndexSet;
use orrery_core::{BodyId, PhysicsContext, RandomSource};

use crate::composition::Composition;
use crate::protoplanet::Protoplanet;

/// Configuration for one accretion run.
///
/// The damping, cap, stirring, and spacing values are empirical tuning
/// constants, not physical law; they default to the values the formation
/// model was calibrated with.
#[derive(Clone, Debug)]
pub struct AccretionConfig {
    /// Central star mass in solar masses. Must be positive.
    pub star_mass_solar: f64,
    /// Iteration cap; doubles as the step budget for partial results.
    pub max_iterations: u64,
    /// Simulated years per iteration. Must be positive.
    pub time_step_years: f64,
    /// Post-merge eccentricity damping factor (collisions circularize).
    /// Must lie in `(0, 1]`. Default 0.7.
    pub eccentricity_damping: f64,
    /// Upper bound on post-merge eccentricity. Must lie in `(0, 1)`.
    /// Default 0.3.
    pub eccentricity_cap: f64,
    /// Stirring noise scale: each iteration adds
    /// `N(0, stirring_scale * dt / 1000 yr)` to every eccentricity.
    /// Must be non-negative. Default 0.001.
    pub stirring_scale: f64,
    /// Clamp applied to stirred eccentricities. Must lie in `(0, 1)`.
    /// Default 0.5.
    pub stirring_ecc_max: f64,
    /// Stability requires adjacent orbits separated by at least this many
    /// combined Hill radii. Must be positive. Default 3.0.
    pub stability_spacing_factor: f64,
    /// Stability is only tested once the population shrinks below this
    /// count. Default 20.
    pub stability_max_bodies: usize,
    /// Stability is only tested after this many iterations, giving the
    /// stirring random-walk time to act. Default 1000.
    pub stability_min_iterations: u64,
}

impl Default for AccretionConfig {
    fn default() -> Self {
        Self {
            star_mass_solar: 1.0,
            max_iterations: 10_000,
            time_step_years: 1_000.0,
            eccentricity_damping: 0.7,
            eccentricity_cap: 0.3,
            stirring_scale: 0.001,
            stirring_ecc_max: 0.5,
            stability_spacing_factor: 3.0,
            stability_max_bodies: 20,
            stability_min_iterations: 1_000,
        }
    }
}

impl AccretionConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), AccretionError> {
        if !self.star_mass_solar.is_finite() || self.star_mass_solar <= 0.0 {
            return Err(AccretionError::NonPositiveStarMass {
                value: self.star_mass_solar,
            });
        }
        if !self.time_step_years.is_finite() || self.time_step_years <= 0.0 {
            return Err(AccretionError::NonPositiveTimeStep {
                value: self.time_step_years,
            });
        }
        if !self.eccentricity_damping.is_finite()
            || self.eccentricity_damping <= 0.0
            || self.eccentricity_damping > 1.0
        {
            return Err(AccretionError::InvalidTuning {
                parameter: "eccentricity_damping",
                value: self.eccentricity_damping,
            });
        }
        if !self.eccentricity_cap.is_finite()
            || self.eccentricity_cap <= 0.0
            || self.eccentricity_cap >= 1.0
        {
            return Err(AccretionError::InvalidTuning {
                parameter: "eccentricity_cap",
                value: self.eccentricity_cap,
            });
        }
        if !self.stirring_scale.is_finite() || self.stirring_scale < 0.0 {
            return Err(AccretionError::InvalidTuning {
                parameter: "stirring_scale",
                value: self.stirring_scale,
            });
        }
        if !self.stirring_ecc_max.is_finite()
            || self.stirring_ecc_max <= 0.0
            || self.stirring_ecc_max >= 1.0
        {
            return Err(AccretionError::InvalidTuning {
                parameter: "stirring_ecc_max",
                value: self.stirring_ecc_max,
            });
        }
        if !self.stability_spacing_factor.is_finite() || self.stability_spacing_factor <= 0.0 {
            return Err(AccretionError::InvalidTuning {
                parameter: "stability_spacing_factor",
                value: self.stability_spacing_factor,
            });
        }
        Ok(())
    }
}

/// Errors detected during [`AccretionConfig::validate`].
#[derive(Clone, Debug, PartialEq)]
pub enum AccretionError {
    /// Star mass is zero, negative, or non-finite.
    NonPositiveStarMass {
        /// The offending value.
        value: f64,
    },
    /// Time step is zero, negative, or non-finite.
    NonPositiveTimeStep {
        /// The offending value.
        value: f64,
    },
    /// An empirical tuning parameter is out of range.
    InvalidTuning {
        /// Which parameter.
        parameter: &'static str,
        /// The offending value.
        value: f64,
    },
}

impl fmt::Display for AccretionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveStarMass { value } => {
                write!(f, "star mass must be positive, got {value}")
            }
            Self::NonPositiveTimeStep { value } => {
                write!(f, "time step must be positive, got {value}")
            }
            Self::InvalidTuning { parameter, value } => {
                write!(f, "tuning parameter {parameter} out of range: {value}")
            }
        }
    }
}

impl Error for AccretionError {}

/// Why an accretion run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Every adjacent orbital pair satisfied the spacing rule.
    Stable,
    /// Fewer than two bodies remained; nothing left to collide.
    BodiesExhausted,
    /// The iteration cap was reached. Not an error: the returned state is
    /// the best-effort partial result.
    IterationCap,
}

/// Terminal snapshot of one accretion run.
#[derive(Clone, Debug)]
pub struct AccretionResult {
    /// Surviving bodies, in simulation order.
    pub bodies: Vec<Protoplanet>,
    /// Total number of merge events.
    pub collisions: u32,
    /// Elapsed simulated time, years.
    pub time_years: f64,
    /// Number of iterations executed.
    pub iterations: u64,
    /// Why the run stopped.
    pub stop_reason: StopReason,
}

impl AccretionResult {
    /// Total mass of the surviving bodies, kg.
    pub fn total_mass_kg(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass_kg).sum()
    }
}

/// Run the Monte Carlo accretion loop over an initial population.
///
/// Each iteration advances simulated time, performs one collision pass,
/// resolves all accepted merges atomically, stirs eccentricities, and
/// tests for stability once the population is small and old enough.
/// Non-convergence is not an error; the state at the iteration cap is
/// returned with [`StopReason::IterationCap`].
///
/// # Errors
///
/// Returns an [`AccretionError`] if the configuration violates its
/// contract. The loop itself never fails.
pub fn simulate(
    config: &AccretionConfig,
    ctx: &PhysicsContext,
    initial: Vec<Protoplanet>,
    rng: &mut dyn RandomSource,
) -> Result<AccretionResult, AccretionError> {
    config.validate()?;

    let star_mass_kg = ctx.solar_masses_to_kg(config.star_mass_solar);
    let dt = config.time_step_years;

    let mut bodies = initial;
    let mut next_id = bodies.iter().map(|b| b.id.0 + 1).max().unwrap_or(0);
    let mut collisions: u32 = 0;
    let mut time_years = 0.0;
    let mut iterations = 0;
    let mut stop_reason = StopReason::IterationCap;

    for iter in 0..config.max_iterations {
        if bodies.len() < 2 {
            stop_reason = StopReason::BodiesExhausted;
            break;
        }
        time_years += dt;
        iterations = iter + 1;

        let (pending, claimed) = collision_pass(&bodies, star_mass_kg, rng);
        if !pending.is_empty() {
            bodies = resolve_merges(bodies, &pending, &claimed, config, &mut next_id);
            collisions += pending.len() as u32;
        }

        stir_orbits(&mut bodies, config, dt, rng);

        if bodies.len() < config.stability_max_bodies
            && iter > config.stability_min_iterations
            && is_stable(&bodies, star_mass_kg, config.stability_spacing_factor)
        {
            stop_reason = StopReason::Stable;
            break;
        }
    }

    Ok(AccretionResult {
        bodies,
        collisions,
        time_years,
        iterations,
        stop_reason,
    })
}

/// Probabilistic collision test for one pair.
///
/// If the orbital separation is inside the combined Hill radii, the pair
/// collides with probability `min(1, combined / separation)`; coincident
/// orbits always collide.
fn collision_accepted(
    a: &Protoplanet,
    b: &Protoplanet,
    star_mass_kg: f64,
    rng: &mut dyn RandomSource,
) -> bool {
    let combined = a.hill_radius_au(star_mass_kg) + b.hill_radius_au(star_mass_kg);
    let separation = (a.orbit_au - b.orbit_au).abs();
    if separation >= combined {
        return false;
    }
    let p = if separation <= f64::EPSILON {
        1.0
    } else {
        (combined / separation).min(1.0)
    };
    rng.uniform() < p
}

/// One collision scan over all pairs.
///
/// Returns the accepted pairs (by index) and the claimed index set. A
/// claimed index never appears in a later pair, enforcing at most one
/// merge per body per iteration; the scan order (i ascending, then j) is
/// part of the determinism contract.
fn collision_pass(
    bodies: &[Protoplanet],
    star_mass_kg: f64,
    rng: &mut dyn RandomSource,
) -> (Vec<(usize, usize)>, IndexSet<usize>) {
    let mut pending = Vec::new();
    let mut claimed = IndexSet::new();

    for i in 0..bodies.len() {
        if claimed.contains(&i) {
            continue;
        }
        for j in (i + 1)..bodies.len() {
            if claimed.contains(&j) {
                continue;
            }
            if collision_accepted(&bodies[i], &bodies[j], star_mass_kg, rng) {
                claimed.insert(i);
                claimed.insert(j);
                pending.push((i, j));
                break;
            }
        }
    }

    (pending, claimed)
}

/// Merge two protoplanets into one.
///
/// Mass sums; orbit and eccentricity are mass-weighted averages, the
/// eccentricity additionally damped and capped (collisions circularize);
/// composition is the mass-weighted mix. The phase of the heavier
/// constituent carries over.
fn merge(a: &Protoplanet, b: &Protoplanet, config: &AccretionConfig, id: BodyId) -> Protoplanet {
    let total_mass = a.mass_kg + b.mass_kg;
    let orbit_au = (a.orbit_au * a.mass_kg + b.orbit_au * b.mass_kg) / total_mass;
    let eccentricity = ((a.eccentricity * a.mass_kg + b.eccentricity * b.mass_kg) / total_mass
        * config.eccentricity_damping)
        .min(config.eccentricity_cap);
    let phase = if a.mass_kg >= b.mass_kg { a.phase } else { b.phase };

    Protoplanet {
        id,
        mass_kg: total_mass,
        orbit_au,
        eccentricity,
        phase,
        composition: Composition::mixed(&a.composition, a.mass_kg, &b.composition, b.mass_kg),
    }
}

/// Rebuild the body vector once, applying all pending merges atomically.
fn resolve_merges(
    bodies: Vec<Protoplanet>,
    pending: &[(usize, usize)],
    claimed: &IndexSet<usize>,
    config: &AccretionConfig,
    next_id: &mut u64,
) -> Vec<Protoplanet> {
    let mut next = Vec::with_capacity(bodies.len() - pending.len());
    for (idx, body) in bodies.iter().enumerate() {
        if !claimed.contains(&idx) {
            next.push(body.clone());
        }
    }
    for &(i, j) in pending {
        next.push(merge(&bodies[i], &bodies[j], config, BodyId(*next_id)));
        *next_id += 1;
    }
    next
}

/// Gravitational stirring: a Gaussian random walk in eccentricity.
///
/// A cheap stand-in for mutual scattering that avoids an N^2 force
/// evaluation while the population is still large.
fn stir_orbits(
    bodies: &mut [Protoplanet],
    config: &AccretionConfig,
    dt_years: f64,
    rng: &mut dyn RandomSource,
) {
    let sigma = config.stirring_scale * dt_years / 1_000.0;
    for body in bodies.iter_mut() {
        let delta = rng.normal(0.0, sigma);
        body.eccentricity = (body.eccentricity + delta).clamp(0.0, config.stirring_ecc_max);
    }
}

/// Long-term stability test: every adjacent orbital pair must be
/// separated by at least `spacing_factor` combined Hill radii.
fn is_stable(bodies: &[Protoplanet], star_mass_kg: f64, spacing_factor: f64) -> bool {
    let mut order: Vec<usize> = (0..bodies.len()).collect();
    order.sort_by(|&a, &b| bodies[a].orbit_au.total_cmp(&bodies[b].orbit_au));

    for pair in order.windows(2) {
        let (a, b) = (&bodies[pair[0]], &bodies[pair[1]]);
        let separation = b.orbit_au - a.orbit_au;
        let combined = a.hill_radius_au(star_mass_kg) + b.hill_radius_au(star_mass_kg);
        if separation < spacing_factor * combined {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::SimRng;
    use orrery_test_utils::ForcedRng;

    fn proto(id: u64, mass_kg: f64, orbit_au: f64, eccentricity: f64) -> Protoplanet {
        Protoplanet {
            id: BodyId(id),
            mass_kg,
            orbit_au,
            eccentricity,
            phase: 0.0,
            composition: Composition { rock: 0.7, ice: 0.2, gas: 0.1 },
        }
    }

    fn ctx() -> PhysicsContext {
        PhysicsContext::default()
    }

    // ---------------------------------------------------------------
    // Config validation
    // ---------------------------------------------------------------

    #[test]
    fn validate_default_succeeds() {
        assert!(AccretionConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_star_mass() {
        let cfg = AccretionConfig {
            star_mass_solar: 0.0,
            ..AccretionConfig::default()
        };
        match cfg.validate() {
            Err(AccretionError::NonPositiveStarMass { .. }) => {}
            other => panic!("expected NonPositiveStarMass, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_nan_time_step() {
        let cfg = AccretionConfig {
            time_step_years: f64::NAN,
            ..AccretionConfig::default()
        };
        match cfg.validate() {
            Err(AccretionError::NonPositiveTimeStep { .. }) => {}
            other => panic!("expected NonPositiveTimeStep, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_damping_above_one() {
        let cfg = AccretionConfig {
            eccentricity_damping: 1.5,
            ..AccretionConfig::default()
        };
        match cfg.validate() {
            Err(AccretionError::InvalidTuning { parameter, .. }) => {
                assert_eq!(parameter, "eccentricity_damping");
            }
            other => panic!("expected InvalidTuning, got {other:?}"),
        }
    }

    // ---------------------------------------------------------------
    // Merge semantics
    // ---------------------------------------------------------------

    #[test]
    fn merge_conserves_mass_and_mass_weights_orbit() {
        let a = proto(0, 2.0e24, 1.0, 0.1);
        let b = proto(1, 1.0e24, 4.0, 0.1);
        let merged = merge(&a, &b, &AccretionConfig::default(), BodyId(2));

        assert_eq!(merged.mass_kg, 3.0e24);
        // (1.0 * 2 + 4.0 * 1) / 3 = 2.0
        assert!((merged.orbit_au - 2.0).abs() < 1e-12);
        assert_eq!(merged.id, BodyId(2));
    }

    #[test]
    fn merge_damps_and_caps_eccentricity() {
        let cfg = AccretionConfig::default();
        let a = proto(0, 1.0e24, 1.0, 0.2);
        let b = proto(1, 1.0e24, 1.1, 0.2);
        let merged = merge(&a, &b, &cfg, BodyId(2));
        // Mass-weighted mean 0.2, damped by 0.7.
        assert!((merged.eccentricity - 0.14).abs() < 1e-12);

        let hot_a = proto(0, 1.0e24, 1.0, 0.9);
        let hot_b = proto(1, 1.0e24, 1.1, 0.9);
        let capped = merge(&hot_a, &hot_b, &cfg, BodyId(2));
        assert_eq!(capped.eccentricity, cfg.eccentricity_cap);
    }

    #[test]
    fn merge_keeps_composition_normalized() {
        let mut a = proto(0, 3.0e24, 0.5, 0.0);
        a.composition = Composition { rock: 0.95, ice: 0.0, gas: 0.05 };
        let mut b = proto(1, 1.0e24, 6.0, 0.0);
        b.composition = Composition { rock: 0.1, ice: 0.2, gas: 0.7 };

        let merged = merge(&a, &b, &AccretionConfig::default(), BodyId(2));
        assert!(merged.composition.is_normalized(1e-6));
    }

    // ---------------------------------------------------------------
    // Collision pass
    // ---------------------------------------------------------------

    #[test]
    fn forced_rng_merges_overlapping_pair() {
        // Two massive bodies on nearly identical orbits: Hill spheres
        // overlap, and a forced-zero uniform accepts every draw.
        let a = proto(0, 1.0e27, 1.00, 0.05);
        let b = proto(1, 2.0e27, 1.01, 0.05);
        let mut rng = ForcedRng::new(0.0);

        let cfg = AccretionConfig {
            max_iterations: 1,
            ..AccretionConfig::default()
        };
        let result = simulate(&cfg, &ctx(), vec![a.clone(), b.clone()], &mut rng).unwrap();

        assert_eq!(result.bodies.len(), 1);
        assert_eq!(result.collisions, 1);
        let merged = &result.bodies[0];
        assert_eq!(merged.mass_kg, a.mass_kg + b.mass_kg);
        let expected_orbit =
            (a.orbit_au * a.mass_kg + b.orbit_au * b.mass_kg) / (a.mass_kg + b.mass_kg);
        assert!((merged.orbit_au - expected_orbit).abs() < 1e-12);
    }

    #[test]
    fn distant_pair_never_collides() {
        let a = proto(0, 1.0e24, 0.5, 0.0);
        let b = proto(1, 1.0e24, 20.0, 0.0);
        let mut rng = ForcedRng::new(0.0); // would accept if tested
        let (pending, claimed) = collision_pass(
            &[a, b],
            PhysicsContext::default().solar_mass_kg,
            &mut rng,
        );
        assert!(pending.is_empty());
        assert!(claimed.is_empty());
    }

    #[test]
    fn each_body_merges_at_most_once_per_iteration() {
        // Three bodies all inside one another's Hill spheres: the scan
        // must pair (0,1) and leave 2 unclaimed, not chain-merge.
        let bodies = vec![
            proto(0, 1.0e27, 1.000, 0.0),
            proto(1, 1.0e27, 1.001, 0.0),
            proto(2, 1.0e27, 1.002, 0.0),
        ];
        let mut rng = ForcedRng::new(0.0);
        let (pending, claimed) = collision_pass(
            &bodies,
            PhysicsContext::default().solar_mass_kg,
            &mut rng,
        );
        assert_eq!(pending, vec![(0, 1)]);
        assert!(claimed.contains(&0) && claimed.contains(&1));
        assert!(!claimed.contains(&2));
    }

    #[test]
    fn coincident_orbits_always_collide() {
        let a = proto(0, 1.0e27, 1.0, 0.0);
        let b = proto(1, 1.0e27, 1.0, 0.0);
        // Uniform forced just below 1.0: only a saturated probability
        // accepts.
        let mut rng = ForcedRng::new(0.999_999);
        assert!(collision_accepted(
            &a,
            &b,
            PhysicsContext::default().solar_mass_kg,
            &mut rng
        ));
    }

    // ---------------------------------------------------------------
    // Stability predicate
    // ---------------------------------------------------------------

    #[test]
    fn well_spaced_system_is_stable() {
        let star = PhysicsContext::default().solar_mass_kg;
        let bodies = vec![
            proto(0, 5.0e24, 0.5, 0.0),
            proto(1, 5.0e24, 2.0, 0.0),
            proto(2, 5.0e24, 8.0, 0.0),
        ];
        assert!(is_stable(&bodies, star, 3.0));
    }

    #[test]
    fn one_tight_pair_breaks_stability() {
        let star = PhysicsContext::default().solar_mass_kg;
        let bodies = vec![
            proto(0, 5.0e24, 0.5, 0.0),
            proto(1, 1.0e27, 2.000, 0.0),
            proto(2, 1.0e27, 2.001, 0.0), // far inside 3 combined Hill radii
        ];
        assert!(!is_stable(&bodies, star, 3.0));
    }

    #[test]
    fn stability_sorts_by_orbit_first() {
        // Same system, shuffled order: the predicate must sort before
        // testing adjacency.
        let star = PhysicsContext::default().solar_mass_kg;
        let bodies = vec![
            proto(0, 5.0e24, 8.0, 0.0),
            proto(1, 5.0e24, 0.5, 0.0),
            proto(2, 5.0e24, 2.0, 0.0),
        ];
        assert!(is_stable(&bodies, star, 3.0));
    }

    // ---------------------------------------------------------------
    // Loop behaviour
    // ---------------------------------------------------------------

    #[test]
    fn empty_population_stops_immediately() {
        let mut rng = SimRng::from_seed(1);
        let result = simulate(&AccretionConfig::default(), &ctx(), vec![], &mut rng).unwrap();
        assert_eq!(result.stop_reason, StopReason::BodiesExhausted);
        assert_eq!(result.collisions, 0);
        assert_eq!(result.time_years, 0.0);
    }

    #[test]
    fn single_body_stops_immediately() {
        let mut rng = SimRng::from_seed(1);
        let result = simulate(
            &AccretionConfig::default(),
            &ctx(),
            vec![proto(0, 1.0e24, 1.0, 0.0)],
            &mut rng,
        )
        .unwrap();
        assert_eq!(result.stop_reason, StopReason::BodiesExhausted);
        assert_eq!(result.bodies.len(), 1);
    }

    #[test]
    fn iteration_cap_returns_partial_result() {
        let cfg = AccretionConfig {
            max_iterations: 5,
            ..AccretionConfig::default()
        };
        let bodies = vec![proto(0, 1.0e24, 0.5, 0.0), proto(1, 1.0e24, 20.0, 0.0)];
        let mut rng = SimRng::from_seed(1);
        let result = simulate(&cfg, &ctx(), bodies, &mut rng).unwrap();
        assert_eq!(result.stop_reason, StopReason::IterationCap);
        assert_eq!(result.iterations, 5);
        assert_eq!(result.time_years, 5.0 * cfg.time_step_years);
        assert_eq!(result.bodies.len(), 2);
    }

    #[test]
    fn total_mass_is_conserved_through_a_run() {
        let bodies: Vec<Protoplanet> = (0..12)
            .map(|i| proto(i, 1.0e26, 1.0 + i as f64 * 0.002, 0.01))
            .collect();
        let before: f64 = bodies.iter().map(|b| b.mass_kg).sum();

        let cfg = AccretionConfig {
            max_iterations: 200,
            ..AccretionConfig::default()
        };
        let mut rng = SimRng::from_seed(99);
        let result = simulate(&cfg, &ctx(), bodies, &mut rng).unwrap();

        assert!(result.collisions > 0, "tightly packed bodies should merge");
        let after = result.total_mass_kg();
        assert!(
            ((after - before) / before).abs() < 1e-12,
            "mass drifted: before={before}, after={after}"
        );
    }

    #[test]
    fn merged_bodies_get_fresh_ids() {
        let bodies = vec![proto(0, 1.0e27, 1.00, 0.0), proto(1, 1.0e27, 1.01, 0.0)];
        let cfg = AccretionConfig {
            max_iterations: 1,
            ..AccretionConfig::default()
        };
        let mut rng = ForcedRng::new(0.0);
        let result = simulate(&cfg, &ctx(), bodies, &mut rng).unwrap();
        assert_eq!(result.bodies[0].id, BodyId(2));
    }
}
