//! Fixed-step RK4 integration of pairwise Newtonian gravity.

use nalgebra::Vector3;
use orrery_core::PhysicsContext;

use crate::body::CelestialBody;
use crate::error::SystemError;

/// Pairs closer than this are skipped when summing forces, so a
/// coincident pair degrades to zero mutual force instead of propagating
/// NaN through the step.
pub(crate) const MIN_SEPARATION_M: f64 = 1e-10;

/// Phase-space derivative of one body: position changes at `velocity`,
/// velocity changes at `acceleration`.
#[derive(Clone, Copy, Debug)]
struct Derivative {
    velocity: Vector3<f64>,
    acceleration: Vector3<f64>,
}

/// Point-in-time snapshot of the integrator.
#[derive(Clone, Debug)]
pub struct NBodyState {
    /// Bodies at the snapshot instant.
    pub bodies: Vec<CelestialBody>,
    /// Elapsed simulated time, s.
    pub time_s: f64,
}

/// An N-body gravitational system advanced by classical RK4.
///
/// Each [`step`](NBodySystem::step) evaluates the O(N^2) all-pairs force
/// sum at four stages and combines them with the (1, 2, 2, 1)/6 tableau
/// weights for both position and velocity. Stepping is caller-driven;
/// there is no implicit termination.
#[derive(Clone, Debug)]
pub struct NBodySystem {
    bodies: Vec<CelestialBody>,
    time_s: f64,
    ctx: PhysicsContext,
    next_id: u64,
}

impl NBodySystem {
    /// Create a system from an initial body list.
    ///
    /// # Errors
    ///
    /// Rejects bodies with non-positive mass or radius; invalid input is
    /// a contract violation caught here rather than inside the hot loop.
    pub fn new(bodies: Vec<CelestialBody>, ctx: &PhysicsContext) -> Result<Self, SystemError> {
        for body in &bodies {
            if !body.mass_kg.is_finite() || body.mass_kg <= 0.0 {
                return Err(SystemError::NonPositiveMass {
                    value: body.mass_kg,
                });
            }
            if !body.radius_m.is_finite() || body.radius_m <= 0.0 {
                return Err(SystemError::NonPositiveRadius {
                    value: body.radius_m,
                });
            }
        }
        let next_id = bodies.iter().map(|b| b.id.0 + 1).max().unwrap_or(0);
        Ok(Self {
            bodies,
            time_s: 0.0,
            ctx: *ctx,
            next_id,
        })
    }

    /// The bodies in simulation order.
    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    /// Elapsed simulated time, s.
    pub fn time_s(&self) -> f64 {
        self.time_s
    }

    /// The physics context this system was built with.
    pub fn context(&self) -> &PhysicsContext {
        &self.ctx
    }

    /// Value-type snapshot of the current state.
    pub fn snapshot(&self) -> NBodyState {
        NBodyState {
            bodies: self.bodies.clone(),
            time_s: self.time_s,
        }
    }

    /// Allocate a fresh body id (used by merges).
    pub(crate) fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut Vec<CelestialBody> {
        &mut self.bodies
    }

    /// Advance the system by `dt_s` seconds with one RK4 step.
    pub fn step(&mut self, dt_s: f64) {
        let k1 = derivatives(&self.bodies, self.ctx.g);
        let stage2 = advanced(&self.bodies, &k1, dt_s / 2.0);
        let k2 = derivatives(&stage2, self.ctx.g);
        let stage3 = advanced(&self.bodies, &k2, dt_s / 2.0);
        let k3 = derivatives(&stage3, self.ctx.g);
        let stage4 = advanced(&self.bodies, &k3, dt_s);
        let k4 = derivatives(&stage4, self.ctx.g);

        for (i, body) in self.bodies.iter_mut().enumerate() {
            let d_pos = (k1[i].velocity + 2.0 * (k2[i].velocity + k3[i].velocity) + k4[i].velocity)
                * (dt_s / 6.0);
            let d_vel = (k1[i].acceleration
                + 2.0 * (k2[i].acceleration + k3[i].acceleration)
                + k4[i].acceleration)
                * (dt_s / 6.0);
            body.position_m += d_pos;
            body.velocity_mps += d_vel;
        }
        self.time_s += dt_s;
    }
}

/// Phase-space derivatives of every body: velocity, plus the summed
/// gravitational acceleration `G * m_j * (r_j - r_i) / |r_j - r_i|^3`
/// over all other bodies.
fn derivatives(bodies: &[CelestialBody], g: f64) -> Vec<Derivative> {
    bodies
        .iter()
        .enumerate()
        .map(|(i, body)| {
            let mut acceleration = Vector3::zeros();
            for (j, other) in bodies.iter().enumerate() {
                if i == j {
                    continue;
                }
                let r = other.position_m - body.position_m;
                let dist = r.norm();
                if dist < MIN_SEPARATION_M {
                    continue;
                }
                acceleration += r * (g * other.mass_kg / (dist * dist * dist));
            }
            Derivative {
                velocity: body.velocity_mps,
                acceleration,
            }
        })
        .collect()
}

/// Bodies advanced from `base` by Euler substep `dt` along `derivs`;
/// the intermediate stage states of the RK4 tableau.
fn advanced(base: &[CelestialBody], derivs: &[Derivative], dt_s: f64) -> Vec<CelestialBody> {
    base.iter()
        .zip(derivs)
        .map(|(body, d)| CelestialBody {
            position_m: body.position_m + d.velocity * dt_s,
            velocity_mps: body.velocity_mps + d.acceleration * dt_s,
            ..body.clone()
        })
        .collect()
}
