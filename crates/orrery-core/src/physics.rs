//! Physical constants as an explicit, immutable context value.
//!
//! Every simulation receives a [`PhysicsContext`] rather than reading
//! module-level singletons, keeping runs hermetic and trivially
//! parallelizable across independently configured worlds.

/// Physical constants used throughout the simulation, in SI units.
///
/// The `Default` impl carries CODATA/IAU values for a solar-type system.
/// Tests may substitute scaled values (e.g. `g = 1`) to make analytic
/// expectations exact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsContext {
    /// Gravitational constant, m^3 kg^-1 s^-2.
    pub g: f64,
    /// One astronomical unit, m.
    pub au_m: f64,
    /// Solar mass, kg.
    pub solar_mass_kg: f64,
    /// Solar radius, m.
    pub solar_radius_m: f64,
    /// Earth mass, kg.
    pub earth_mass_kg: f64,
    /// Earth radius, m.
    pub earth_radius_m: f64,
    /// Length of a Julian year, s.
    pub seconds_per_year: f64,
}

impl Default for PhysicsContext {
    fn default() -> Self {
        Self {
            g: 6.674_30e-11,
            au_m: 1.495_978_707e11,
            solar_mass_kg: 1.988_92e30,
            solar_radius_m: 6.957e8,
            earth_mass_kg: 5.972_2e24,
            earth_radius_m: 6.371e6,
            seconds_per_year: 3.155_76e7,
        }
    }
}

impl PhysicsContext {
    /// Orbital distance beyond which water ice condenses, in AU.
    ///
    /// Equilibrium temperature around a star of the given luminosity
    /// (in solar units) is `T(d) = 280 * L^(1/4) * d^(-1/2)` K; the frost
    /// line sits where `T` drops to 170 K, giving
    /// `d = (280 * L^(1/4) / 170)^2`. Roughly 2.7 AU for the Sun.
    pub fn frost_line_au(&self, luminosity_solar: f64) -> f64 {
        let t_ice = 280.0 * luminosity_solar.powf(0.25) / 170.0;
        t_ice * t_ice
    }

    /// Convert astronomical units to metres.
    pub fn au_to_m(&self, au: f64) -> f64 {
        au * self.au_m
    }

    /// Convert solar masses to kilograms.
    pub fn solar_masses_to_kg(&self, solar: f64) -> f64 {
        solar * self.solar_mass_kg
    }
}
