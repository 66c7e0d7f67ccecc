//! Bulk composition of accreting bodies.

/// Mass fractions of the three bulk components, summing to ~1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Composition {
    /// Silicate/metal fraction.
    pub rock: f64,
    /// Volatile-ice fraction.
    pub ice: f64,
    /// H/He envelope fraction.
    pub gas: f64,
}

impl Composition {
    /// Composition as a step function of orbital radius relative to the
    /// frost line.
    ///
    /// Inside half the frost line only refractories condense; between
    /// 1x and 3x ices dominate; beyond that bodies hold on to gas.
    pub fn for_orbit(orbit_au: f64, frost_line_au: f64) -> Self {
        if orbit_au < frost_line_au * 0.5 {
            Self { rock: 0.95, ice: 0.0, gas: 0.05 }
        } else if orbit_au < frost_line_au {
            Self { rock: 0.7, ice: 0.2, gas: 0.1 }
        } else if orbit_au < frost_line_au * 3.0 {
            Self { rock: 0.3, ice: 0.5, gas: 0.2 }
        } else {
            Self { rock: 0.1, ice: 0.2, gas: 0.7 }
        }
    }

    /// Mass-weighted mix of two compositions.
    ///
    /// If both inputs sum to 1, the mix does too (within FP tolerance);
    /// this is what keeps merges composition-conserving.
    pub fn mixed(a: &Self, mass_a: f64, b: &Self, mass_b: f64) -> Self {
        let total = mass_a + mass_b;
        Self {
            rock: (a.rock * mass_a + b.rock * mass_b) / total,
            ice: (a.ice * mass_a + b.ice * mass_b) / total,
            gas: (a.gas * mass_a + b.gas * mass_b) / total,
        }
    }

    /// Sum of the three fractions.
    pub fn sum(&self) -> f64 {
        self.rock + self.ice + self.gas
    }

    /// Whether the fractions sum to 1 within `tolerance`.
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.sum() - 1.0).abs() <= tolerance
    }
}
