//! Deterministic [`RandomSource`] doubles for scripting exact outcomes.

use orrery_core::RandomSource;

/// Returns a fixed value for every `uniform()` draw and the
/// distribution mean for everything else.
///
/// `ForcedRng::new(0.0)` accepts every probabilistic collision test;
/// values just below 1.0 accept only saturated probabilities.
#[derive(Clone, Copy, Debug)]
pub struct ForcedRng {
    uniform_value: f64,
}

impl ForcedRng {
    /// Create a double whose `uniform()` always returns `value`.
    pub fn new(value: f64) -> Self {
        Self { uniform_value: value }
    }
}

impl RandomSource for ForcedRng {
    fn uniform(&mut self) -> f64 {
        self.uniform_value
    }

    fn normal(&mut self, mean: f64, _std_dev: f64) -> f64 {
        mean
    }

    fn log_normal(&mut self, mu: f64, _sigma: f64) -> f64 {
        mu.exp()
    }

    fn beta(&mut self, a: f64, b: f64) -> f64 {
        a / (a + b)
    }
}

/// Replays a scripted sequence of `uniform()` draws, then falls back to
/// a fixed value. Non-uniform draws return the distribution mean, as in
/// [`ForcedRng`].
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    script: Vec<f64>,
    next: usize,
    fallback: f64,
}

impl ScriptedRng {
    /// Create a double that replays `script` and then returns `fallback`.
    pub fn new(script: Vec<f64>, fallback: f64) -> Self {
        Self {
            script,
            next: 0,
            fallback,
        }
    }

    /// How many scripted draws have been consumed.
    pub fn consumed(&self) -> usize {
        self.next
    }
}

impl RandomSource for ScriptedRng {
    fn uniform(&mut self) -> f64 {
        match self.script.get(self.next) {
            Some(&v) => {
                self.next += 1;
                v
            }
            None => self.fallback,
        }
    }

    fn normal(&mut self, mean: f64, _std_dev: f64) -> f64 {
        mean
    }

    fn log_normal(&mut self, mu: f64, _sigma: f64) -> f64 {
        mu.exp()
    }

    fn beta(&mut self, a: f64, b: f64) -> f64 {
        a / (a + b)
    }
}
