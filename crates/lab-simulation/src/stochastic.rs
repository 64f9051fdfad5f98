//! Probabilistic event decisions and rate-limited spawning

use rand::Rng;

/// Decides whether a discrete event happens to an eligible particle this tick.
///
/// One uniform draw per eligible particle per tick, compared against
/// `base_probability * density`. Keeping it to a single draw makes the
/// expected event rate linear in the probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StochasticEventModel {
    pub base_probability: f64,
}

impl StochasticEventModel {
    pub const fn new(base_probability: f64) -> Self {
        Self { base_probability }
    }

    /// Per-tick probability for a density factor, clamped to 0..1
    pub fn probability(&self, density: f64) -> f64 {
        let p = self.base_probability * density;
        if p.is_finite() {
            p.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Draw for one particle. Ineligible particles consume no randomness.
    pub fn maybe_trigger<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        eligible: bool,
        density: f64,
    ) -> bool {
        if !eligible {
            return false;
        }
        let p = self.probability(density);
        rng.random::<f64>() < p
    }
}

/// Integer number of spawns for an expected (fractional) count.
///
/// The whole part is spawned outright and the remainder becomes one
/// Bernoulli draw, so the mean spawn rate follows `expected` continuously.
pub fn spawn_count<R: Rng + ?Sized>(expected: f64, rng: &mut R) -> u32 {
    if !(expected > 0.0) || !expected.is_finite() {
        return 0;
    }
    let whole = expected.floor();
    let extra = rng.random::<f64>() < expected - whole;
    whole as u32 + u32::from(extra)
}
