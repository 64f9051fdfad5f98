//! Per-experiment force models and the Brownian jitter term

use crate::Params;
use glam::DVec2;
use lab_physics::Particle;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Result of evaluating a force model on one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceResponse {
    /// Steady-state velocity for this tick (scene units / s)
    pub velocity: DVec2,
    /// Updated scalar property (energy along the gap, charge, wavelength)
    pub derived: f64,
}

impl ForceResponse {
    pub fn new(velocity: DVec2, derived: f64) -> Self {
        Self { velocity, derived }
    }

    /// Keep moving as before with the scalar unchanged
    pub fn free_flight(particle: &Particle) -> Self {
        Self::new(particle.velocity, particle.scalar)
    }
}

/// Maps a particle's state and the current parameters to its velocity.
///
/// Implementations solve for the terminal velocity every tick (see
/// [`lab_physics::terminal_velocity`]) rather than integrating an
/// acceleration, and must be deterministic: any randomness belongs in
/// [`Jitter`].
pub trait ForceModel {
    fn evaluate(&self, particle: &Particle, params: &Params, dt: f64) -> ForceResponse;
}

/// Brownian displacement, drawn from its own seeded stream so the
/// deterministic part of the model and the event stream stay reproducible
/// on their own.
#[derive(Debug, Clone)]
pub struct Jitter {
    rng: StdRng,
}

impl Jitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Random displacement for a diffusion amplitude `sqrt(2D)` over `dt`
    /// seconds. Zero when either is not positive.
    pub fn offset(&mut self, amplitude: f64, dt: f64) -> DVec2 {
        if !(amplitude > 0.0 && dt > 0.0) || !amplitude.is_finite() {
            return DVec2::ZERO;
        }
        let sigma = amplitude * dt.sqrt();
        let x: f64 = self.rng.sample(StandardNormal);
        let y: f64 = self.rng.sample(StandardNormal);
        DVec2::new(x, y) * sigma
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jitter_zero_amplitude() {
        let mut jitter = Jitter::new(1);
        assert_eq!(jitter.offset(0.0, 0.016), DVec2::ZERO);
        assert_eq!(jitter.offset(1.0, 0.0), DVec2::ZERO);
        assert_eq!(jitter.offset(f64::NAN, 0.016), DVec2::ZERO);
    }

    #[test]
    fn test_jitter_is_seeded() {
        let mut a = Jitter::new(7);
        let mut b = Jitter::new(7);
        for _ in 0..10 {
            assert_eq!(a.offset(1.0, 0.01), b.offset(1.0, 0.01));
        }
    }

    #[test]
    fn test_jitter_spread_scales_with_sqrt_dt() {
        let mut jitter = Jitter::new(3);
        let n = 4000;
        let mean_sq = |jitter: &mut Jitter, dt: f64| {
            (0..n).map(|_| jitter.offset(1.0, dt).x.powi(2)).sum::<f64>() / n as f64
        };
        let short = mean_sq(&mut jitter, 0.01);
        let long = mean_sq(&mut jitter, 0.04);
        // variance is amplitude² dt
        assert!((short - 0.01).abs() < 0.002, "{short}");
        assert!((long - 0.04).abs() < 0.008, "{long}");
    }
}
