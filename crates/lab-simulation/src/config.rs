//! Engine-wide configuration

/// Settings shared by every experiment
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Seed for the event stream and for the Brownian jitter stream
    pub seed: u64,
    /// Upper bound on simultaneously active particles
    pub max_particles: usize,
    /// Longest frame gap taken as one step (ms). Longer gaps, e.g. after a
    /// hidden tab resumes, are clamped to this
    pub max_dt_ms: f64,
    /// Multiplier from wall-clock to simulated time, at most `MAX_TIME_SCALE`
    pub time_scale: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED_1AB5,
            max_particles: 2000,
            max_dt_ms: 100.0,
            time_scale: 1.0,
        }
    }
}

impl SimulationConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_particles(mut self, max_particles: usize) -> Self {
        self.max_particles = max_particles;
        self
    }

    pub fn with_max_dt_ms(mut self, max_dt_ms: f64) -> Self {
        self.max_dt_ms = max_dt_ms;
        self
    }

    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = time_scale;
        self
    }
}
