//! Frame timing for the external scheduler
//!
//! The host calls `tick` once per rendered frame with its own timestamp
//! (e.g. a `requestAnimationFrame` time). The clock turns those into a step
//! length, clamped so a long pause does not become one giant step.

/// One simulation step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Host timestamp of this tick (ms)
    pub now: f64,
    /// Simulated step length (s), already scaled
    pub dt: f64,
    /// Simulated time since the first tick (s)
    pub elapsed: f64,
    /// Tick counter, starting at 1
    pub tick: u64,
}

/// Largest accepted wall-clock to simulated time multiplier
pub const MAX_TIME_SCALE: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct SimulationClock {
    last: Option<f64>,
    elapsed: f64,
    ticks: u64,
    max_dt_ms: f64,
    time_scale: f64,
}

impl SimulationClock {
    pub fn new(max_dt_ms: f64, time_scale: f64) -> Self {
        Self {
            last: None,
            elapsed: 0.0,
            ticks: 0,
            max_dt_ms: max_dt_ms.max(0.0),
            time_scale: if time_scale.is_finite() {
                time_scale.clamp(0.0, MAX_TIME_SCALE)
            } else {
                1.0
            },
        }
    }

    /// Advance to `timestamp_ms`.
    ///
    /// The first tick, a timestamp going backwards and a non-finite
    /// timestamp all produce a zero-length step.
    pub fn advance(&mut self, timestamp_ms: f64) -> Step {
        let now = if timestamp_ms.is_finite() {
            timestamp_ms
        } else {
            self.last.unwrap_or(0.0)
        };

        let dt_ms = match self.last {
            Some(last) if now > last => (now - last).min(self.max_dt_ms),
            _ => 0.0,
        };
        if self.last.map_or(true, |last| now >= last) {
            self.last = Some(now);
        }

        let dt = dt_ms / 1000.0 * self.time_scale;
        self.elapsed += dt;
        self.ticks += 1;

        Step {
            now: self.last.unwrap_or(now),
            dt,
            elapsed: self.elapsed,
            tick: self.ticks,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn reset(&mut self) {
        self.last = None;
        self.elapsed = 0.0;
        self.ticks = 0;
    }
}
