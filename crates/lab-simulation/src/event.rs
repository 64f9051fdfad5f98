//! Discrete, timestamped occurrences fed to the measurement

use glam::DVec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A particle left a continuous source
    Emitted,
    /// Inelastic collision or scattering; the particle keeps going
    Collision,
    /// Taken up by a surface without being counted
    Absorbed,
    /// Reached a detector or anode
    Detected,
    /// Per-tick observation (reticle reading, fringe position)
    Sample,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Host timestamp of the tick it happened in (ms)
    pub timestamp: f64,
    pub kind: EventKind,
    /// Where it happened, in scene units
    pub position: DVec2,
    /// Energy lost, charge measured, wavelength seen, ...
    pub magnitude: Option<f64>,
}

impl Event {
    pub fn new(kind: EventKind, timestamp: f64, position: DVec2) -> Self {
        Self {
            timestamp,
            kind,
            position,
            magnitude: None,
        }
    }

    pub fn with_magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = Some(magnitude);
        self
    }
}
