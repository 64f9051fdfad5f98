//! A draw adapter that writes to the log instead of a window

use lab_simulation::{DrawAdapter, EventKind, RenderSnapshot};
use std::collections::HashMap;

pub struct LogAdapter {
    every: u64,
    totals: HashMap<EventKind, u64>,
    peak_particles: usize,
}

impl LogAdapter {
    pub fn new(every: u64) -> Self {
        Self {
            every,
            totals: HashMap::new(),
            peak_particles: 0,
        }
    }

    pub fn total(&self, kind: EventKind) -> u64 {
        self.totals.get(&kind).copied().unwrap_or(0)
    }

    pub fn summary(&self, measured: EventKind, measurement: f64) {
        log::info!(
            "Done: emitted={} collisions={} absorbed={} detected={} samples={} peak particles={}",
            self.total(EventKind::Emitted),
            self.total(EventKind::Collision),
            self.total(EventKind::Absorbed),
            self.total(EventKind::Detected),
            self.total(EventKind::Sample),
            self.peak_particles
        );
        log::info!("Final measurement ({measured:?}): {measurement:.4}");
    }
}

impl DrawAdapter for LogAdapter {
    fn draw(&mut self, snapshot: &RenderSnapshot) {
        for event in &snapshot.events {
            *self.totals.entry(event.kind).or_insert(0) += 1;
        }
        self.peak_particles = self.peak_particles.max(snapshot.particles.len());

        if self.every == 0 || snapshot.tick % self.every != 0 {
            return;
        }

        let readouts = snapshot
            .display
            .iter()
            .map(|d| format!("{}={:.3}{}", d.key, d.value, d.unit))
            .collect::<Vec<_>>()
            .join(" ");
        log::info!(
            "[{:>6}] t={:>8.0}ms particles={:<5} measurement={:.4} (raw {:.4}) {}",
            snapshot.tick,
            snapshot.time_ms,
            snapshot.particles.len(),
            snapshot.measurement,
            snapshot.instantaneous,
            readouts
        );
    }
}
