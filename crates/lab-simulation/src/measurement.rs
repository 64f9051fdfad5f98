//! Rolling-window measurement of discrete events
//!
//! A raw per-tick count is far too jittery to show on a meter, and a long
//! window alone lags behind the sliders. The aggregator does both: a windowed
//! count (or mean) followed by an exponential moving average.

use crate::{Event, EventKind};
use std::collections::VecDeque;

/// How the windowed events become the instantaneous value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateMode {
    /// `count * unit_scale / window_seconds`
    Rate,
    /// Mean event magnitude times `unit_scale`, 0 when the window is empty
    Mean,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementConfig {
    /// Only events of this kind are recorded
    pub kind: EventKind,
    pub mode: AggregateMode,
    pub window_ms: f64,
    pub unit_scale: f64,
    /// Weight of the previous smoothed value (0..1)
    pub alpha: f64,
}

impl MeasurementConfig {
    pub fn rate(kind: EventKind, window_ms: f64, unit_scale: f64) -> Self {
        Self {
            kind,
            mode: AggregateMode::Rate,
            window_ms,
            unit_scale,
            alpha: 0.9,
        }
    }

    pub fn mean(kind: EventKind, window_ms: f64) -> Self {
        Self {
            kind,
            mode: AggregateMode::Mean,
            window_ms,
            unit_scale: 1.0,
            alpha: 0.9,
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }
}

#[derive(Debug, Clone)]
pub struct MeasurementAggregator {
    config: MeasurementConfig,
    history: VecDeque<Event>,
    instantaneous: f64,
    smoothed: f64,
}

impl MeasurementAggregator {
    pub fn new(config: MeasurementConfig) -> Self {
        Self {
            config,
            history: VecDeque::new(),
            instantaneous: 0.0,
            smoothed: 0.0,
        }
    }

    /// Keep an event if it is the kind being measured
    pub fn record(&mut self, event: &Event) {
        if event.kind == self.config.kind {
            self.history.push_back(*event);
        }
    }

    /// Prune events that left the window, recompute, smooth.
    /// Returns the smoothed value.
    pub fn tick(&mut self, now: f64) -> f64 {
        let cutoff = now - self.config.window_ms;
        while self
            .history
            .front()
            .is_some_and(|event| event.timestamp <= cutoff)
        {
            self.history.pop_front();
        }

        let instantaneous = match self.config.mode {
            AggregateMode::Rate => {
                let window_s = self.config.window_ms / 1000.0;
                if window_s > 0.0 {
                    self.history.len() as f64 * self.config.unit_scale / window_s
                } else {
                    0.0
                }
            }
            AggregateMode::Mean => {
                let (sum, n) = self
                    .history
                    .iter()
                    .filter_map(|event| event.magnitude)
                    .fold((0.0, 0usize), |(sum, n), m| (sum + m, n + 1));
                if n > 0 {
                    sum / n as f64 * self.config.unit_scale
                } else {
                    0.0
                }
            }
        };

        self.instantaneous = if instantaneous.is_finite() { instantaneous } else { 0.0 };
        let alpha = self.config.alpha;
        self.smoothed = self.smoothed * alpha + self.instantaneous * (1.0 - alpha);
        self.smoothed
    }

    pub fn value(&self) -> f64 {
        self.smoothed
    }

    pub fn instantaneous(&self) -> f64 {
        self.instantaneous
    }

    /// Events currently inside the window
    pub fn history(&self) -> impl Iterator<Item = &Event> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn config(&self) -> &MeasurementConfig {
        &self.config
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.instantaneous = 0.0;
        self.smoothed = 0.0;
    }
}
