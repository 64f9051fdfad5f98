//! The frame-driven simulation loop
//!
//! One [`Simulation`] runs one experiment. The host calls [`Simulation::tick`]
//! once per frame; parameter writes and one-shot fires made between frames
//! are picked up by the next tick.

use crate::experiment::{Experiment, ExperimentKind, TickContext};
use crate::{
    ControlError, Event, EventKind, Jitter, MeasurementAggregator, ParameterStore, ParticlePool,
    ParticleView, RenderSnapshot, SimulationClock, SimulationConfig,
};
use lab_physics::Particle;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Keeps the jitter stream apart from the event stream for the same seed
const JITTER_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

pub struct Simulation {
    experiment: Box<dyn Experiment>,
    config: SimulationConfig,
    parameters: ParameterStore,
    pool: ParticlePool,
    aggregator: MeasurementAggregator,
    clock: SimulationClock,
    rng: StdRng,
    jitter: Jitter,
    pending_fires: u32,
    snapshot: RenderSnapshot,
}

impl Simulation {
    pub fn new(experiment: Box<dyn Experiment>, config: SimulationConfig) -> Self {
        log::info!(
            "Initializing '{}' simulation (seed {:#x}, max {} particles)",
            experiment.name(),
            config.seed,
            config.max_particles
        );

        Self {
            parameters: ParameterStore::new(experiment.name(), experiment.parameters()),
            pool: ParticlePool::new(config.max_particles),
            aggregator: MeasurementAggregator::new(experiment.measurement()),
            clock: SimulationClock::new(config.max_dt_ms, config.time_scale),
            rng: StdRng::seed_from_u64(config.seed),
            jitter: Jitter::new(config.seed ^ JITTER_SEED_MIX),
            pending_fires: 0,
            snapshot: RenderSnapshot::default(),
            experiment,
            config,
        }
    }

    pub fn for_kind(kind: ExperimentKind, config: SimulationConfig) -> Self {
        Self::new(kind.build(), config)
    }

    /// Write a parameter. Out-of-range values are clamped; the stored value
    /// is returned.
    pub fn set_parameter(&mut self, name: &str, value: f64) -> Result<f64, ControlError> {
        let stored = self.parameters.set(name, value)?;
        log::debug!("{}: {} = {}", self.experiment.name(), name, stored);
        Ok(stored)
    }

    pub fn parameter(&self, name: &str) -> Option<f64> {
        self.parameters.get(name)
    }

    /// Queue a one-shot spawn (spray a drop, fire a photon) for the next tick
    pub fn fire_once(&mut self) {
        self.pending_fires += 1;
        log::debug!("{}: fire queued ({} pending)", self.experiment.name(), self.pending_fires);
    }

    /// Back to the state right after construction: defaults, empty pool,
    /// empty measurement, fresh clock and reseeded random streams
    pub fn reset(&mut self) {
        log::info!("Resetting '{}' simulation", self.experiment.name());
        self.parameters.reset();
        self.pool.clear();
        self.aggregator.clear();
        self.clock.reset();
        self.rng = StdRng::seed_from_u64(self.config.seed);
        self.jitter = Jitter::new(self.config.seed ^ JITTER_SEED_MIX);
        self.pending_fires = 0;
        self.snapshot = RenderSnapshot::default();
    }

    /// Advance to the host timestamp and return the new render snapshot.
    ///
    /// Order within a tick: parameter snapshot and pending fires, particle
    /// update and spawning, measurement, render snapshot.
    pub fn tick(&mut self, timestamp_ms: f64) -> &RenderSnapshot {
        let step = self.clock.advance(timestamp_ms);
        let params = self.parameters.snapshot();
        let mut events: Vec<Event> = Vec::new();

        {
            let mut ctx = TickContext::new(&params, &mut self.rng, step.now, step.dt, step.elapsed);

            for _ in 0..std::mem::take(&mut self.pending_fires) {
                self.experiment.fire(&mut ctx);
            }
            for particle in ctx.take_spawned() {
                if self.pool.spawn(particle) {
                    events.push(Event::new(EventKind::Emitted, step.now, particle.position));
                }
            }

            events.extend(self.pool.advance(self.experiment.as_ref(), &mut ctx, &mut self.jitter));
            events.extend(self.experiment.observe(&ctx));
        }

        for event in &events {
            self.aggregator.record(event);
        }
        let measurement = self.aggregator.tick(step.now);

        let experiment = self.experiment.as_ref();
        let particles = self
            .pool
            .active()
            .iter()
            .map(|p| ParticleView {
                position: [p.position.x as f32, p.position.y as f32],
                category: p.kind.category(),
                intensity: experiment.intensity_hint(p, &params),
            })
            .collect();

        log::trace!(
            "tick {} dt={:.4}s particles={} events={} measurement={:.4}",
            step.tick,
            step.dt,
            self.pool.len(),
            events.len(),
            measurement
        );

        self.snapshot = RenderSnapshot {
            tick: step.tick,
            time_ms: step.now,
            particles,
            measurement,
            instantaneous: self.aggregator.instantaneous(),
            display: experiment.display(&params, step.elapsed, measurement),
            events,
        };
        &self.snapshot
    }

    pub fn experiment(&self) -> &dyn Experiment {
        self.experiment.as_ref()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn parameters(&self) -> &ParameterStore {
        &self.parameters
    }

    pub fn particles(&self) -> &[Particle] {
        self.pool.active()
    }

    /// Smoothed measurement as of the last tick
    pub fn measurement(&self) -> f64 {
        self.aggregator.value()
    }

    pub fn aggregator(&self) -> &MeasurementAggregator {
        &self.aggregator
    }

    pub fn snapshot(&self) -> &RenderSnapshot {
        &self.snapshot
    }

    pub fn ticks(&self) -> u64 {
        self.clock.ticks()
    }
}
