//! The seam between the generic engine and a particular experiment

use crate::experiments::{
    Compton, DoubleSlit, FranckHertz, Malus, Michelson, Millikan, Photoelectric,
};
use crate::{ControlError, DisplayScalar, Event, ForceModel, MeasurementConfig, ParamSpec, Params};
use glam::DVec2;
use lab_physics::Particle;
use rand::rngs::StdRng;
use std::fmt;
use std::str::FromStr;

/// Axis-aligned region outside of which particles are culled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, p: DVec2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// Everything an experiment may touch while the pool advances one tick
pub struct TickContext<'a> {
    pub params: &'a Params,
    pub rng: &'a mut StdRng,
    /// Host timestamp (ms)
    pub now: f64,
    /// Step length (s)
    pub dt: f64,
    /// Simulated time since start (s)
    pub elapsed: f64,
    spawned: Vec<Particle>,
}

impl<'a> TickContext<'a> {
    pub fn new(params: &'a Params, rng: &'a mut StdRng, now: f64, dt: f64, elapsed: f64) -> Self {
        Self {
            params,
            rng,
            now,
            dt,
            elapsed,
            spawned: Vec::new(),
        }
    }

    /// Queue a particle created by an interaction or a one-shot fire.
    /// It joins the pool at the end of the tick.
    pub fn spawn(&mut self, particle: Particle) {
        self.spawned.push(particle);
    }

    pub(crate) fn take_spawned(&mut self) -> Vec<Particle> {
        std::mem::take(&mut self.spawned)
    }
}

/// One experiment: its parameters, force model, event rules and readouts.
///
/// Implementations hold no mutable state; everything that changes lives in
/// the particles, the parameter snapshot and the simulation clock.
pub trait Experiment: ForceModel + Send + Sync {
    fn name(&self) -> &'static str;

    fn parameters(&self) -> &'static [ParamSpec];

    fn measurement(&self) -> MeasurementConfig;

    fn bounds(&self) -> Bounds;

    /// Expected spawns per second from the continuous source
    fn spawn_rate(&self, _params: &Params) -> f64 {
        0.0
    }

    /// One particle from the continuous source. `None` when the current
    /// parameters make emission physically impossible.
    fn spawn(&self, _ctx: &mut TickContext) -> Option<Particle> {
        None
    }

    /// One-shot spawn requested by the control boundary
    fn fire(&self, _ctx: &mut TickContext) {}

    /// Surface checks and stochastic events for a particle that has just
    /// moved. May change the particle's phase and queue new particles.
    fn interact(&self, particle: &mut Particle, ctx: &mut TickContext) -> Option<Event>;

    /// Per-tick observation independent of particles
    fn observe(&self, _ctx: &TickContext) -> Option<Event> {
        None
    }

    /// Diffusion amplitude `sqrt(2D)` in scene units per √s
    fn jitter_amplitude(&self, _particle: &Particle, _params: &Params) -> f64 {
        0.0
    }

    fn intensity_hint(&self, _particle: &Particle, _params: &Params) -> f32 {
        1.0
    }

    /// Derived numbers for the renderer
    fn display(&self, params: &Params, elapsed: f64, measurement: f64) -> Vec<DisplayScalar>;
}

/// The experiments shipped with the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExperimentKind {
    Millikan,
    Photoelectric,
    Compton,
    FranckHertz,
    Malus,
    DoubleSlit,
    MichelsonMorley,
}

impl ExperimentKind {
    pub const ALL: [ExperimentKind; 7] = [
        ExperimentKind::Millikan,
        ExperimentKind::Photoelectric,
        ExperimentKind::Compton,
        ExperimentKind::FranckHertz,
        ExperimentKind::Malus,
        ExperimentKind::DoubleSlit,
        ExperimentKind::MichelsonMorley,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ExperimentKind::Millikan => "millikan",
            ExperimentKind::Photoelectric => "photoelectric",
            ExperimentKind::Compton => "compton",
            ExperimentKind::FranckHertz => "franck-hertz",
            ExperimentKind::Malus => "malus",
            ExperimentKind::DoubleSlit => "double-slit",
            ExperimentKind::MichelsonMorley => "michelson-morley",
        }
    }

    pub fn build(self) -> Box<dyn Experiment> {
        match self {
            ExperimentKind::Millikan => Box::new(Millikan),
            ExperimentKind::Photoelectric => Box::new(Photoelectric),
            ExperimentKind::Compton => Box::new(Compton),
            ExperimentKind::FranckHertz => Box::new(FranckHertz),
            ExperimentKind::Malus => Box::new(Malus),
            ExperimentKind::DoubleSlit => Box::new(DoubleSlit),
            ExperimentKind::MichelsonMorley => Box::new(Michelson),
        }
    }
}

impl fmt::Display for ExperimentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExperimentKind {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        ExperimentKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| ControlError::UnknownExperiment(s.to_string()))
    }
}
