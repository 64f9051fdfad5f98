//! Franck–Hertz tube
//!
//! Electrons leave the cathode at x = 0, gain energy through mercury vapor up
//! to the grid at x = 0.8, then climb a small retarding potential to the
//! anode at x = 1. An electron reaching 4.9 eV may excite a mercury atom and
//! lose exactly that much; how likely that is depends on the oven
//! temperature. The grid keeps every electron that arrives with less than
//! the capture band, so the anode current drops wherever electrons have just
//! spent their energy on the last collision before the grid.

use crate::experiment::{Bounds, Experiment, TickContext};
use crate::{
    DisplayScalar, Event, EventKind, ForceModel, ForceResponse, MeasurementConfig, ParamSpec,
    Params, StochasticEventModel,
};
use glam::DVec2;
use lab_physics::{
    dip_strength, franck_hertz_current, franck_hertz_dips, Particle, ParticleKind, Phase,
    CONTACT_POTENTIAL, MERCURY_EXCITATION_EV,
};
use rand::Rng;

const GRID: f64 = 0.8;
const ANODE: f64 = 1.0;
/// Scene units per second per √eV
const SPEED: f64 = 0.25;
/// Drift that keeps a slow electron moving toward the grid
const DRIFT: f64 = 0.3;

/// Energy the grid wires capture on their own, on top of the retarding step (eV)
const GRID_CAPTURE_EV: f64 = 0.3;

/// At peak dip strength an electron collides on the first tick it can
const COLLISIONS: StochasticEventModel = StochasticEventModel::new(1.0);

const PARAMS: &[ParamSpec] = &[
    ParamSpec::new("voltage", "Accelerating voltage", "V", 0.0, 30.0, 15.0),
    ParamSpec::new("temperature", "Oven temperature", "°C", 20.0, 250.0, 180.0),
    ParamSpec::new("retarding", "Retarding voltage", "V", 0.0, 3.0, 1.5),
    ParamSpec::new("emission", "Emission rate", "1/s", 0.0, 100.0, 40.0),
];

pub struct FranckHertz;

impl FranckHertz {
    /// Electrons reaching the grid with less than this never reach the anode
    fn capture_band(params: &Params) -> f64 {
        params.value("retarding") + GRID_CAPTURE_EV
    }

    /// Kinetic energy (eV) at `x` after `collisions` inelastic collisions.
    ///
    /// Electrons leave the cathode with half the capture band, which centers
    /// each current minimum on n·4.9 V above the contact potential.
    fn energy_at(x: f64, collisions: u32, params: &Params) -> f64 {
        let emitted = Self::capture_band(params) / 2.0;
        let accelerating = (params.value("voltage") - CONTACT_POTENTIAL).max(0.0);
        let gained = accelerating * (x / GRID).clamp(0.0, 1.0);
        let retarded = params.value("retarding") * ((x - GRID) / (ANODE - GRID)).clamp(0.0, 1.0);
        emitted + gained - retarded - MERCURY_EXCITATION_EV * collisions as f64
    }
}

impl ForceModel for FranckHertz {
    fn evaluate(&self, particle: &Particle, params: &Params, _dt: f64) -> ForceResponse {
        let energy = Self::energy_at(particle.position.x, particle.collisions, params);
        let speed = SPEED * (energy.max(0.0).sqrt() + DRIFT);
        ForceResponse::new(DVec2::new(speed, 0.0), energy)
    }
}

impl Experiment for FranckHertz {
    fn name(&self) -> &'static str {
        "franck-hertz"
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn measurement(&self) -> MeasurementConfig {
        MeasurementConfig::rate(EventKind::Detected, 1000.0, 1.0)
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(DVec2::new(-0.1, -0.5), DVec2::new(ANODE + 0.1, 0.5))
    }

    fn spawn_rate(&self, params: &Params) -> f64 {
        params.value("emission")
    }

    fn spawn(&self, ctx: &mut TickContext) -> Option<Particle> {
        let y = ctx.rng.random_range(-0.3..0.3);
        Some(Particle::new(ParticleKind::Electron, DVec2::new(0.0, y), 0.0, ctx.now))
    }

    fn interact(&self, particle: &mut Particle, ctx: &mut TickContext) -> Option<Event> {
        let x = particle.position.x;
        if x >= ANODE {
            particle.phase = Phase::Detected;
            return Some(Event::new(EventKind::Detected, ctx.now, particle.position));
        }

        let at_grid = Self::energy_at(GRID, particle.collisions, ctx.params);
        if x >= GRID && at_grid < Self::capture_band(ctx.params) {
            particle.phase = Phase::Absorbed;
            return Some(Event::new(EventKind::Absorbed, ctx.now, particle.position));
        }

        // excitation happens up to the grid, including on the tick that crosses it
        let energy = Self::energy_at(x.min(GRID), particle.collisions, ctx.params);
        let eligible = particle.previous_position.x < GRID && energy >= MERCURY_EXCITATION_EV;
        let density = dip_strength(ctx.params.value("temperature"));
        if COLLISIONS.maybe_trigger(ctx.rng, eligible, density) {
            particle.collisions += 1;
            particle.scalar = energy - MERCURY_EXCITATION_EV;
            return Some(
                Event::new(EventKind::Collision, ctx.now, particle.position)
                    .with_magnitude(MERCURY_EXCITATION_EV),
            );
        }
        None
    }

    fn intensity_hint(&self, particle: &Particle, _params: &Params) -> f32 {
        (1.0 - 0.25 * particle.collisions as f32).max(0.25)
    }

    fn display(&self, params: &Params, _elapsed: f64, _measurement: f64) -> Vec<DisplayScalar> {
        let voltage = params.value("voltage");
        let temperature = params.value("temperature");
        let next_dip = franck_hertz_dips(voltage + MERCURY_EXCITATION_EV)
            .find(|dip| *dip > voltage)
            .unwrap_or(0.0);
        vec![
            DisplayScalar::new(
                "model_current",
                "Model current",
                "a.u.",
                franck_hertz_current(voltage, temperature),
            ),
            DisplayScalar::new("dip_strength", "Dip strength", "", dip_strength(temperature)),
            DisplayScalar::new(
                "effective_voltage",
                "Effective voltage",
                "V",
                (voltage - CONTACT_POTENTIAL).max(0.0),
            ),
            DisplayScalar::new("next_dip", "Next dip", "V", next_dip),
        ]
    }
}
