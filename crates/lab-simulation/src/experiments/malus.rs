//! Malus's law
//!
//! Polarized photons travel from the source at x = 0 through a polarizer at
//! x = 0.5 to a photodetector at x = 1. Each photon crossing the polarizer
//! gets through with probability cos²θ.

use super::crossed;
use crate::experiment::{Bounds, Experiment, TickContext};
use crate::{
    DisplayScalar, Event, EventKind, ForceModel, ForceResponse, MeasurementConfig, ParamSpec,
    Params, StochasticEventModel,
};
use glam::DVec2;
use lab_physics::{malus_transmission, Particle, ParticleKind, Phase};
use rand::Rng;

const POLARIZER: f64 = 0.5;
const DETECTOR: f64 = 1.0;
const SPEED: f64 = 0.8;

const TRANSMISSION: StochasticEventModel = StochasticEventModel::new(1.0);

const PARAMS: &[ParamSpec] = &[
    ParamSpec::new("angle", "Polarizer angle", "°", 0.0, 180.0, 30.0),
    ParamSpec::new("intensity", "Source rate", "1/s", 0.0, 100.0, 60.0),
];

pub struct Malus;

impl Malus {
    fn transmission(params: &Params) -> f64 {
        malus_transmission(params.value("angle").to_radians())
    }
}

impl ForceModel for Malus {
    fn evaluate(&self, particle: &Particle, _params: &Params, _dt: f64) -> ForceResponse {
        ForceResponse::free_flight(particle)
    }
}

impl Experiment for Malus {
    fn name(&self) -> &'static str {
        "malus"
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn measurement(&self) -> MeasurementConfig {
        MeasurementConfig::rate(EventKind::Detected, 1000.0, 1.0)
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(DVec2::new(-0.1, -0.5), DVec2::new(DETECTOR + 0.1, 0.5))
    }

    fn spawn_rate(&self, params: &Params) -> f64 {
        params.value("intensity")
    }

    fn spawn(&self, ctx: &mut TickContext) -> Option<Particle> {
        let y = ctx.rng.random_range(-0.3..0.3);
        let photon = Particle::new(ParticleKind::Photon, DVec2::new(0.0, y), 1.0, ctx.now)
            .with_velocity(DVec2::X * SPEED);
        Some(photon)
    }

    fn interact(&self, particle: &mut Particle, ctx: &mut TickContext) -> Option<Event> {
        let (from, to) = (particle.previous_position.x, particle.position.x);

        // aux marks a photon that already made it through
        if particle.aux == 0.0 && crossed(from, to, POLARIZER) {
            let transmission = Self::transmission(ctx.params);
            if !TRANSMISSION.maybe_trigger(ctx.rng, true, transmission) {
                particle.phase = Phase::Absorbed;
                return Some(Event::new(EventKind::Absorbed, ctx.now, particle.position));
            }
            particle.aux = 1.0;
            particle.scalar = transmission;
        }

        if to >= DETECTOR {
            particle.phase = Phase::Detected;
            return Some(Event::new(EventKind::Detected, ctx.now, particle.position));
        }
        None
    }

    fn intensity_hint(&self, particle: &Particle, _params: &Params) -> f32 {
        if particle.aux > 0.0 {
            particle.scalar.clamp(0.0, 1.0) as f32
        } else {
            1.0
        }
    }

    fn display(&self, params: &Params, _elapsed: f64, _measurement: f64) -> Vec<DisplayScalar> {
        let transmission = Self::transmission(params);
        vec![
            DisplayScalar::new("transmission", "Transmission", "", transmission),
            DisplayScalar::new(
                "expected_rate",
                "Expected rate",
                "1/s",
                params.value("intensity") * transmission,
            ),
        ]
    }
}
