//! Millikan oil drop
//!
//! Scene units are millimeters. The plates sit at y = 0 and y = 5 with the
//! upper plate positive for a positive voltage, so a positively charged drop
//! is pushed up. Drops are sprayed in near the top plate and timed as they
//! cross the reticle at mid-gap.

use super::crossed;
use crate::experiment::{Bounds, Experiment, TickContext};
use crate::{
    DisplayScalar, Event, EventKind, ForceModel, ForceResponse, MeasurementConfig, ParamSpec,
    Params,
};
use glam::DVec2;
use lab_physics::{
    balancing_voltage, diffusion_coefficient, inferred_charge, millikan_drift, plate_field,
    Particle, Phase, PLATE_SEPARATION,
};
use rand::Rng;

const MM: f64 = 1.0e3;
const GAP: f64 = PLATE_SEPARATION * MM;
const RETICLE: f64 = GAP / 2.0;
const SPRAY_HEIGHT: f64 = GAP * 0.9;
const SPRAY_WIDTH: (f64, f64) = (2.0, 8.0);
const DROPS_PER_FIRE: usize = 6;

const PARAMS: &[ParamSpec] = &[
    ParamSpec::new("voltage", "Plate voltage", "V", 0.0, 600.0, 250.0),
    ParamSpec::new("radius", "Drop radius", "µm", 0.4, 2.0, 1.0),
    ParamSpec::new("temperature", "Air temperature", "°C", 0.0, 50.0, 20.0),
    ParamSpec::new("spray_rate", "Atomizer rate", "1/s", 0.0, 5.0, 0.5),
    ParamSpec::new("max_charge", "Max charge", "e", 1.0, 10.0, 6.0),
];

pub struct Millikan;

impl Millikan {
    fn field(params: &Params) -> f64 {
        plate_field(params.value("voltage"), PLATE_SEPARATION)
    }

    fn spray(ctx: &mut TickContext) -> Particle {
        let radius = ctx.params.value("radius") * 1.0e-6 * ctx.rng.random_range(0.8..1.2);
        let max_charge = ctx.params.value("max_charge").round().max(1.0) as u32;
        let charge = ctx.rng.random_range(1..=max_charge) as f64;
        let x = ctx.rng.random_range(SPRAY_WIDTH.0..SPRAY_WIDTH.1);
        Particle::new_oil_drop(DVec2::new(x, SPRAY_HEIGHT), charge, radius, ctx.now)
    }
}

impl ForceModel for Millikan {
    fn evaluate(&self, particle: &Particle, params: &Params, _dt: f64) -> ForceResponse {
        let drift = millikan_drift(particle.scalar, particle.aux, Self::field(params));
        ForceResponse::new(DVec2::new(0.0, drift * MM), particle.scalar)
    }
}

impl Experiment for Millikan {
    fn name(&self) -> &'static str {
        "millikan"
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn measurement(&self) -> MeasurementConfig {
        MeasurementConfig::mean(EventKind::Detected, 10_000.0)
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(DVec2::new(0.0, -0.5), DVec2::new(10.0, GAP + 0.5))
    }

    fn spawn_rate(&self, params: &Params) -> f64 {
        params.value("spray_rate")
    }

    fn spawn(&self, ctx: &mut TickContext) -> Option<Particle> {
        Some(Self::spray(ctx))
    }

    fn fire(&self, ctx: &mut TickContext) {
        for _ in 0..DROPS_PER_FIRE {
            let drop = Self::spray(ctx);
            ctx.spawn(drop);
        }
    }

    fn interact(&self, particle: &mut Particle, ctx: &mut TickContext) -> Option<Event> {
        let y = particle.position.y;
        if y <= 0.0 || y >= GAP {
            particle.phase = Phase::Absorbed;
            return Some(Event::new(EventKind::Absorbed, ctx.now, particle.position));
        }

        let (from, to) = (particle.previous_position.y, y);
        let at_reticle = crossed(from, to, RETICLE) || crossed(-from, -to, -RETICLE);
        if !at_reticle || particle.collisions > 0 {
            return None;
        }
        // timed once per drop
        particle.collisions += 1;

        let drift = particle.velocity.y / MM;
        let charge = inferred_charge(particle.aux, drift, Self::field(ctx.params))?;
        Some(Event::new(EventKind::Detected, ctx.now, particle.position).with_magnitude(charge))
    }

    fn jitter_amplitude(&self, particle: &Particle, params: &Params) -> f64 {
        let d = diffusion_coefficient(particle.aux, params.value("temperature"));
        (2.0 * d).sqrt() * MM
    }

    fn intensity_hint(&self, particle: &Particle, params: &Params) -> f32 {
        // bigger drops read brighter
        (particle.aux / (params.value("radius") * 1.2e-6)).clamp(0.2, 1.0) as f32
    }

    fn display(&self, params: &Params, _elapsed: f64, measurement: f64) -> Vec<DisplayScalar> {
        let mean_charge = ((1.0 + params.value("max_charge").round()) / 2.0).round();
        let balance =
            balancing_voltage(mean_charge, params.value("radius") * 1.0e-6, PLATE_SEPARATION)
                .unwrap_or(0.0);
        vec![
            DisplayScalar::new("field", "Field", "V/m", Self::field(params)),
            DisplayScalar::new("balancing_voltage", "Balancing voltage", "V", balance),
            DisplayScalar::new("measured_charge", "Measured charge", "e", measurement),
        ]
    }
}
