//! Michelson–Morley interferometer
//!
//! No particles: the apparatus turns at a steady rate and every tick reads
//! off the fringe shift an ether wind would cause at the current angle. The
//! measurement keeps the recent history of those readings.

use crate::experiment::{Bounds, Experiment, TickContext};
use crate::{
    DisplayScalar, Event, EventKind, ForceModel, ForceResponse, MeasurementConfig, ParamSpec,
    Params,
};
use glam::DVec2;
use lab_physics::{michelson_fringe_shift, michelson_max_shift, Particle};

const PARAMS: &[ParamSpec] = &[
    ParamSpec::new("arm_length", "Arm length", "m", 1.0, 30.0, 11.0),
    ParamSpec::new("wavelength", "Wavelength", "nm", 400.0, 700.0, 500.0),
    ParamSpec::new("ether_speed", "Ether wind", "km/s", 0.0, 60.0, 30.0),
    ParamSpec::new("rotation", "Rotation rate", "°/s", 0.0, 90.0, 15.0),
    ParamSpec::new("angle", "Start angle", "°", 0.0, 180.0, 0.0),
];

pub struct Michelson;

impl Michelson {
    /// Apparatus angle (rad) after `elapsed` seconds
    fn angle(params: &Params, elapsed: f64) -> f64 {
        (params.value("angle") + params.value("rotation") * elapsed).to_radians()
    }

    fn shift(params: &Params, angle: f64) -> f64 {
        michelson_fringe_shift(
            params.value("arm_length"),
            params.value("wavelength") * 1.0e-9,
            params.value("ether_speed") * 1.0e3,
            angle,
        )
    }
}

impl ForceModel for Michelson {
    fn evaluate(&self, particle: &Particle, _params: &Params, _dt: f64) -> ForceResponse {
        ForceResponse::new(DVec2::ZERO, particle.scalar)
    }
}

impl Experiment for Michelson {
    fn name(&self) -> &'static str {
        "michelson-morley"
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn measurement(&self) -> MeasurementConfig {
        MeasurementConfig::mean(EventKind::Sample, 500.0).with_alpha(0.8)
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(DVec2::splat(-1.0), DVec2::splat(1.0))
    }

    fn interact(&self, _particle: &mut Particle, _ctx: &mut TickContext) -> Option<Event> {
        None
    }

    fn observe(&self, ctx: &TickContext) -> Option<Event> {
        let angle = Self::angle(ctx.params, ctx.elapsed);
        let shift = Self::shift(ctx.params, angle);
        Some(Event::new(EventKind::Sample, ctx.now, DVec2::from_angle(angle)).with_magnitude(shift))
    }

    fn display(&self, params: &Params, elapsed: f64, _measurement: f64) -> Vec<DisplayScalar> {
        let angle = Self::angle(params, elapsed);
        let max = michelson_max_shift(
            params.value("arm_length"),
            params.value("wavelength") * 1.0e-9,
            params.value("ether_speed") * 1.0e3,
        );
        vec![
            DisplayScalar::new("expected_shift", "Expected shift", "fringes", max),
            DisplayScalar::new(
                "angle",
                "Apparatus angle",
                "°",
                angle.to_degrees().rem_euclid(360.0),
            ),
            DisplayScalar::new(
                "fringe_shift",
                "Fringe shift",
                "fringes",
                Self::shift(params, angle),
            ),
        ]
    }
}
