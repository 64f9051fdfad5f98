//! Double-slit diffraction, one photon at a time
//!
//! Each photon's landing height is drawn from the double-slit intensity
//! pattern when it leaves the slits, so the fringes build up dot by dot on
//! the screen. The scene is normalized: slits at x = 0, screen at x = 1,
//! screen height -0.5..0.5 standing for ±2 cm.

use crate::experiment::{Bounds, Experiment, TickContext};
use crate::{
    DisplayScalar, Event, EventKind, ForceModel, ForceResponse, MeasurementConfig, ParamSpec,
    Params,
};
use glam::DVec2;
use lab_physics::{double_slit_intensity, fringe_spacing, Particle, ParticleKind, Phase};
use rand::Rng;

/// Half height of the physical screen (m)
const SCREEN_HALF_WIDTH: f64 = 0.02;
const SCREEN: f64 = 1.0;
const SPEED: f64 = 1.0;
const MAX_ATTEMPTS: usize = 32;

const PARAMS: &[ParamSpec] = &[
    ParamSpec::new("wavelength", "Wavelength", "nm", 380.0, 750.0, 550.0),
    ParamSpec::new("separation", "Slit separation", "µm", 20.0, 500.0, 100.0),
    ParamSpec::new("width", "Slit width", "µm", 5.0, 100.0, 20.0),
    ParamSpec::new("distance", "Screen distance", "m", 0.5, 3.0, 1.0),
    ParamSpec::new("intensity", "Source rate", "1/s", 0.0, 100.0, 60.0),
];

pub struct DoubleSlit;

impl DoubleSlit {
    /// Relative intensity at screen height `y` (m)
    fn intensity(params: &Params, y: f64) -> f64 {
        double_slit_intensity(
            y,
            params.value("wavelength") * 1.0e-9,
            params.value("separation") * 1.0e-6,
            params.value("width") * 1.0e-6,
            params.value("distance"),
        )
    }

    /// Rejection-sample a landing height (m). `None` if every attempt missed.
    fn sample_height<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> Option<f64> {
        (0..MAX_ATTEMPTS).find_map(|_| {
            let y = rng.random_range(-SCREEN_HALF_WIDTH..SCREEN_HALF_WIDTH);
            (rng.random::<f64>() < Self::intensity(params, y)).then_some(y)
        })
    }
}

impl ForceModel for DoubleSlit {
    fn evaluate(&self, particle: &Particle, _params: &Params, _dt: f64) -> ForceResponse {
        ForceResponse::free_flight(particle)
    }
}

impl Experiment for DoubleSlit {
    fn name(&self) -> &'static str {
        "double-slit"
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn measurement(&self) -> MeasurementConfig {
        MeasurementConfig::rate(EventKind::Detected, 1000.0, 1.0)
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(DVec2::new(-0.1, -1.0), DVec2::new(SCREEN + 0.1, 1.0))
    }

    fn spawn_rate(&self, params: &Params) -> f64 {
        params.value("intensity")
    }

    fn spawn(&self, ctx: &mut TickContext) -> Option<Particle> {
        let y = Self::sample_height(ctx.params, ctx.rng)?;
        let target = y / SCREEN_HALF_WIDTH * 0.5;
        let wavelength = ctx.params.value("wavelength");
        let photon = Particle::new(ParticleKind::Photon, DVec2::ZERO, wavelength, ctx.now)
            .with_velocity(DVec2::new(SCREEN, target) * SPEED)
            .with_aux(y);
        Some(photon)
    }

    fn interact(&self, particle: &mut Particle, ctx: &mut TickContext) -> Option<Event> {
        if particle.position.x < SCREEN {
            return None;
        }
        particle.phase = Phase::Detected;
        Some(
            Event::new(EventKind::Detected, ctx.now, particle.position)
                .with_magnitude(particle.aux),
        )
    }

    fn display(&self, params: &Params, _elapsed: f64, _measurement: f64) -> Vec<DisplayScalar> {
        let spacing = fringe_spacing(
            params.value("wavelength") * 1.0e-9,
            params.value("distance"),
            params.value("separation") * 1.0e-6,
        );
        vec![DisplayScalar::new("fringe_spacing", "Fringe spacing", "mm", spacing * 1.0e3)]
    }
}
