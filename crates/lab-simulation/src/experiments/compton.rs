//! Compton scattering
//!
//! X-ray photons leave the source at (-1, 0) and hit an electron target at
//! the origin. Each photon scatters through the detector angle with its
//! wavelength lengthened by the Compton shift, and knocks out a recoil
//! electron below the beam axis. The detector sits on the unit circle and
//! averages the wavelength it sees.

use crate::experiment::{Bounds, Experiment, TickContext};
use crate::{
    DisplayScalar, Event, EventKind, ForceModel, ForceResponse, MeasurementConfig, ParamSpec,
    Params,
};
use glam::DVec2;
use lab_physics::{compton_scatter, ComptonScattering, Particle, ParticleKind, Phase};

const SOURCE: DVec2 = DVec2::new(-1.0, 0.0);
const DETECTOR_RADIUS: f64 = 1.0;
const PHOTON_SPEED: f64 = 2.0;
/// Recoil electron speed when it takes all of the photon energy
const ELECTRON_SPEED: f64 = 1.5;

const PARAMS: &[ParamSpec] = &[
    ParamSpec::new("wavelength", "Incident wavelength", "pm", 10.0, 150.0, 71.0),
    ParamSpec::new("angle", "Detector angle", "°", 0.0, 180.0, 45.0),
    ParamSpec::new("rate", "Source rate", "1/s", 0.0, 10.0, 0.0),
];

pub struct Compton;

impl Compton {
    fn scattering(params: &Params) -> Option<ComptonScattering> {
        compton_scatter(params.value("wavelength"), params.value("angle").to_radians())
    }

    fn photon(params: &Params, now: f64) -> Particle {
        Particle::new_photon(SOURCE, params.value("wavelength"), now)
            .with_velocity(DVec2::X * PHOTON_SPEED)
    }
}

impl ForceModel for Compton {
    fn evaluate(&self, particle: &Particle, _params: &Params, _dt: f64) -> ForceResponse {
        ForceResponse::free_flight(particle)
    }
}

impl Experiment for Compton {
    fn name(&self) -> &'static str {
        "compton"
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn measurement(&self) -> MeasurementConfig {
        MeasurementConfig::mean(EventKind::Detected, 5000.0)
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(DVec2::splat(-1.5), DVec2::splat(1.5))
    }

    fn spawn_rate(&self, params: &Params) -> f64 {
        params.value("rate")
    }

    fn spawn(&self, ctx: &mut TickContext) -> Option<Particle> {
        Some(Self::photon(ctx.params, ctx.now))
    }

    fn fire(&self, ctx: &mut TickContext) {
        let photon = Self::photon(ctx.params, ctx.now);
        ctx.spawn(photon);
    }

    fn interact(&self, particle: &mut Particle, ctx: &mut TickContext) -> Option<Event> {
        match particle.kind {
            ParticleKind::Photon if particle.position.x >= 0.0 => {
                let Some(s) = Self::scattering(ctx.params) else {
                    particle.phase = Phase::Absorbed;
                    return Some(Event::new(EventKind::Absorbed, ctx.now, particle.position));
                };
                let theta = ctx.params.value("angle").to_radians();

                particle.kind = ParticleKind::ScatteredPhoton;
                particle.scalar = s.scattered_wavelength;
                particle.collisions += 1;
                particle.position = DVec2::ZERO;
                particle.velocity = DVec2::from_angle(theta) * PHOTON_SPEED;

                let share = (s.electron_energy / s.incident_energy).clamp(0.0, 1.0);
                let recoil = Particle::new(
                    ParticleKind::RecoilElectron,
                    DVec2::ZERO,
                    s.electron_energy,
                    ctx.now,
                )
                .with_velocity(
                    DVec2::from_angle(-s.electron_angle) * ELECTRON_SPEED * share.sqrt(),
                );
                ctx.spawn(recoil);

                Some(Event::new(EventKind::Collision, ctx.now, DVec2::ZERO).with_magnitude(s.shift))
            }
            ParticleKind::ScatteredPhoton if particle.position.length() >= DETECTOR_RADIUS => {
                particle.phase = Phase::Detected;
                Some(
                    Event::new(EventKind::Detected, ctx.now, particle.position)
                        .with_magnitude(particle.scalar),
                )
            }
            _ => None,
        }
    }

    fn intensity_hint(&self, particle: &Particle, _params: &Params) -> f32 {
        match particle.kind {
            ParticleKind::RecoilElectron => 0.7,
            _ => 1.0,
        }
    }

    fn display(&self, params: &Params, _elapsed: f64, _measurement: f64) -> Vec<DisplayScalar> {
        let Some(s) = Self::scattering(params) else {
            return Vec::new();
        };
        vec![
            DisplayScalar::new("shift", "Compton shift", "pm", s.shift),
            DisplayScalar::new(
                "scattered_wavelength",
                "Scattered wavelength",
                "pm",
                s.scattered_wavelength,
            ),
            DisplayScalar::new("incident_energy", "Incident energy", "keV", s.incident_energy),
            DisplayScalar::new("scattered_energy", "Scattered energy", "keV", s.scattered_energy),
            DisplayScalar::new("electron_energy", "Electron energy", "keV", s.electron_energy),
            DisplayScalar::new(
                "electron_angle",
                "Electron angle",
                "°",
                s.electron_angle.to_degrees(),
            ),
        ]
    }
}
