//! Photoelectric effect
//!
//! Cathode at x = 0, anode at x = 1. Light of the chosen wavelength knocks
//! electrons out of the cathode metal; the anode voltage then speeds them up
//! or, when negative, turns them back. The anode current is the measurement.

use crate::experiment::{Bounds, Experiment, TickContext};
use crate::{
    DisplayScalar, Event, EventKind, ForceModel, ForceResponse, MeasurementConfig, ParamSpec,
    Params,
};
use glam::DVec2;
use lab_physics::{
    photoelectric_max_energy, photon_energy, stopping_voltage, threshold_wavelength, Particle,
    Phase, WORK_FUNCTIONS,
};
use rand::Rng;

/// Scene units per second for a 1 eV electron
const SPEED: f64 = 0.6;
/// Emissions per second per percent of light intensity, above threshold
const EMISSION_PER_INTENSITY: f64 = 0.8;
const ANODE: f64 = 1.0;
const CATHODE_HALF_HEIGHT: f64 = 0.4;

const PARAMS: &[ParamSpec] = &[
    ParamSpec::new("wavelength", "Wavelength", "nm", 100.0, 800.0, 400.0),
    ParamSpec::new("intensity", "Intensity", "%", 0.0, 100.0, 50.0),
    ParamSpec::new("voltage", "Anode voltage", "V", -5.0, 5.0, 0.0),
    ParamSpec::new("metal", "Cathode metal", "", 0.0, 5.0, 0.0),
];

pub struct Photoelectric;

impl Photoelectric {
    /// Work function of the selected metal (eV)
    pub fn work_function(params: &Params) -> f64 {
        let last = WORK_FUNCTIONS.len() - 1;
        let index = (params.value("metal").round().max(0.0) as usize).min(last);
        WORK_FUNCTIONS[index].1
    }

    /// Kinetic energy (eV) at `x` across the gap for an electron that left
    /// the cathode with `initial`
    fn energy_at(initial: f64, x: f64, params: &Params) -> f64 {
        initial + params.value("voltage") * x.clamp(0.0, ANODE)
    }
}

impl ForceModel for Photoelectric {
    fn evaluate(&self, particle: &Particle, params: &Params, _dt: f64) -> ForceResponse {
        let energy = Self::energy_at(particle.aux, particle.position.x, params);
        let speed = SPEED * energy.max(0.0).sqrt();
        ForceResponse::new(DVec2::new(speed, 0.0), energy)
    }
}

impl Experiment for Photoelectric {
    fn name(&self) -> &'static str {
        "photoelectric"
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
        params.value("intensity") * EMISSION_PER_INTENSITY
    }

    fn spawn(&self, ctx: &mut TickContext) -> Option<Particle> {
        let work_function = Self::work_function(ctx.params);
        let max = photoelectric_max_energy(ctx.params.value("wavelength"), work_function)?;
        // anywhere from the full photon surplus down to nothing
        let energy = max * (1.0 - ctx.rng.random::<f64>());
        let y = ctx.rng.random_range(-CATHODE_HALF_HEIGHT..CATHODE_HALF_HEIGHT);
        Some(Particle::new_photoelectron(DVec2::new(0.0, y), energy, ctx.now))
    }

    fn interact(&self, particle: &mut Particle, ctx: &mut TickContext) -> Option<Event> {
        if particle.position.x >= ANODE {
            particle.phase = Phase::Detected;
            return Some(Event::new(EventKind::Detected, ctx.now, particle.position));
        }
        let energy = Self::energy_at(particle.aux, particle.position.x, ctx.params);
        if energy <= 0.0 {
            particle.phase = Phase::Absorbed;
            return Some(Event::new(EventKind::Absorbed, ctx.now, particle.position));
        }
        None
    }

    fn intensity_hint(&self, particle: &Particle, params: &Params) -> f32 {
        let max = photoelectric_max_energy(params.value("wavelength"), Self::work_function(params))
            .unwrap_or(0.0);
        if max <= 0.0 {
            return 1.0;
        }
        (0.3 + 0.7 * particle.scalar / max).clamp(0.0, 1.0) as f32
    }

    fn display(&self, params: &Params, _elapsed: f64, _measurement: f64) -> Vec<DisplayScalar> {
        let wavelength = params.value("wavelength");
        let work_function = Self::work_function(params);
        vec![
            DisplayScalar::new("photon_energy", "Photon energy", "eV", photon_energy(wavelength)),
            DisplayScalar::new(
                "max_kinetic_energy",
                "Max kinetic energy",
                "eV",
                photoelectric_max_energy(wavelength, work_function).unwrap_or(0.0),
            ),
            DisplayScalar::new(
                "stopping_voltage",
                "Stopping voltage",
                "V",
                stopping_voltage(wavelength, work_function),
            ),
            DisplayScalar::new(
                "threshold_wavelength",
                "Threshold wavelength",
                "nm",
                threshold_wavelength(work_function).unwrap_or(0.0),
            ),
            DisplayScalar::new("work_function", "Work function", "eV", work_function),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiments::test_support::{ctx, params, rng};

    /// Index of copper in the metals table
    const COPPER: f64 = 4.0;

    #[test]
    fn test_work_function_lookup() {
        assert_eq!(Photoelectric::work_function(&params(&Photoelectric, &[])), 2.28);
        let copper = params(&Photoelectric, &[("metal", COPPER)]);
        assert_eq!(Photoelectric::work_function(&copper), 4.70);
        let rounded = params(&Photoelectric, &[("metal", 4.6)]);
        assert_eq!(Photoelectric::work_function(&rounded), 6.35);
    }

    #[test]
    fn test_no_emission_below_threshold() {
        let params = params(&Photoelectric, &[("wavelength", 700.0), ("metal", COPPER)]);
        let mut rng = rng();
        let mut ctx = ctx(&params, &mut rng, 0.016);
        for _ in 0..1000 {
            assert!(Photoelectric.spawn(&mut ctx).is_none());
        }
    }

    #[test]
    fn test_emitted_energy_bounded() {
        let params = params(&Photoelectric, &[("wavelength", 250.0)]);
        let max = photoelectric_max_energy(250.0, 2.28).unwrap();
        let mut rng = rng();
        let mut ctx = ctx(&params, &mut rng, 0.016);
        for _ in 0..200 {
            let electron = Photoelectric.spawn(&mut ctx).unwrap();
            assert!(electron.scalar > 0.0 && electron.scalar <= max);
            assert_eq!(electron.position.x, 0.0);
        }
    }

    #[test]
    fn test_retarding_voltage_absorbs() {
        let params = params(&Photoelectric, &[("voltage", -5.0)]);
        let mut rng = rng();
        let mut ctx = ctx(&params, &mut rng, 0.016);
        let mut electron = Particle::new_photoelectron(DVec2::new(0.5, 0.0), 1.0, 0.0);
        let event = Photoelectric.interact(&mut electron, &mut ctx).unwrap();
        assert_eq!(event.kind, EventKind::Absorbed);
        assert_eq!(electron.phase, Phase::Absorbed);
    }

    #[test]
    fn test_anode_detects() {
        let params = params(&Photoelectric, &[]);
        let mut rng = rng();
        let mut ctx = ctx(&params, &mut rng, 0.016);
        let mut electron = Particle::new_photoelectron(DVec2::new(1.01, 0.0), 1.0, 0.0);
        let event = Photoelectric.interact(&mut electron, &mut ctx).unwrap();
        assert_eq!(event.kind, EventKind::Detected);
    }

    #[test]
    fn test_accelerating_voltage_speeds_up() {
        let params = params(&Photoelectric, &[("voltage", 4.0)]);
        let electron = Particle::new_photoelectron(DVec2::new(0.5, 0.0), 1.0, 0.0);
        let response = Photoelectric.evaluate(&electron, &params, 0.016);
        assert_eq!(response.derived, 3.0);
        assert!((response.velocity.x - SPEED * 3.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_display_values() {
        let params = params(&Photoelectric, &[("wavelength", 400.0), ("metal", COPPER)]);
        let display = Photoelectric.display(&params, 0.0, 0.0);
        let get = |key: &str| display.iter().find(|d| d.key == key).unwrap().value;
        assert_eq!(get("photon_energy"), 3.1);
        assert_eq!(get("max_kinetic_energy"), 0.0);
        assert!((get("threshold_wavelength") - 1240.0 / 4.70).abs() < 1e-9);
    }
}
