//! Photon and electron energetics: photoelectric effect, Compton scattering
//! and the Franck–Hertz tube
//!
//! Energies are in eV for the photoelectric and Franck–Hertz formulas and in
//! keV for Compton, with wavelengths in nm and pm respectively, so the same
//! `HC_EV_NM = 1240` works for both.

use crate::constants::*;

/// Photon energy E = hc / λ.
/// Non-positive wavelengths carry no energy.
pub fn photon_energy(wavelength: f64) -> f64 {
    if wavelength <= 0.0 || !wavelength.is_finite() {
        return 0.0;
    }
    HC_EV_NM / wavelength
}

/// Maximum kinetic energy of an ejected photoelectron (eV)
/// KE = hc/λ - φ
///
/// `None` when the photon is at or below threshold: no electron leaves.
pub fn photoelectric_max_energy(wavelength_nm: f64, work_function: f64) -> Option<f64> {
    let ke = photon_energy(wavelength_nm) - work_function;
    (ke > 0.0).then_some(ke)
}

/// Retarding voltage that stops the fastest photoelectrons
pub fn stopping_voltage(wavelength_nm: f64, work_function: f64) -> f64 {
    photoelectric_max_energy(wavelength_nm, work_function).unwrap_or(0.0)
}

/// Longest wavelength that still ejects electrons (nm)
pub fn threshold_wavelength(work_function: f64) -> Option<f64> {
    (work_function > 0.0).then(|| HC_EV_NM / work_function)
}

/// Compton shift Δλ = λc (1 - cos θ) in pm
pub fn compton_shift(theta: f64) -> f64 {
    COMPTON_WAVELENGTH_PM * (1.0 - theta.cos())
}

/// Recoil direction of the electron below the beam axis
/// cot φ = (1 + λc/λ) tan(θ/2)
pub fn recoil_angle(wavelength_pm: f64, theta: f64) -> f64 {
    if wavelength_pm <= 0.0 {
        return 0.0;
    }
    let k = 1.0 + COMPTON_WAVELENGTH_PM / wavelength_pm;
    1.0_f64.atan2(k * (theta / 2.0).tan())
}

/// Full kinematics of one Compton scattering event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComptonScattering {
    /// Incident wavelength (pm)
    pub incident_wavelength: f64,
    /// Scattered wavelength (pm)
    pub scattered_wavelength: f64,
    /// λ' - λ (pm)
    pub shift: f64,
    /// Incident photon energy (keV)
    pub incident_energy: f64,
    /// Scattered photon energy (keV)
    pub scattered_energy: f64,
    /// Kinetic energy handed to the electron (keV)
    pub electron_energy: f64,
    /// Electron recoil angle (rad)
    pub electron_angle: f64,
}

/// Scatter a photon of wavelength `wavelength_pm` through `theta` radians
pub fn compton_scatter(wavelength_pm: f64, theta: f64) -> Option<ComptonScattering> {
    if wavelength_pm <= 0.0 || !wavelength_pm.is_finite() || !theta.is_finite() {
        return None;
    }
    let shift = compton_shift(theta);
    let scattered_wavelength = wavelength_pm + shift;
    let incident_energy = photon_energy(wavelength_pm);
    let scattered_energy = photon_energy(scattered_wavelength);

    Some(ComptonScattering {
        incident_wavelength: wavelength_pm,
        scattered_wavelength,
        shift,
        incident_energy,
        scattered_energy,
        electron_energy: incident_energy - scattered_energy,
        electron_angle: recoil_angle(wavelength_pm, theta),
    })
}

/// How strongly the mercury vapor shows up in the Franck–Hertz current (0..1).
///
/// Illustrative: a bell around the oven temperature that gives clean dips.
/// Too cold and there is little vapor, too hot and elastic scattering washes
/// the dips out.
pub fn dip_strength(temperature_c: f64) -> f64 {
    let x = (temperature_c - PEAK_DIP_TEMPERATURE) / DIP_TEMPERATURE_WIDTH;
    let s = (-x * x).exp();
    if s.is_finite() {
        s.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Accelerating voltages where the Franck–Hertz current dips, up to `max_voltage`
pub fn franck_hertz_dips(max_voltage: f64) -> impl Iterator<Item = f64> {
    (1..)
        .map(|n| n as f64 * MERCURY_EXCITATION_EV + CONTACT_POTENTIAL)
        .take_while(move |v| *v <= max_voltage)
}

/// Stylised anode current of the Franck–Hertz tube (arbitrary units).
///
/// A V^1.5 space-charge rise with a Gaussian dip at every
/// `n * 4.9 + 2.0` volts (n ≥ 1). The dip depth follows [`dip_strength`].
pub fn franck_hertz_current(voltage: f64, temperature_c: f64) -> f64 {
    if voltage <= 0.0 || !voltage.is_finite() {
        return 0.0;
    }
    let base = voltage.powf(1.5);
    let depth = DIP_DEPTH * dip_strength(temperature_c);

    let modulation: f64 = franck_hertz_dips(voltage + 4.0 * DIP_WIDTH)
        .map(|center| {
            let x = (voltage - center) / DIP_WIDTH;
            (-0.5 * x * x).exp()
        })
        .sum();

    base * (1.0 - depth * modulation.min(1.0))
}
