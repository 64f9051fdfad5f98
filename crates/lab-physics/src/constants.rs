//! Physical constants for the lab experiments
//!
//! SI values where the experiment works in SI, and the usual "demo" units
//! (eV, nm, pm) where the classroom formulas are written in them.

/// Elementary charge (C)
pub const E_CHARGE: f64 = 1.602_176_634e-19;

/// Boltzmann constant (J/K)
pub const K_BOLTZMANN: f64 = 1.380_649e-23;

/// Speed of light (m/s)
pub const C: f64 = 2.997_924_58e8;

/// Standard gravity (m/s²)
pub const GRAVITY: f64 = 9.81;

/// Planck constant times speed of light in eV·nm.
/// Same number in keV·pm, which is what the Compton formulas use.
pub const HC_EV_NM: f64 = 1240.0;

/// Compton wavelength of the electron (pm)
pub const COMPTON_WAVELENGTH_PM: f64 = 2.43;

/// Offset between 0 °C and absolute zero
pub const CELSIUS_OFFSET: f64 = 273.15;

// Millikan oil-drop apparatus

/// Dynamic viscosity of air at room temperature (Pa·s)
pub const AIR_VISCOSITY: f64 = 1.81e-5;

/// Density of air (kg/m³)
pub const AIR_DENSITY: f64 = 1.204;

/// Density of the oil used for the drops (kg/m³)
pub const OIL_DENSITY: f64 = 886.0;

/// Separation of the capacitor plates (m)
pub const PLATE_SEPARATION: f64 = 5.0e-3;

// Franck–Hertz tube

/// First excitation energy of mercury (eV)
pub const MERCURY_EXCITATION_EV: f64 = 4.9;

/// Contact potential between cathode and grid (V).
/// Shifts every current dip upward by this amount.
pub const CONTACT_POTENTIAL: f64 = 2.0;

/// Oven temperature with the strongest dips (°C)
pub const PEAK_DIP_TEMPERATURE: f64 = 180.0;

/// Width of the temperature window around the peak (°C)
pub const DIP_TEMPERATURE_WIDTH: f64 = 40.0;

/// Gaussian width of each current dip (V)
pub const DIP_WIDTH: f64 = 0.5;

/// Fraction of the current removed at the bottom of a dip at peak strength
pub const DIP_DEPTH: f64 = 0.6;

/// Work functions (eV) of the cathode metals offered by the photoelectric demo
pub const WORK_FUNCTIONS: [(&str, f64); 6] = [
    ("sodium", 2.28),
    ("potassium", 2.30),
    ("calcium", 2.87),
    ("zinc", 4.33),
    ("copper", 4.70),
    ("platinum", 6.35),
];
