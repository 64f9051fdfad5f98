//! Drag-dominated force laws
//!
//! Every experiment here lives in a regime where the drag (or the retarding
//! field) settles a particle onto its terminal velocity long before anything
//! visible happens. Velocities are therefore solved directly from
//! `driving / drag` instead of integrating F = ma, which also keeps the
//! microscopic force-to-mass ratios from blowing up the integration.

use crate::constants::*;
use glam::DVec2;
use std::f64::consts::PI;

/// Steady-state velocity under linear drag
/// v = F / b
///
/// A zero or non-finite drag coefficient gives no velocity contribution.
pub fn terminal_velocity(driving: DVec2, drag: f64) -> DVec2 {
    if drag == 0.0 || !drag.is_finite() {
        return DVec2::ZERO;
    }
    let v = driving / drag;
    if v.is_finite() {
        v
    } else {
        DVec2::ZERO
    }
}

/// Stokes drag coefficient of a sphere in air
/// b = 6πηr
pub fn stokes_drag(radius: f64) -> f64 {
    6.0 * PI * AIR_VISCOSITY * radius
}

/// Weight of a drop minus the buoyancy of the displaced air (N)
pub fn effective_weight(radius: f64) -> f64 {
    4.0 / 3.0 * PI * radius.powi(3) * (OIL_DENSITY - AIR_DENSITY) * GRAVITY
}

/// Uniform field between parallel plates
/// E = V / d
pub fn plate_field(voltage: f64, separation: f64) -> f64 {
    if separation == 0.0 {
        return 0.0;
    }
    voltage / separation
}

/// Vertical drift velocity of a charged drop (m/s, positive is up)
/// v = (qE - W_eff) / 6πηr
pub fn millikan_drift(charge: f64, radius: f64, field: f64) -> f64 {
    let driving = DVec2::new(0.0, charge * E_CHARGE * field - effective_weight(radius));
    terminal_velocity(driving, stokes_drag(radius)).y
}

/// Plate voltage that holds a drop still
/// V = W_eff d / q
pub fn balancing_voltage(charge: f64, radius: f64, separation: f64) -> Option<f64> {
    if charge == 0.0 {
        return None;
    }
    Some(effective_weight(radius) * separation / (charge * E_CHARGE))
}

/// Charge (in e) recovered from an observed drift velocity, the way the
/// experiment is actually evaluated
/// q = (W_eff + 6πηr v) / E
pub fn inferred_charge(radius: f64, drift: f64, field: f64) -> Option<f64> {
    if field == 0.0 || !field.is_finite() {
        return None;
    }
    let q = (effective_weight(radius) + stokes_drag(radius) * drift) / (field * E_CHARGE);
    q.is_finite().then_some(q)
}

/// Brownian diffusion coefficient (Stokes–Einstein)
/// D = kT / 6πηr
pub fn diffusion_coefficient(radius: f64, temperature_c: f64) -> f64 {
    let drag = stokes_drag(radius);
    if drag == 0.0 {
        return 0.0;
    }
    K_BOLTZMANN * (temperature_c + CELSIUS_OFFSET).max(0.0) / drag
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_velocity_zero_drag() {
        assert_eq!(terminal_velocity(DVec2::new(1.0, 2.0), 0.0), DVec2::ZERO);
        assert_eq!(terminal_velocity(DVec2::new(1.0, 2.0), f64::NAN), DVec2::ZERO);
        assert_eq!(terminal_velocity(DVec2::new(4.0, 2.0), 2.0), DVec2::new(2.0, 1.0));
    }

    #[test]
    fn test_uncharged_drop_falls() {
        let v = millikan_drift(0.0, 1.0e-6, 0.0);
        assert!(v < 0.0);
        // ~0.1 mm/s for a one micron drop
        assert!((v.abs() - 1.07e-4).abs() < 1.0e-5, "{v}");
    }

    #[test]
    fn test_balancing_voltage_holds_drop() {
        let radius = 1.2e-6;
        let charge = 4.0;
        let v = balancing_voltage(charge, radius, PLATE_SEPARATION).unwrap();
        let drift = millikan_drift(charge, radius, plate_field(v, PLATE_SEPARATION));
        assert!(drift.abs() < 1.0e-15, "{drift}");
        assert!(balancing_voltage(0.0, radius, PLATE_SEPARATION).is_none());
    }

    #[test]
    fn test_inferred_charge_matches() {
        let radius = 0.8e-6;
        let field = plate_field(300.0, PLATE_SEPARATION);
        let drift = millikan_drift(5.0, radius, field);
        let q = inferred_charge(radius, drift, field).unwrap();
        assert!((q - 5.0).abs() < 1.0e-9, "{q}");
        assert!(inferred_charge(radius, drift, 0.0).is_none());
    }

    #[test]
    fn test_diffusion_grows_with_temperature() {
        let cold = diffusion_coefficient(1.0e-6, 0.0);
        let hot = diffusion_coefficient(1.0e-6, 100.0);
        assert!(hot > cold);
        assert_eq!(diffusion_coefficient(0.0, 20.0), 0.0);
    }
}
