//! Closed-form optics: refraction, diffraction, polarization and the
//! Michelson–Morley interferometer

use crate::constants::C;
use glam::DVec2;
use std::f64::consts::PI;

/// Refraction angle from Snell's law
/// n1 sin θ1 = n2 sin θ2
///
/// Returns `None` on total internal reflection or a non-physical index.
pub fn snell_refraction_angle(n1: f64, n2: f64, incidence: f64) -> Option<f64> {
    if n1 <= 0.0 || n2 <= 0.0 {
        return None;
    }
    let s = n1 / n2 * incidence.sin();
    (s.abs() <= 1.0).then(|| s.asin())
}

/// Critical angle for total internal reflection going from `n1` into `n2`
pub fn critical_angle(n1: f64, n2: f64) -> Option<f64> {
    (n1 > n2 && n2 > 0.0).then(|| (n2 / n1).asin())
}

/// Fastest route from `start` (above the interface y = 0, speed `v1`) to
/// `end` (below it, speed `v2`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeastTimePath {
    /// Where the path crosses the interface
    pub crossing: DVec2,
    /// Total travel time
    pub time: f64,
}

/// Travel time through the interface at `x`
fn travel_time(start: DVec2, end: DVec2, x: f64, v1: f64, v2: f64) -> f64 {
    let p = DVec2::new(x, 0.0);
    start.distance(p) / v1 + p.distance(end) / v2
}

/// Fermat's principle by golden-section search over the crossing point.
/// The travel time is convex in the crossing coordinate, so this converges
/// to the same point Snell's law predicts.
pub fn least_time_path(start: DVec2, end: DVec2, v1: f64, v2: f64) -> Option<LeastTimePath> {
    if v1 <= 0.0 || v2 <= 0.0 || !start.is_finite() || !end.is_finite() {
        return None;
    }
    const INV_PHI: f64 = 0.618_033_988_749_895;

    let (mut lo, mut hi) = (start.x.min(end.x), start.x.max(end.x));
    for _ in 0..200 {
        if hi - lo < 1e-12 {
            break;
        }
        let a = hi - INV_PHI * (hi - lo);
        let b = lo + INV_PHI * (hi - lo);
        if travel_time(start, end, a, v1, v2) < travel_time(start, end, b, v1, v2) {
            hi = b;
        } else {
            lo = a;
        }
    }

    let x = 0.5 * (lo + hi);
    Some(LeastTimePath {
        crossing: DVec2::new(x, 0.0),
        time: travel_time(start, end, x, v1, v2),
    })
}

/// sin(x)/x with the removable singularity filled in
fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-12 {
        1.0
    } else {
        x.sin() / x
    }
}

/// Angle subtended by a point `y` on a screen at `distance`
fn screen_sine(y: f64, distance: f64) -> f64 {
    let r = y.hypot(distance);
    if r == 0.0 {
        0.0
    } else {
        y / r
    }
}

/// Relative single-slit intensity (0..1) at height `y` on the screen.
/// All lengths in the same unit.
pub fn single_slit_intensity(y: f64, wavelength: f64, width: f64, distance: f64) -> f64 {
    if wavelength <= 0.0 {
        return 0.0;
    }
    let beta = PI * width * screen_sine(y, distance) / wavelength;
    sinc(beta).powi(2)
}

/// Relative double-slit intensity (0..1): two-slit interference under the
/// single-slit envelope
pub fn double_slit_intensity(
    y: f64,
    wavelength: f64,
    separation: f64,
    width: f64,
    distance: f64,
) -> f64 {
    if wavelength <= 0.0 {
        return 0.0;
    }
    let alpha = PI * separation * screen_sine(y, distance) / wavelength;
    alpha.cos().powi(2) * single_slit_intensity(y, wavelength, width, distance)
}

/// Distance between bright fringes in the small-angle limit
/// Δy = λL / d
pub fn fringe_spacing(wavelength: f64, distance: f64, separation: f64) -> f64 {
    if separation <= 0.0 {
        return 0.0;
    }
    wavelength * distance / separation
}

/// Malus's law transmission through a polarizer at `angle` to the light
/// I / I0 = cos²θ
pub fn malus_transmission(angle: f64) -> f64 {
    angle.cos().powi(2)
}

/// Largest fringe shift the interferometer should see when rotated by 90°
/// N = 2 L v² / (λ c²)
pub fn michelson_max_shift(arm_length: f64, wavelength: f64, ether_speed: f64) -> f64 {
    if wavelength <= 0.0 {
        return 0.0;
    }
    2.0 * arm_length * ether_speed * ether_speed / (wavelength * C * C)
}

/// Fringe shift at apparatus angle `angle` (rad), the visual model of the
/// demo: the expected amplitude modulated by cos 2θ
pub fn michelson_fringe_shift(
    arm_length: f64,
    wavelength: f64,
    ether_speed: f64,
    angle: f64,
) -> f64 {
    michelson_max_shift(arm_length, wavelength, ether_speed) * (2.0 * angle).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snell_air_to_glass() {
        let theta2 = snell_refraction_angle(1.0, 1.5, 30f64.to_radians()).unwrap();
        assert!((theta2.sin() - 0.5 / 1.5).abs() < 1e-12);
        let same = snell_refraction_angle(1.0, 1.0, 0.3).unwrap();
        assert!((same - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_total_internal_reflection() {
        assert!(snell_refraction_angle(1.5, 1.0, 60f64.to_radians()).is_none());
        let crit = critical_angle(1.5, 1.0).unwrap();
        assert!(snell_refraction_angle(1.5, 1.0, crit - 1e-6).is_some());
        assert!(critical_angle(1.0, 1.5).is_none());
    }

    #[test]
    fn test_least_time_obeys_snell() {
        let start = DVec2::new(-1.0, 1.0);
        let end = DVec2::new(2.0, -1.5);
        let (v1, v2) = (1.0, 1.0 / 1.33);
        let path = least_time_path(start, end, v1, v2).unwrap();

        let sin1 = (path.crossing.x - start.x) / start.distance(path.crossing);
        let sin2 = (end.x - path.crossing.x) / path.crossing.distance(end);
        assert!((sin1 / v1 - sin2 / v2).abs() < 1e-6, "{sin1} {sin2}");

        // equal speeds go straight
        let straight = least_time_path(start, end, 1.0, 1.0).unwrap();
        let expected_x = start.x + (end.x - start.x) * start.y / (start.y - end.y);
        assert!((straight.crossing.x - expected_x).abs() < 1e-6);
        assert!(least_time_path(start, end, 0.0, 1.0).is_none());
    }

    #[test]
    fn test_slit_center_is_brightest() {
        assert_eq!(single_slit_intensity(0.0, 500e-9, 20e-6, 1.0), 1.0);
        assert_eq!(double_slit_intensity(0.0, 500e-9, 100e-6, 20e-6, 1.0), 1.0);
        // first single-slit minimum at sinθ = λ/a
        let y = 1.0 * (500e-9 / 20e-6) / (1.0 - (500e-9f64 / 20e-6).powi(2)).sqrt();
        assert!(single_slit_intensity(y, 500e-9, 20e-6, 1.0) < 1e-12);
    }

    #[test]
    fn test_double_slit_dark_fringe() {
        let spacing = fringe_spacing(500e-9, 1.0, 100e-6);
        assert!((spacing - 5e-3).abs() < 1e-12);
        let dark = double_slit_intensity(spacing / 2.0, 500e-9, 100e-6, 20e-6, 1.0);
        assert!(dark < 1e-3, "{dark}");
        assert_eq!(fringe_spacing(500e-9, 1.0, 0.0), 0.0);
    }

    #[test]
    fn test_malus() {
        assert_eq!(malus_transmission(0.0), 1.0);
        assert!((malus_transmission(60f64.to_radians()) - 0.25).abs() < 1e-12);
        assert!(malus_transmission(std::f64::consts::FRAC_PI_2) < 1e-30);
    }

    #[test]
    fn test_michelson_expected_shift() {
        // The original 1887 apparatus: 11 m arms, 500 nm light, 30 km/s
        let n = michelson_max_shift(11.0, 500e-9, 3.0e4);
        assert!((n - 0.44).abs() < 0.01, "{n}");
        let quarter = michelson_fringe_shift(11.0, 500e-9, 3.0e4, std::f64::consts::FRAC_PI_4);
        assert!(quarter.abs() < 1e-12);
        let turned = michelson_fringe_shift(11.0, 500e-9, 3.0e4, std::f64::consts::FRAC_PI_2);
        assert!((turned + n).abs() < 1e-12);
    }
}
