//! Particle types and state for the lab simulations

use glam::DVec2;

/// Kind of simulated particle.
///
/// Doubles as the visual category handed to the renderer, hence the fixed
/// discriminants.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    OilDrop = 0,
    Photon = 1,
    Photoelectron = 2,
    ScatteredPhoton = 3,
    RecoilElectron = 4,
    Electron = 5,
}

impl ParticleKind {
    pub fn category(self) -> u32 {
        self as u32
    }
}

/// Where a particle is in its interaction lifecycle.
///
/// A collision does not change the phase: the particle keeps `Traveling`
/// with reduced energy. The other three are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Traveling,
    /// Taken up by a surface (plate, cathode, polarizer). Not recorded.
    Absorbed,
    /// Reached a detector or anode. Recorded by the measurement.
    Detected,
    /// Left the scene or failed the finiteness check.
    Lost,
}

/// A transient simulated particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in scene units
    pub position: DVec2,
    /// Position before the last update, for surface crossing checks
    pub previous_position: DVec2,
    /// Velocity in scene units per second
    pub velocity: DVec2,
    pub kind: ParticleKind,
    pub phase: Phase,
    /// The scalar the experiment is about: charge (e), kinetic energy (eV),
    /// wavelength (pm) or intensity, depending on the kind
    pub scalar: f64,
    /// Secondary per-particle value (drop radius, emission energy, ...)
    pub aux: f64,
    /// Number of inelastic collisions so far
    pub collisions: u32,
    /// Creation time (ms)
    pub created_at: f64,
}

impl Particle {
    pub fn new(kind: ParticleKind, position: DVec2, scalar: f64, created_at: f64) -> Self {
        Self {
            position,
            previous_position: position,
            velocity: DVec2::ZERO,
            kind,
            phase: Phase::Traveling,
            scalar,
            aux: 0.0,
            collisions: 0,
            created_at,
        }
    }

    /// Create an oil drop with `charge` elementary charges and `radius` in meters
    pub fn new_oil_drop(position: DVec2, charge: f64, radius: f64, created_at: f64) -> Self {
        Self {
            aux: radius,
            ..Self::new(ParticleKind::OilDrop, position, charge, created_at)
        }
    }

    /// Create an electron leaving a cathode with `energy` eV
    pub fn new_photoelectron(position: DVec2, energy: f64, created_at: f64) -> Self {
        Self {
            aux: energy,
            ..Self::new(ParticleKind::Photoelectron, position, energy, created_at)
        }
    }

    /// Create a photon of the given wavelength
    pub fn new_photon(position: DVec2, wavelength: f64, created_at: f64) -> Self {
        Self::new(ParticleKind::Photon, position, wavelength, created_at)
    }

    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_aux(mut self, aux: f64) -> Self {
        self.aux = aux;
        self
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Traveling
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    /// Age in milliseconds at time `now`
    pub fn age(&self, now: f64) -> f64 {
        (now - self.created_at).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_are_stable() {
        assert_eq!(ParticleKind::OilDrop.category(), 0);
        assert_eq!(ParticleKind::Photon.category(), 1);
        assert_eq!(ParticleKind::Electron.category(), 5);
    }

    #[test]
    fn test_new_particle_is_traveling() {
        let p = Particle::new_oil_drop(DVec2::new(0.0, 1.0), 3.0, 1.0e-6, 10.0);
        assert!(p.is_active());
        assert!(p.is_finite());
        assert_eq!(p.aux, 1.0e-6);
        assert_eq!(p.previous_position, p.position);
        assert_eq!(p.age(25.0), 15.0);
        assert_eq!(p.age(0.0), 0.0);
    }

    #[test]
    fn test_non_finite_detected() {
        let p = Particle::new_photon(DVec2::ZERO, 500.0, 0.0)
            .with_velocity(DVec2::new(f64::NAN, 0.0));
        assert!(!p.is_finite());
    }
}
