//! Read-only projection of the simulation for an external renderer
//!
//! The engine never draws. Each tick it produces a [`RenderSnapshot`]; the
//! host hands it to whatever implements [`DrawAdapter`] (a canvas, a wgpu
//! pass, a log line).

use crate::Event;
use bytemuck::{Pod, Zeroable};

/// GPU-compatible per-particle instance.
/// 16 bytes, matches a `vec2<f32>, u32, f32` WGSL struct.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleView {
    /// Position in scene units
    pub position: [f32; 2],
    /// Visual category, see `lab_physics::ParticleKind`
    pub category: u32,
    /// Opacity / brightness hint (0..1)
    pub intensity: f32,
}

/// A derived number the renderer may want to print (threshold energy,
/// computed shift, ...)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayScalar {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub value: f64,
}

impl DisplayScalar {
    pub fn new(key: &'static str, label: &'static str, unit: &'static str, value: f64) -> Self {
        Self {
            key,
            label,
            unit,
            value,
        }
    }
}

/// Post-tick state of the simulation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderSnapshot {
    pub tick: u64,
    /// Host timestamp of the tick (ms)
    pub time_ms: f64,
    /// Active particles in pool order
    pub particles: Vec<ParticleView>,
    /// Smoothed measurement
    pub measurement: f64,
    /// Unsmoothed windowed value
    pub instantaneous: f64,
    /// Events produced during this tick, for flashes and hit marks
    pub events: Vec<Event>,
    pub display: Vec<DisplayScalar>,
}

impl RenderSnapshot {
    pub fn display_value(&self, key: &str) -> Option<f64> {
        self.display.iter().find(|d| d.key == key).map(|d| d.value)
    }

    /// Particle instances as raw bytes for a vertex/storage buffer upload
    pub fn particle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.particles)
    }
}

/// Consumer of render snapshots
pub trait DrawAdapter {
    fn draw(&mut self, snapshot: &RenderSnapshot);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_view_layout() {
        assert_eq!(std::mem::size_of::<ParticleView>(), 16);
        let snapshot = RenderSnapshot {
            particles: vec![ParticleView::zeroed(); 3],
            ..Default::default()
        };
        assert_eq!(snapshot.particle_bytes().len(), 48);
    }

    #[test]
    fn test_display_lookup() {
        let snapshot = RenderSnapshot {
            display: vec![DisplayScalar::new("shift", "Shift", "pm", 0.7)],
            ..Default::default()
        };
        assert_eq!(snapshot.display_value("shift"), Some(0.7));
        assert_eq!(snapshot.display_value("phase"), None);
    }
}
