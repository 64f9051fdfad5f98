//! # Lab Physics
//!
//! Closed-form models behind the lab experiments: drag-dominated force laws,
//! photon and electron energetics, and optics. Everything here is a pure
//! function of its inputs; randomness and state live in `lab-simulation`.

pub mod constants;
pub mod forces;
pub mod optics;
pub mod particle;
pub mod quantum;

pub use constants::*;
pub use forces::*;
pub use optics::*;
pub use particle::*;
pub use quantum::*;
