//! # Lab Simulation Engine
//!
//! Frame-driven particle simulation and measurement for interactive physics
//! experiments. Each frame the host calls [`Simulation::tick`]; particles are
//! moved by the experiment's force model, stochastic events fire, detector
//! hits feed a smoothed measurement, and a [`RenderSnapshot`] comes out for
//! whatever draws the scene.

pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod experiment;
pub mod experiments;
pub mod force;
pub mod measurement;
pub mod params;
pub mod pool;
pub mod simulation;
pub mod snapshot;
pub mod stochastic;

pub use clock::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use experiment::*;
pub use force::*;
pub use measurement::*;
pub use params::*;
pub use pool::*;
pub use simulation::*;
pub use snapshot::*;
pub use stochastic::*;
