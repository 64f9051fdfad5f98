//! The experiments shipped with the engine
//!
//! Each is a stateless unit struct implementing [`crate::Experiment`].

mod compton;
mod double_slit;
mod franck_hertz;
mod malus;
mod michelson;
mod millikan;
mod photoelectric;

pub use compton::Compton;
pub use double_slit::DoubleSlit;
pub use franck_hertz::FranckHertz;
pub use malus::Malus;
pub use michelson::Michelson;
pub use millikan::Millikan;
pub use photoelectric::Photoelectric;

/// `true` when a particle moving from `from` to `to` crossed the line at
/// `at` in the increasing direction
pub(crate) fn crossed(from: f64, to: f64, at: f64) -> bool {
    from < at && to >= at
}
