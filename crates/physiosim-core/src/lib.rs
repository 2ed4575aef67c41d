//! PhysioSim core: scenario table, cardiovascular ODE model, adaptive
//! integration, and the narrated summary of a run.

pub mod error;
pub mod scenario;
pub mod grid;
pub mod solver;
pub mod model;
pub mod validation;
pub mod simulate;
pub mod narrator;
pub mod config;
#[cfg(feature = "legacy")]
pub mod legacy;

pub use error::*;
pub use scenario::*;
pub use grid::*;
pub use solver::*;
pub use model::*;
pub use validation::*;
pub use simulate::*;
pub use narrator::*;
pub use self::config::*;

#[cfg(test)]
mod tests_determinism;
#[cfg(test)]
mod tests_config;
