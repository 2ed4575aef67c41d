use thiserror::Error;

use crate::solver::SolverError;

/// Errors surfaced by the integrator, the narrator and the config layer.
#[derive(Debug, Error)]
pub enum PhysioError {
    #[error("numerical failure: {0}")]
    NumericalFailure(#[from] SolverError),
    #[error("non-finite {series} sample at index {index}")]
    NonFiniteSample { series: &'static str, index: usize },
    #[error("simulation result has no samples")]
    EmptyResult,
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("config toml error: {0}")]
    ConfigToml(#[from] toml::de::Error),
    #[cfg(feature = "legacy")]
    #[error("invalid legacy request: {0}")]
    InvalidLegacyRequest(String),
}

impl PhysioError {
    /// True for failures of the numerical integration itself.
    pub fn is_numerical(&self) -> bool {
        matches!(self, PhysioError::NumericalFailure(_) | PhysioError::NonFiniteSample { .. })
    }
}
