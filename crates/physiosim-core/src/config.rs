use std::path::Path;

use serde::Deserialize;

use crate::error::PhysioError;
use crate::solver::SolverOptions;

pub const ENV_PREFIX: &str = "PHYSIOSIM";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8000 }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(feature = "legacy")]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LegacyConfig {
    pub default_samples: usize,
    pub max_samples: usize,
}

#[cfg(feature = "legacy")]
impl Default for LegacyConfig {
    fn default() -> Self {
        Self { default_samples: 10, max_samples: 1000 }
    }
}

/// Settings for the hosting layers. `simulate` itself reads none of this.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub solver: SolverOptions,
    #[cfg(feature = "legacy")]
    pub legacy: LegacyConfig,
}

impl AppConfig {
    /// Layered load: optional file, then `PHYSIOSIM__SECTION__KEY` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, PhysioError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));
        let cfg: AppConfig = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), PhysioError> {
        self.solver
            .validate()
            .map_err(|e| PhysioError::InvalidConfig(e.to_string()))?;
        #[cfg(feature = "legacy")]
        if self.legacy.default_samples == 0 || self.legacy.default_samples > self.legacy.max_samples {
            return Err(PhysioError::InvalidConfig(
                "legacy.default_samples must be in 1..=legacy.max_samples".into(),
            ));
        }
        Ok(())
    }

    pub fn from_toml_str(s: &str) -> Result<Self, PhysioError> {
        let cfg: AppConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }
}
