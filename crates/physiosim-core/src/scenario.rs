//! Scenario identifiers and their fixed parameter vectors.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Five-scalar parameterization of the cardiovascular model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterVector {
    /// HR-driven perfusion gain on dBP/dt.
    pub k1: f64,
    /// BP-deviation gain on dHR/dt.
    pub k2: f64,
    /// BP the HR feedback loop regulates toward.
    pub set_point: f64,
    /// Vascular resistance multiplier on the HR -> BP coupling.
    pub resistance: f64,
    /// Constant drain on dBP/dt.
    pub blood_loss: f64,
}

impl ParameterVector {
    pub const BASELINE: ParameterVector = ParameterVector {
        k1: 0.05,
        k2: 0.1,
        set_point: 100.0,
        resistance: 1.0,
        blood_loss: 0.0,
    };
}

impl Default for ParameterVector {
    fn default() -> Self {
        Self::BASELINE
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioId {
    Stroke,
    Hemorrhage,
    Hypertension,
    #[default]
    Baseline,
}

impl ScenarioId {
    pub const ALL: [ScenarioId; 4] = [
        ScenarioId::Stroke,
        ScenarioId::Hemorrhage,
        ScenarioId::Hypertension,
        ScenarioId::Baseline,
    ];

    /// Exact-match lookup. Anything that is not a known scenario name is baseline.
    pub fn from_name(name: &str) -> Self {
        match name {
            "stroke" => ScenarioId::Stroke,
            "hemorrhage" => ScenarioId::Hemorrhage,
            "hypertension" => ScenarioId::Hypertension,
            "default" | "baseline" => ScenarioId::Baseline,
            other => {
                log::warn!("unrecognized scenario {other:?}, using baseline parameters");
                ScenarioId::Baseline
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioId::Stroke => "stroke",
            ScenarioId::Hemorrhage => "hemorrhage",
            ScenarioId::Hypertension => "hypertension",
            ScenarioId::Baseline => "baseline",
        }
    }

    /// Parameter table. Adding a variant without a row here does not compile.
    pub fn parameters(&self) -> ParameterVector {
        let base = ParameterVector::BASELINE;
        match self {
            ScenarioId::Stroke => ParameterVector { resistance: 0.7, ..base },
            ScenarioId::Hemorrhage => ParameterVector { blood_loss: 0.5, ..base },
            ScenarioId::Hypertension => ParameterVector {
                set_point: 120.0,
                resistance: 1.3,
                ..base
            },
            ScenarioId::Baseline => base,
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ScenarioId::from_name(s))
    }
}

impl From<&str> for ScenarioId {
    fn from(s: &str) -> Self {
        ScenarioId::from_name(s)
    }
}
