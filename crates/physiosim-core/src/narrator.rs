//! Templated natural-language summary of a simulation run.

use serde::{Deserialize, Serialize};

use crate::error::PhysioError;
use crate::scenario::ScenarioId;
use crate::simulate::{FinalVitals, Integrator, SimulationResult};

/// Summarize the final BP, HR and O2 sample of `result` for `scenario`.
pub fn explain(scenario: ScenarioId, result: &SimulationResult) -> Result<String, PhysioError> {
    let v = result.final_vitals().ok_or(PhysioError::EmptyResult)?;
    Ok(render(scenario, &v))
}

fn render(scenario: ScenarioId, v: &FinalVitals) -> String {
    let (bp, hr, o2) = (v.blood_pressure, v.heart_rate, v.oxygen_saturation);
    match scenario {
        ScenarioId::Stroke => format!(
            "In a stroke simulation, resistance dropped, lowering blood pressure to about {bp:.1} mmHg. \
             Heart rate compensated to ~{hr:.1} bpm. Oxygen saturation dropped to {o2:.1}%."
        ),
        ScenarioId::Hypertension => format!(
            "Blood pressure stabilized higher at {bp:.1} mmHg, heart rate ~{hr:.1} bpm. \
             O₂ remained {o2:.1}%."
        ),
        ScenarioId::Hemorrhage => format!(
            "Blood loss dropped BP to {bp:.1} mmHg. Heart rate rose to {hr:.1} bpm. \
             O₂ dropped to {o2:.1}%."
        ),
        ScenarioId::Baseline => {
            format!("Vitals stable: BP {bp:.1} mmHg, HR {hr:.1} bpm, O₂ {o2:.1}%.")
        }
    }
}

/// A full run: series plus its summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub scenario: ScenarioId,
    #[serde(flatten)]
    pub result: SimulationResult,
    pub explanation: String,
}

impl Integrator {
    /// Simulate then explain.
    pub fn report(&self, scenario: ScenarioId) -> Result<ScenarioReport, PhysioError> {
        let result = self.simulate(scenario)?;
        let explanation = explain(scenario, &result)?;
        Ok(ScenarioReport { scenario, result, explanation })
    }
}

pub fn report(scenario: ScenarioId) -> Result<ScenarioReport, PhysioError> {
    Integrator::default().report(scenario)
}
