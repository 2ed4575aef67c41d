//! Integrator: scenario -> parameter vector -> trajectory -> vitals series.

use serde::{Deserialize, Serialize};

use crate::error::PhysioError;
use crate::grid::TimeGrid;
use crate::model::{initial_state, CardiovascularModel};
use crate::scenario::ScenarioId;
use crate::solver::{integrate, SolverOptions};
use crate::validation::{clamp_finite, validate_series};

pub const O2_MIN: f64 = 85.0;
pub const O2_MAX: f64 = 100.0;
const O2_NOMINAL: f64 = 98.0;
const O2_BP_THRESHOLD: f64 = 90.0;
const O2_SLOPE: f64 = 0.05;

/// Oxygen-saturation proxy from a single BP sample, always within `[85, 100]`.
pub fn oxygen_saturation(bp: f64) -> f64 {
    let deficit = (O2_BP_THRESHOLD - bp).max(0.0);
    clamp_finite(O2_NOMINAL - O2_SLOPE * deficit, O2_MIN, O2_MAX)
}

/// Four aligned series, one sample per grid point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub time: Vec<f64>,
    pub blood_pressure: Vec<f64>,
    pub heart_rate: Vec<f64>,
    pub oxygen_saturation: Vec<f64>,
}

/// Last sample of each vital.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalVitals {
    pub blood_pressure: f64,
    pub heart_rate: f64,
    pub oxygen_saturation: f64,
}

impl SimulationResult {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// `None` if any of the three vitals series is empty.
    pub fn final_vitals(&self) -> Option<FinalVitals> {
        Some(FinalVitals {
            blood_pressure: *self.blood_pressure.last()?,
            heart_rate: *self.heart_rate.last()?,
            oxygen_saturation: *self.oxygen_saturation.last()?,
        })
    }

    /// BLAKE3 over the bit patterns of every sample, series in field order.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        for series in [&self.time, &self.blood_pressure, &self.heart_rate, &self.oxygen_saturation] {
            hasher.update(&(series.len() as u64).to_le_bytes());
            for v in series {
                hasher.update(&v.to_bits().to_le_bytes());
            }
        }
        *hasher.finalize().as_bytes()
    }
}

/// Runs the model on the standard grid with configurable solver tolerances.
#[derive(Debug, Clone, Default)]
pub struct Integrator {
    pub options: SolverOptions,
}

impl Integrator {
    pub fn new(options: SolverOptions) -> Self {
        Self { options }
    }

    pub fn simulate(&self, scenario: ScenarioId) -> Result<SimulationResult, PhysioError> {
        let params = scenario.parameters();
        let model = CardiovascularModel::new(params);
        let grid = TimeGrid::standard();

        let solution = integrate(model, initial_state(), &grid, &self.options)?;
        log::debug!(
            "simulated {scenario}: {} samples, {} steps accepted, {} rejected",
            solution.states.len(),
            solution.stats.accepted,
            solution.stats.rejected
        );

        let blood_pressure: Vec<f64> = solution.states.iter().map(|s| s[0]).collect();
        let heart_rate: Vec<f64> = solution.states.iter().map(|s| s[1]).collect();
        validate_series("blood_pressure", &blood_pressure)?;
        validate_series("heart_rate", &heart_rate)?;
        let oxygen_saturation = blood_pressure.iter().map(|&bp| oxygen_saturation(bp)).collect();

        Ok(SimulationResult {
            time: grid.into_vec(),
            blood_pressure,
            heart_rate,
            oxygen_saturation,
        })
    }
}

/// Simulate `scenario` with the default solver tolerances.
pub fn simulate(scenario: ScenarioId) -> Result<SimulationResult, PhysioError> {
    Integrator::default().simulate(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn o2_formula_and_clamp() {
        assert_eq!(oxygen_saturation(120.0), 98.0);
        assert_eq!(oxygen_saturation(90.0), 98.0);
        assert!(close(oxygen_saturation(70.0), 97.0, 1e-12));
        // deficit of 260 would give 85 exactly, beyond that it clamps
        assert!(close(oxygen_saturation(-170.0), 85.0, 1e-12));
        assert_eq!(oxygen_saturation(-1000.0), 85.0);
    }

    #[test]
    fn series_are_aligned_on_standard_grid() {
        for s in ScenarioId::ALL {
            let r = simulate(s).unwrap();
            assert_eq!(r.len(), 200);
            assert_eq!(r.blood_pressure.len(), 200);
            assert_eq!(r.heart_rate.len(), 200);
            assert_eq!(r.oxygen_saturation.len(), 200);
            assert_eq!(r.time[0], 0.0);
            assert_eq!(r.time[199], 60.0);
            assert_eq!((r.blood_pressure[0], r.heart_rate[0]), (120.0, 75.0));
            assert!(r.oxygen_saturation.iter().all(|o| (85.0..=100.0).contains(o)));
            assert!(r.blood_pressure.iter().chain(&r.heart_rate).all(|v| v.is_finite()));
        }
    }

    #[test]
    fn matches_reference_values() {
        // reference from a fixed-step RK4 with 200 substeps per output interval
        let cases = [
            (ScenarioId::Baseline, 59.057210082680676, 127.87395935541224, 67.6381500527602, 136.28559186051248),
            (ScenarioId::Stroke, 46.45783016842561, 142.64932398102366, 54.94578555164655, 159.88556331012015),
            (ScenarioId::Hypertension, 80.61826862608663, 134.2326156783084, 88.24413417337458, 135.53947126220473),
            (ScenarioId::Hemorrhage, 56.00127390420117, 132.5494451209255, 65.1579715407839, 141.3695494159086),
        ];
        for (s, bp_mid, hr_mid, bp_end, hr_end) in cases {
            let r = simulate(s).unwrap();
            assert!(close(r.blood_pressure[100], bp_mid, 1e-4), "{s} bp[100]");
            assert!(close(r.heart_rate[100], hr_mid, 1e-4), "{s} hr[100]");
            assert!(close(r.blood_pressure[199], bp_end, 1e-4), "{s} bp[199]");
            assert!(close(r.heart_rate[199], hr_end, 1e-4), "{s} hr[199]");
        }
    }

    #[test]
    fn hemorrhage_drains_bp_and_raises_hr() {
        let base = simulate(ScenarioId::Baseline).unwrap();
        let hem = simulate(ScenarioId::Hemorrhage).unwrap();
        let drop = |r: &SimulationResult| r.blood_pressure[0] - r.blood_pressure[199];
        assert!(drop(&hem) > drop(&base));
        assert!(hem.heart_rate[199] > base.heart_rate[199]);
        assert!(hem.blood_pressure[1..].iter().zip(&base.blood_pressure[1..]).all(|(h, b)| h < b));
    }

    #[test]
    fn scenarios_diverge_from_baseline() {
        let base = simulate(ScenarioId::Baseline).unwrap();
        for s in [ScenarioId::Stroke, ScenarioId::Hemorrhage, ScenarioId::Hypertension] {
            let r = simulate(s).unwrap();
            assert_eq!(r.len(), base.len());
            assert_ne!(r.blood_pressure, base.blood_pressure, "{s}");
        }
        assert!(simulate(ScenarioId::Hypertension).unwrap().blood_pressure[199] > base.blood_pressure[199]);
        assert!(simulate(ScenarioId::Stroke).unwrap().blood_pressure[199] < base.blood_pressure[199]);
    }

    #[test]
    fn unrecognized_name_equals_baseline() {
        let unknown = simulate(ScenarioId::from_name("anything-unrecognized")).unwrap();
        let base = simulate(ScenarioId::Baseline).unwrap();
        assert_eq!(unknown, base);
    }

    #[test]
    fn too_tight_budget_surfaces_numerical_failure() {
        let integrator = Integrator::new(SolverOptions { max_steps: 1, h_max: 1e-3, ..SolverOptions::default() });
        let err = integrator.simulate(ScenarioId::Stroke).unwrap_err();
        assert!(err.is_numerical());
    }

    #[test]
    fn final_vitals_and_empty() {
        let r = SimulationResult {
            time: vec![0.0],
            blood_pressure: vec![101.0],
            heart_rate: vec![80.0],
            oxygen_saturation: vec![98.0],
        };
        let f = r.final_vitals().unwrap();
        assert_eq!((f.blood_pressure, f.heart_rate, f.oxygen_saturation), (101.0, 80.0, 98.0));
        assert!(SimulationResult::default().final_vitals().is_none());
    }

    #[test]
    fn json_field_names() {
        let r = simulate(ScenarioId::Baseline).unwrap();
        let v = serde_json::to_value(&r).unwrap();
        for key in ["time", "blood_pressure", "heart_rate", "oxygen_saturation"] {
            assert_eq!(v[key].as_array().map(|a| a.len()), Some(200), "{key}");
        }
    }
}
