//! Adaptive Dormand–Prince 5(4) integration sampled on a fixed output grid.
//!
//! Stepping and dense output come from `ode_solvers::dopri5`. The solver is
//! run slightly past the last grid point so that floating-point accumulation
//! of the output stride can never drop the endpoint.

use ode_solvers::dop_shared::OutputType;
use ode_solvers::dopri5::Dopri5;
use ode_solvers::System;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::TimeGrid;
use crate::model::StateVector;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("invalid solver options: {0}")]
    InvalidOptions(String),
    #[error("integration failed: {0}")]
    Integration(String),
    #[error("solver produced {got} samples, expected {expected}")]
    MissingSamples { expected: usize, got: usize },
    #[error("non-finite state at t={t:.6e}")]
    NonFinite { t: f64 },
}

/// Tolerances and step bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    pub rtol: f64,
    pub atol: f64,
    /// Upper bound on the step size; infinite means the whole horizon.
    pub h_max: f64,
    /// Step budget for the whole run.
    pub max_steps: u32,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            rtol: 1.49012e-8,
            atol: 1.49012e-8,
            h_max: f64::INFINITY,
            max_steps: 100_000,
        }
    }
}

impl SolverOptions {
    pub fn validate(&self) -> Result<(), SolverError> {
        if !self.rtol.is_finite() || self.rtol <= 0.0 {
            return Err(SolverError::InvalidOptions("rtol must be finite and > 0".into()));
        }
        if !self.atol.is_finite() || self.atol <= 0.0 {
            return Err(SolverError::InvalidOptions("atol must be finite and > 0".into()));
        }
        if self.h_max.is_nan() || self.h_max <= 0.0 {
            return Err(SolverError::InvalidOptions("h_max must be > 0".into()));
        }
        if self.max_steps == 0 {
            return Err(SolverError::InvalidOptions("max_steps must be > 0".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    pub accepted: u32,
    pub rejected: u32,
    pub rhs_evals: u32,
}

/// One state per grid point, in grid order.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub states: Vec<StateVector>,
    pub stats: SolverStats,
}

// Hairer's defaults for DOPRI5
const SAFETY: f64 = 0.9;
const BETA: f64 = 0.04;
const FAC_MIN: f64 = 0.2;
const FAC_MAX: f64 = 10.0;
const STIFFNESS_CHECK: u32 = 1000;

/// Integrate `sys` from `y0` at the first grid point and sample every grid point.
pub fn integrate<S>(
    sys: S,
    y0: StateVector,
    grid: &TimeGrid,
    opts: &SolverOptions,
) -> Result<Solution, SolverError>
where
    S: System<f64, StateVector>,
{
    opts.validate()?;
    if y0.iter().any(|v| !v.is_finite()) {
        return Err(SolverError::NonFinite { t: grid.points().first().copied().unwrap_or(0.0) });
    }
    let (start, step) = match (grid.points().first(), grid.step()) {
        (None, _) => return Ok(Solution { states: Vec::new(), stats: SolverStats::default() }),
        (Some(_), None) => return Ok(Solution { states: vec![y0], stats: SolverStats::default() }),
        (Some(&start), Some(step)) => (start, step),
    };
    let end = start + step * (grid.len() - 1) as f64 + 0.5 * step;

    let mut stepper = Dopri5::from_param(
        sys,
        start,
        end,
        step,
        y0,
        opts.rtol,
        opts.atol,
        SAFETY,
        BETA,
        FAC_MIN,
        FAC_MAX,
        opts.h_max.min(end - start),
        0.0,
        opts.max_steps,
        STIFFNESS_CHECK,
        OutputType::Dense,
    );
    let stats = stepper
        .integrate()
        .map_err(|e| SolverError::Integration(format!("{e:?}")))?;
    let stats = SolverStats {
        accepted: stats.accepted_steps,
        rejected: stats.rejected_steps,
        rhs_evals: stats.num_eval,
    };

    let produced = stepper.y_out();
    if produced.len() < grid.len() {
        return Err(SolverError::MissingSamples { expected: grid.len(), got: produced.len() });
    }
    let states: Vec<StateVector> = produced.iter().take(grid.len()).copied().collect();
    if let Some(i) = states.iter().position(|y| y.iter().any(|v| !v.is_finite())) {
        return Err(SolverError::NonFinite { t: grid.points()[i] });
    }

    log::trace!(
        "dopri5: {} accepted, {} rejected, {} rhs evals",
        stats.accepted,
        stats.rejected,
        stats.rhs_evals
    );
    Ok(Solution { states, stats })
}
