//! Two-variable cardiovascular model: blood pressure and heart rate.

use ode_solvers::{System, Vector2};

use crate::scenario::ParameterVector;

/// `(BP, HR)` at one instant.
pub type StateVector = Vector2<f64>;

pub const INITIAL_BP: f64 = 120.0;
pub const INITIAL_HR: f64 = 75.0;

/// Passive BP decay rate.
const BP_DECAY: f64 = 0.1;
/// HR relaxation rate toward `RESTING_HR`.
const HR_DECAY: f64 = 0.05;
const RESTING_HR: f64 = 70.0;

/// Same initial condition for every scenario.
pub fn initial_state() -> StateVector {
    StateVector::new(INITIAL_BP, INITIAL_HR)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardiovascularModel {
    pub params: ParameterVector,
}

impl CardiovascularModel {
    pub fn new(params: ParameterVector) -> Self {
        Self { params }
    }

    /// dBP/dt = k1 * (HR * resistance) - blood_loss - 0.1 * BP
    /// dHR/dt = k2 * (set_point - BP) - 0.05 * (HR - 70)
    pub fn derivative(&self, y: &StateVector) -> StateVector {
        let p = &self.params;
        let (bp, hr) = (y[0], y[1]);
        let d_bp = p.k1 * (hr * p.resistance) - p.blood_loss - BP_DECAY * bp;
        let d_hr = p.k2 * (p.set_point - bp) - HR_DECAY * (hr - RESTING_HR);
        StateVector::new(d_bp, d_hr)
    }
}

impl System<f64, StateVector> for CardiovascularModel {
    fn system(&self, _t: f64, y: &StateVector, dy: &mut StateVector) {
        *dy = self.derivative(y);
    }
}
