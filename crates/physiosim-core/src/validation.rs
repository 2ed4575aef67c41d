//! Output validation for integrated and derived series.

use crate::error::PhysioError;

/// Reject any NaN/Inf sample, naming the series and the first bad index.
pub fn validate_series(series: &'static str, values: &[f64]) -> Result<(), PhysioError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(PhysioError::NonFiniteSample { series, index }),
        None => Ok(()),
    }
}

/// Clamp into `[lo, hi]`, mapping NaN to `lo`.
pub fn clamp_finite(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        lo
    } else {
        value.clamp(lo, hi)
    }
}
