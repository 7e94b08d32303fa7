//! Prediction error metrics.

use crate::domain::error::PricecastError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorMetrics {
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
}

impl ErrorMetrics {
    pub fn compute(actual: &[f64], predicted: &[f64]) -> Result<Self, PricecastError> {
        if actual.len() != predicted.len() {
            return Err(PricecastError::LengthMismatch {
                expected: actual.len(),
                got: predicted.len(),
            });
        }
        if actual.is_empty() {
            return Err(PricecastError::EmptyInput);
        }

        let n = actual.len() as f64;
        let mut squared = 0.0;
        let mut absolute = 0.0;
        for (a, p) in actual.iter().zip(predicted) {
            let err = a - p;
            squared += err * err;
            absolute += err.abs();
        }

        let mse = squared / n;
        Ok(ErrorMetrics {
            mse,
            rmse: mse.sqrt(),
            mae: absolute / n,
        })
    }
}
