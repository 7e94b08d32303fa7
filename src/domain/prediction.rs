//! Output of one pipeline run.
//!
//! Predictions are produced on the same rows the model was fitted on, so the
//! error metrics describe in-sample fit, not forecasting accuracy.

use crate::domain::metrics::ErrorMetrics;
use crate::domain::model::ModelKind;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionPoint {
    pub date: NaiveDate,
    pub actual: f64,
    pub predicted: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub symbol: String,
    pub model: ModelKind,
    pub points: Vec<PredictionPoint>,
    pub metrics: ErrorMetrics,
    /// RSI on the last complete bar.
    pub latest_rsi: f64,
}

/// Headline figures for the last bar of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionSummary {
    pub current_price: f64,
    pub predicted_price: f64,
    /// (predicted - current) / current * 100; 0 when the current price is 0.
    pub change_pct: f64,
    pub latest_rsi: f64,
}

impl PredictionResult {
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn actual(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.actual).collect()
    }

    pub fn predicted(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.predicted).collect()
    }

    pub fn summary(&self) -> Option<PredictionSummary> {
        let last = self.points.last()?;
        let change_pct = if last.actual == 0.0 {
            0.0
        } else {
            (last.predicted - last.actual) / last.actual * 100.0
        };
        Some(PredictionSummary {
            current_price: last.actual,
            predicted_price: last.predicted,
            change_pct,
            latest_rsi: self.latest_rsi,
        })
    }
}
