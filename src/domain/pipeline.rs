//! Indicator → feature → model → prediction pipeline.
//!
//! One call processes one series with one model variant, synchronously and
//! without shared state: the indicator set, training set and fitted model all
//! live only for the duration of the call. Evaluation is in-sample.

use crate::domain::error::PricecastError;
use crate::domain::features::{self, TrainingSet};
use crate::domain::indicator::{IndicatorSet, IndicatorWindows};
use crate::domain::metrics::ErrorMetrics;
use crate::domain::model::{ForestConfig, Model, ModelKind, Regressor};
use crate::domain::ohlcv::Series;
use crate::domain::prediction::{PredictionPoint, PredictionResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    pub windows: IndicatorWindows,
    pub model: ModelKind,
    pub forest: ForestConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            windows: IndicatorWindows::default(),
            model: ModelKind::RandomForest,
            forest: ForestConfig::default(),
        }
    }
}

pub fn run_pipeline(series: &Series, config: &PipelineConfig) -> Result<PredictionResult, PricecastError> {
    let indicators = IndicatorSet::compute(series, config.windows);
    let training = features::assemble(series, &indicators)?;
    fit_and_evaluate(series.symbol(), &training, config.model, &config.forest)
}

/// Run every model variant over the same series.
///
/// Indicators and features are computed once; each variant gets its own
/// freshly constructed model.
pub fn compare_models(
    series: &Series,
    config: &PipelineConfig,
) -> Result<Vec<PredictionResult>, PricecastError> {
    let indicators = IndicatorSet::compute(series, config.windows);
    let training = features::assemble(series, &indicators)?;

    ModelKind::ALL
        .iter()
        .map(|&kind| fit_and_evaluate(series.symbol(), &training, kind, &config.forest))
        .collect()
}

fn fit_and_evaluate(
    symbol: &str,
    training: &TrainingSet,
    kind: ModelKind,
    forest: &ForestConfig,
) -> Result<PredictionResult, PricecastError> {
    let mut model = Model::new(kind, forest);
    model.fit(&training.features, &training.labels)?;
    let predicted = model.predict(&training.features)?;
    let metrics = ErrorMetrics::compute(&training.labels, &predicted)?;

    tracing::info!(
        symbol,
        model = %kind,
        rows = training.len(),
        rmse = metrics.rmse,
        mae = metrics.mae,
        "pipeline run complete"
    );

    let points = training
        .dates
        .iter()
        .zip(&training.labels)
        .zip(&predicted)
        .map(|((&date, &actual), &predicted)| PredictionPoint {
            date,
            actual,
            predicted,
        })
        .collect();

    let latest_rsi = training
        .features
        .last()
        .map(|f| f.rsi)
        .ok_or(PricecastError::EmptyInput)?;

    Ok(PredictionResult {
        symbol: symbol.to_string(),
        model: kind,
        points,
        metrics,
        latest_rsi,
    })
}
