//! Feature matrix and label assembly.
//!
//! Bars whose indicators are not all defined are dropped; the remaining rows
//! stay index-aligned with their close-price labels and dates.

use crate::domain::error::PricecastError;
use crate::domain::indicator::{IndicatorRow, IndicatorSet};
use crate::domain::ohlcv::Series;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow {
    pub ma_short: f64,
    pub ma_long: f64,
    pub rsi: f64,
    pub volume_change: f64,
}

impl FeatureRow {
    pub const LEN: usize = 4;

    pub fn from_indicators(row: &IndicatorRow) -> Option<Self> {
        Some(Self {
            ma_short: row.ma_short?,
            ma_long: row.ma_long?,
            rsi: row.rsi?,
            volume_change: row.volume_change?,
        })
    }

    pub fn to_array(&self) -> [f64; Self::LEN] {
        [self.ma_short, self.ma_long, self.rsi, self.volume_change]
    }
}

/// Aligned features, labels and dates for one trimmed series.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    pub dates: Vec<NaiveDate>,
    pub features: Vec<FeatureRow>,
    pub labels: Vec<f64>,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Build the feature rows and close-price labels for every complete bar.
///
/// # Panics
///
/// Panics if a bar at or past the warm-up index has an undefined indicator.
/// The indicator policies make that impossible, so reaching it is a bug.
pub fn assemble(series: &Series, indicators: &IndicatorSet) -> Result<TrainingSet, PricecastError> {
    assert_eq!(
        series.len(),
        indicators.len(),
        "indicator set does not match series length"
    );

    let warmup = indicators.windows.warmup();
    let mut set = TrainingSet {
        dates: Vec::with_capacity(series.len().saturating_sub(warmup)),
        features: Vec::with_capacity(series.len().saturating_sub(warmup)),
        labels: Vec::with_capacity(series.len().saturating_sub(warmup)),
    };

    for (i, (bar, row)) in series.bars().iter().zip(&indicators.rows).enumerate() {
        match FeatureRow::from_indicators(row) {
            Some(features) if i >= warmup => {
                set.dates.push(bar.date);
                set.features.push(features);
                set.labels.push(bar.close);
            }
            None if i < warmup => {}
            _ => panic!(
                "UndefinedIndicatorPolicyViolation: bar {} ({}) has completeness {} with warm-up {}",
                i,
                bar.date,
                row.is_complete(),
                warmup
            ),
        }
    }

    if set.is_empty() {
        return Err(PricecastError::InsufficientData {
            bars: series.len(),
            minimum: indicators.windows.min_bars(),
        });
    }

    tracing::debug!(
        symbol = series.symbol(),
        bars = series.len(),
        rows = set.len(),
        "assembled feature matrix"
    );
    Ok(set)
}
