//! Technical indicators used as regression features.
//!
//! This module provides types for representing indicator values:
//! - `IndicatorWindows`: rolling window lengths (defaults 7 / 21 / 14)
//! - `IndicatorType`: indicator identity + parameters, used for display and headers
//! - `IndicatorRow`: the four indicator values for one bar, each `None` until
//!   enough history exists
//! - `IndicatorSet`: one row per bar of the input series
//!
//! Every value is computed from the bar itself and earlier bars only.

pub mod rsi;
pub mod sma;
pub mod volume_change;

use crate::domain::ohlcv::Series;
use chrono::NaiveDate;
use std::fmt;

pub const DEFAULT_MA_SHORT: usize = 7;
pub const DEFAULT_MA_LONG: usize = 21;
pub const DEFAULT_RSI_PERIOD: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorWindows {
    pub ma_short: usize,
    pub ma_long: usize,
    pub rsi_period: usize,
}

impl Default for IndicatorWindows {
    fn default() -> Self {
        Self {
            ma_short: DEFAULT_MA_SHORT,
            ma_long: DEFAULT_MA_LONG,
            rsi_period: DEFAULT_RSI_PERIOD,
        }
    }
}

impl IndicatorWindows {
    /// Index of the first bar at which every indicator is defined.
    ///
    /// With the default windows this is 20: the 21-bar moving average is the
    /// binding constraint.
    pub fn warmup(&self) -> usize {
        self.ma_short
            .saturating_sub(1)
            .max(self.ma_long.saturating_sub(1))
            .max(self.rsi_period)
            .max(1)
    }

    /// Smallest series length that yields at least one complete row.
    pub fn min_bars(&self) -> usize {
        self.warmup() + 1
    }

    pub fn indicator_types(&self) -> [IndicatorType; 4] {
        [
            IndicatorType::Sma(self.ma_short),
            IndicatorType::Sma(self.ma_long),
            IndicatorType::Rsi(self.rsi_period),
            IndicatorType::VolumeChange,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Rsi(usize),
    VolumeChange,
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "MA_{}", period),
            IndicatorType::Rsi(period) => write!(f, "RSI_{}", period),
            IndicatorType::VolumeChange => write!(f, "Volume_Change"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRow {
    pub date: NaiveDate,
    pub ma_short: Option<f64>,
    pub ma_long: Option<f64>,
    pub rsi: Option<f64>,
    pub volume_change: Option<f64>,
}

impl IndicatorRow {
    pub fn is_complete(&self) -> bool {
        self.ma_short.is_some()
            && self.ma_long.is_some()
            && self.rsi.is_some()
            && self.volume_change.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    pub windows: IndicatorWindows,
    pub rows: Vec<IndicatorRow>,
}

impl IndicatorSet {
    pub fn compute(series: &Series, windows: IndicatorWindows) -> Self {
        let closes = series.closes();
        let volumes = series.volumes();

        let ma_short = sma::calculate_sma(&closes, windows.ma_short);
        let ma_long = sma::calculate_sma(&closes, windows.ma_long);
        let rsi = rsi::calculate_rsi(&closes, windows.rsi_period);
        let volume_change = volume_change::calculate_volume_change(&volumes);

        let rows = series
            .bars()
            .iter()
            .enumerate()
            .map(|(i, bar)| IndicatorRow {
                date: bar.date,
                ma_short: ma_short[i],
                ma_long: ma_long[i],
                rsi: rsi[i],
                volume_change: volume_change[i],
            })
            .collect();

        Self { windows, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn complete_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_complete()).count()
    }

    pub fn latest_rsi(&self) -> Option<f64> {
        self.rows.iter().rev().find_map(|r| r.rsi)
    }
}
