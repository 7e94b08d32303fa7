//! Daily OHLCV bars and validated per-symbol series.

use crate::domain::error::PricecastError;
use chrono::NaiveDate;
use serde::Deserialize;

/// Column names are matched in lowercase or capitalised form; extra columns
/// such as `Adj Close` are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Bar {
    #[serde(alias = "Date")]
    pub date: NaiveDate,
    #[serde(alias = "Open")]
    pub open: f64,
    #[serde(alias = "High")]
    pub high: f64,
    #[serde(alias = "Low")]
    pub low: f64,
    #[serde(alias = "Close")]
    pub close: f64,
    #[serde(alias = "Volume")]
    pub volume: f64,
}

impl Bar {
    fn check_values(&self) -> Result<(), PricecastError> {
        let fields = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(PricecastError::InvalidSeries {
                    reason: format!("{name} on {} is {value}", self.date),
                });
            }
        }
        Ok(())
    }
}

/// Bars for one symbol, strictly ascending by date.
///
/// Construction rejects duplicate or out-of-order dates and any value that is
/// negative, NaN or infinite, so downstream indicator code never sees them.
#[derive(Debug, Clone)]
pub struct Series {
    symbol: String,
    bars: Vec<Bar>,
}

impl Series {
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, PricecastError> {
        for bar in &bars {
            bar.check_values()?;
        }
        if let Some(w) = bars.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(PricecastError::InvalidSeries {
                reason: format!(
                    "dates must be strictly ascending ({} followed by {})",
                    w[0].date, w[1].date
                ),
            });
        }
        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }
}
