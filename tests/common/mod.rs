#![allow(dead_code)]

use chrono::NaiveDate;
use pricecast::domain::error::PricecastError;
pub use pricecast::domain::ohlcv::{Bar, Series};
use pricecast::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<Bar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<Bar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_series(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Series, PricecastError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(PricecastError::Data {
                reason: reason.clone(),
            });
        }
        let bars: Vec<Bar> = self
            .data
            .get(symbol)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start_date && b.date < end_date)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if bars.is_empty() {
            return Err(PricecastError::NoData {
                symbol: symbol.to_string(),
            });
        }
        Series::new(symbol, bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, PricecastError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(day: NaiveDate, close: f64, volume: f64) -> Bar {
    Bar {
        date: day,
        open: close,
        high: close + 1.0,
        low: (close - 1.0).max(0.0),
        close,
        volume,
    }
}

/// Consecutive daily bars starting 2024-01-01.
pub fn bars_from(closes: &[f64], volumes: &[f64]) -> Vec<Bar> {
    assert_eq!(closes.len(), volumes.len());
    let start = date(2024, 1, 1);
    closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&c, &v))| make_bar(start + chrono::Duration::days(i as i64), c, v))
        .collect()
}

pub fn series_from(closes: &[f64], volumes: &[f64]) -> Series {
    Series::new("TEST", bars_from(closes, volumes)).unwrap()
}

/// Trending series with a periodic wobble so both gains and losses occur.
pub fn generate_closes(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 100.0 + i as f64 * 0.5 + (i as f64 * 0.7).sin() * 3.0)
        .collect()
}

pub fn generate_volumes(count: usize) -> Vec<f64> {
    (0..count).map(|i| 1000.0 + (i % 7) as f64 * 150.0).collect()
}

pub fn generate_bars(count: usize) -> Vec<Bar> {
    bars_from(&generate_closes(count), &generate_volumes(count))
}
