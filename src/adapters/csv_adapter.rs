//! CSV file market data adapter.
//!
//! Reads `<base_path>/<SYMBOL>.csv` with a `date,open,high,low,close,volume`
//! header. Capitalised headers with an extra `Adj Close` column, as written by
//! Yahoo Finance exports, are accepted too.

use crate::domain::error::PricecastError;
use crate::domain::ohlcv::{Bar, Series};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

impl DataPort for CsvAdapter {
    fn fetch_series(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Series, PricecastError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| PricecastError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.deserialize::<Bar>() {
            let bar = result.map_err(|e| PricecastError::Data {
                reason: format!("{}: {}", path.display(), e),
            })?;
            if bar.date >= start_date && bar.date < end_date {
                bars.push(bar);
            }
        }

        if bars.is_empty() {
            return Err(PricecastError::NoData {
                symbol: symbol.to_string(),
            });
        }

        bars.sort_by_key(|b| b.date);
        tracing::debug!(symbol, bars = bars.len(), path = %path.display(), "loaded bars");
        Series::new(symbol, bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, PricecastError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| PricecastError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| PricecastError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "csv") {
                if let Some(stem) = path.file_stem() {
                    symbols.push(stem.to_string_lossy().into_owned());
                }
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}
