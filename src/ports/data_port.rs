//! Market data access port trait.

use crate::domain::error::PricecastError;
use crate::domain::ohlcv::Series;
use chrono::NaiveDate;

pub trait DataPort {
    /// Bars for `symbol` dated in `[start_date, end_date)`, ascending.
    fn fetch_series(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Series, PricecastError>;

    fn list_symbols(&self) -> Result<Vec<String>, PricecastError>;
}
