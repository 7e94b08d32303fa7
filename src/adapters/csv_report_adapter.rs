//! CSV prediction and indicator writer.

use crate::domain::error::PricecastError;
use crate::domain::indicator::IndicatorSet;
use crate::domain::prediction::PredictionResult;
use crate::ports::report_port::ReportPort;
use std::fs;
use std::path::Path;

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Write one row per bar; undefined indicator values are empty cells.
    pub fn write_indicators(
        &self,
        indicators: &IndicatorSet,
        output_path: &Path,
    ) -> Result<(), PricecastError> {
        let mut wtr = open_writer(output_path)?;

        let mut header = vec!["date".to_string()];
        header.extend(
            indicators
                .windows
                .indicator_types()
                .iter()
                .map(|t| t.to_string()),
        );
        wtr.write_record(&header).map_err(csv_error)?;

        for row in &indicators.rows {
            let cells = [row.ma_short, row.ma_long, row.rsi, row.volume_change];
            let mut record = vec![row.date.to_string()];
            record.extend(cells.iter().map(|v| v.map(|x| x.to_string()).unwrap_or_default()));
            wtr.write_record(&record).map_err(csv_error)?;
        }

        wtr.flush()?;
        tracing::debug!(rows = indicators.len(), path = %output_path.display(), "wrote indicators");
        Ok(())
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn open_writer(output_path: &Path) -> Result<csv::Writer<fs::File>, PricecastError> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(output_path)?;
    Ok(csv::Writer::from_writer(file))
}

fn csv_error(e: csv::Error) -> PricecastError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => PricecastError::Io(io),
        other => PricecastError::Data {
            reason: format!("csv write failed: {:?}", other),
        },
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, result: &PredictionResult, output_path: &Path) -> Result<(), PricecastError> {
        let mut wtr = open_writer(output_path)?;
        for point in &result.points {
            wtr.serialize(point).map_err(csv_error)?;
        }
        wtr.flush()?;
        tracing::debug!(
            symbol = %result.symbol,
            model = %result.model,
            rows = result.points.len(),
            path = %output_path.display(),
            "wrote predictions"
        );
        Ok(())
    }
}
