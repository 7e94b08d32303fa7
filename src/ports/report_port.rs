//! Prediction output port trait.

use crate::domain::error::PricecastError;
use crate::domain::prediction::PredictionResult;
use std::path::Path;

/// Port for persisting the per-bar predictions of a run.
pub trait ReportPort {
    fn write(&self, result: &PredictionResult, output_path: &Path) -> Result<(), PricecastError>;

    /// Default implementation: one output file per result, named
    /// `<stem>_<model key>.<ext>` next to `output_path`.
    fn write_all(
        &self,
        results: &[PredictionResult],
        output_path: &Path,
    ) -> Result<(), PricecastError> {
        let stem = output_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "predictions".to_string());
        let ext = output_path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(|| "csv".to_string());
        for result in results {
            let path = output_path.with_file_name(format!("{}_{}.{}", stem, result.model.key(), ext));
            self.write(result, &path)?;
        }
        Ok(())
    }
}
