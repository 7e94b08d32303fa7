//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::override_config_adapter::OverrideConfigAdapter;
use crate::domain::config_validation::{parse_date, validate_prediction_config};
use crate::domain::error::PricecastError;
use crate::domain::indicator::{
    IndicatorSet, IndicatorWindows, DEFAULT_MA_LONG, DEFAULT_MA_SHORT, DEFAULT_RSI_PERIOD,
};
use crate::domain::model::{ForestConfig, ModelKind};
use crate::domain::pipeline::{self, PipelineConfig};
use crate::domain::prediction::PredictionResult;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_PREDICTIONS_PATH: &str = "predictions.csv";
pub const DEFAULT_INDICATORS_PATH: &str = "indicators.csv";

#[derive(Parser, Debug)]
#[command(
    name = "pricecast",
    about = "Technical indicator and price regression pipeline"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Flags that take precedence over the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct Overrides {
    #[arg(long)]
    pub symbol: Option<String>,
    /// Inclusive start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,
    /// Exclusive end date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,
    /// linear or random_forest
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fit a model and write in-sample predictions
    Predict {
        #[arg(short, long)]
        config: PathBuf,
        #[command(flatten)]
        overrides: Overrides,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run every model over the same series
    Compare {
        #[arg(short, long)]
        config: PathBuf,
        #[command(flatten)]
        overrides: Overrides,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export computed indicator values
    Indicators {
        #[arg(short, long)]
        config: PathBuf,
        #[command(flatten)]
        overrides: Overrides,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<String>,
    },
}

/// Where a run reads from and writes to.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub data_dir: PathBuf,
    pub output: PathBuf,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Predict {
            config,
            overrides,
            output,
        } => run_predict(&config, &overrides, output.as_deref()),
        Command::Compare {
            config,
            overrides,
            output,
        } => run_compare(&config, &overrides, output.as_deref()),
        Command::Indicators {
            config,
            overrides,
            output,
        } => run_indicators(&config, &overrides, output.as_deref()),
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { config, data_dir } => {
            run_list_symbols(config.as_deref(), data_dir.as_deref())
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = PricecastError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Layer command-line flags over a loaded config file.
pub fn apply_overrides<'a>(
    base: &'a dyn ConfigPort,
    overrides: &Overrides,
    output: Option<&Path>,
) -> OverrideConfigAdapter<'a> {
    let output = output.map(|p| p.display().to_string());
    let mut layered = OverrideConfigAdapter::new(base);
    layered
        .set("prediction", "symbol", overrides.symbol.as_deref())
        .set("prediction", "start_date", overrides.start.as_deref())
        .set("prediction", "end_date", overrides.end.as_deref())
        .set("prediction", "model", overrides.model.as_deref())
        .set("data", "dir", overrides.data_dir.as_deref())
        .set("output", "predictions_path", output.as_deref());
    layered
}

fn window(config: &dyn ConfigPort, key: &str, default: usize) -> Result<usize, PricecastError> {
    let value = config.get_int("indicators", key, default as i64)?;
    usize::try_from(value)
        .ok()
        .filter(|&w| w >= 1)
        .ok_or_else(|| PricecastError::ConfigInvalid {
            section: "indicators".into(),
            key: key.into(),
            reason: format!("{} must be at least 1", key),
        })
}

fn non_negative(config: &dyn ConfigPort, key: &str, default: i64) -> Result<u64, PricecastError> {
    let value = config.get_int("random_forest", key, default)?;
    u64::try_from(value).map_err(|_| PricecastError::ConfigInvalid {
        section: "random_forest".into(),
        key: key.into(),
        reason: format!("{} must be non-negative", key),
    })
}

pub fn build_pipeline_config(config: &dyn ConfigPort) -> Result<PipelineConfig, PricecastError> {
    let windows = IndicatorWindows {
        ma_short: window(config, "ma_short", DEFAULT_MA_SHORT)?,
        ma_long: window(config, "ma_long", DEFAULT_MA_LONG)?,
        rsi_period: window(config, "rsi_period", DEFAULT_RSI_PERIOD)?,
    };

    let model = match config.get_string("prediction", "model") {
        Some(name) => name
            .parse::<ModelKind>()
            .map_err(|e| PricecastError::ConfigInvalid {
                section: "prediction".into(),
                key: "model".into(),
                reason: e.to_string(),
            })?,
        None => ModelKind::RandomForest,
    };

    let defaults = ForestConfig::default();
    let max_depth = non_negative(config, "max_depth", 0)? as usize;
    let forest = ForestConfig {
        n_trees: non_negative(config, "n_trees", defaults.n_trees as i64)? as usize,
        max_depth: (max_depth > 0).then_some(max_depth),
        min_samples_split: non_negative(
            config,
            "min_samples_split",
            defaults.min_samples_split as i64,
        )? as usize,
        seed: non_negative(config, "seed", defaults.seed as i64)?,
    };

    Ok(PipelineConfig {
        windows,
        model,
        forest,
    })
}

pub fn build_request(config: &dyn ConfigPort) -> Result<PredictionRequest, PricecastError> {
    let symbol = config
        .get_string("prediction", "symbol")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| PricecastError::ConfigMissing {
            section: "prediction".into(),
            key: "symbol".into(),
        })?;
    let start_date = parse_date(
        config.get_string("prediction", "start_date").as_deref(),
        "start_date",
    )?;
    let end_date = parse_date(
        config.get_string("prediction", "end_date").as_deref(),
        "end_date",
    )?;

    Ok(PredictionRequest {
        symbol,
        start_date,
        end_date,
        data_dir: PathBuf::from(
            config
                .get_string("data", "dir")
                .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
        ),
        output: PathBuf::from(
            config
                .get_string("output", "predictions_path")
                .unwrap_or_else(|| DEFAULT_PREDICTIONS_PATH.to_string()),
        ),
    })
}

/// Load, layer, validate and build everything a run needs.
fn prepare(
    config_path: &Path,
    overrides: &Overrides,
    output: Option<&Path>,
) -> Result<(PredictionRequest, PipelineConfig), ExitCode> {
    eprintln!("Loading config from {}", config_path.display());
    let file = load_config(config_path)?;
    let config = apply_overrides(&file, overrides, output);

    let built = validate_prediction_config(&config)
        .and_then(|()| Ok((build_request(&config)?, build_pipeline_config(&config)?)));
    built.map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn run_predict(config_path: &Path, overrides: &Overrides, output: Option<&Path>) -> ExitCode {
    let (request, pipeline_config) = match prepare(config_path, overrides, output) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let data_port = CsvAdapter::new(request.data_dir.clone());
    run_predict_pipeline(&data_port, &CsvReportAdapter::new(), &request, &pipeline_config)
}

pub fn run_predict_pipeline(
    data_port: &dyn DataPort,
    report_port: &dyn ReportPort,
    request: &PredictionRequest,
    config: &PipelineConfig,
) -> ExitCode {
    let series = match data_port.fetch_series(&request.symbol, request.start_date, request.end_date)
    {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Running {} on {}: {} bars, {} to {}",
        config.model,
        request.symbol,
        series.len(),
        request.start_date,
        request.end_date,
    );

    let result = match pipeline::run_pipeline(&series, config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    print_summary(&result);

    match report_port.write(&result, &request.output) {
        Ok(()) => {
            eprintln!("\nPredictions written to: {}", request.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write predictions: {e}");
            (&e).into()
        }
    }
}

fn print_summary(result: &PredictionResult) {
    eprintln!("\n=== {} ({}) ===", result.symbol, result.model);
    eprintln!("Rows:             {}", result.points.len());
    eprintln!("MSE (in-sample):  {:.4}", result.metrics.mse);
    eprintln!("RMSE (in-sample): {:.4}", result.metrics.rmse);
    eprintln!("MAE (in-sample):  {:.4}", result.metrics.mae);

    if let Some(summary) = result.summary() {
        let sign = if summary.change_pct >= 0.0 { "+" } else { "" };
        eprintln!("\nCurrent Price:    ${:.2}", summary.current_price);
        eprintln!("Predicted Price:  ${:.2}", summary.predicted_price);
        eprintln!("Change:           {}{:.2}%", sign, summary.change_pct);
        eprintln!("RSI:              {:.2}", summary.latest_rsi);
    }
    eprintln!("\nNote: metrics are measured on the training rows, not held-out data.");
}

fn run_compare(config_path: &Path, overrides: &Overrides, output: Option<&Path>) -> ExitCode {
    let (request, pipeline_config) = match prepare(config_path, overrides, output) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let data_port = CsvAdapter::new(request.data_dir.clone());
    run_compare_pipeline(&data_port, &CsvReportAdapter::new(), &request, &pipeline_config)
}

pub fn run_compare_pipeline(
    data_port: &dyn DataPort,
    report_port: &dyn ReportPort,
    request: &PredictionRequest,
    config: &PipelineConfig,
) -> ExitCode {
    let series = match data_port.fetch_series(&request.symbol, request.start_date, request.end_date)
    {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let results = match pipeline::compare_models(&series, config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("\n=== Model Comparison: {} (in-sample) ===", request.symbol);
    eprintln!("{:<20} {:>14} {:>12} {:>12}", "Model", "MSE", "RMSE", "MAE");
    for r in &results {
        eprintln!(
            "{:<20} {:>14.4} {:>12.4} {:>12.4}",
            r.model.to_string(),
            r.metrics.mse,
            r.metrics.rmse,
            r.metrics.mae,
        );
    }

    match report_port.write_all(&results, &request.output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: failed to write predictions: {e}");
            (&e).into()
        }
    }
}

fn run_indicators(config_path: &Path, overrides: &Overrides, output: Option<&Path>) -> ExitCode {
    let (request, pipeline_config) = match prepare(config_path, overrides, None) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INDICATORS_PATH));

    let data_port = CsvAdapter::new(request.data_dir.clone());
    let series = match data_port.fetch_series(&request.symbol, request.start_date, request.end_date)
    {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let indicators = IndicatorSet::compute(&series, pipeline_config.windows);
    eprintln!(
        "{}: {} bars, {} with every indicator defined",
        request.symbol,
        indicators.len(),
        indicators.complete_count()
    );
    if let Some(rsi) = indicators.latest_rsi() {
        eprintln!("Latest RSI: {:.2}", rsi);
    }

    match CsvReportAdapter::new().write_indicators(&indicators, &output) {
        Ok(()) => {
            eprintln!("Indicators written to: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write indicators: {e}");
            (&e).into()
        }
    }
}

fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let built = validate_prediction_config(&config)
        .and_then(|()| Ok((build_request(&config)?, build_pipeline_config(&config)?)));
    let (request, pipeline_config) = match built {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("\nSymbol:     {}", request.symbol);
    eprintln!("Range:      {} to {} (end exclusive)", request.start_date, request.end_date);
    eprintln!("Data dir:   {}", request.data_dir.display());
    eprintln!("Model:      {}", pipeline_config.model);
    eprintln!("Features:");
    for indicator in pipeline_config.windows.indicator_types() {
        eprintln!("  {}", indicator);
    }
    eprintln!("Minimum bars: {}", pipeline_config.windows.min_bars());
    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: Option<&Path>, data_dir: Option<&str>) -> ExitCode {
    let dir = match (data_dir, config_path) {
        (Some(d), _) => d.to_string(),
        (None, Some(path)) => match load_config(path) {
            Ok(c) => c
                .get_string("data", "dir")
                .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
            Err(code) => return code,
        },
        (None, None) => DEFAULT_DATA_DIR.to_string(),
    };

    let adapter = CsvAdapter::new(PathBuf::from(&dir));
    match adapter.list_symbols() {
        Ok(symbols) if symbols.is_empty() => {
            eprintln!("No symbols found in {}", dir);
            ExitCode::SUCCESS
        }
        Ok(symbols) => {
            for symbol in &symbols {
                println!("{}", symbol);
            }
            eprintln!("{} symbols found", symbols.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
