//! Configuration validation.
//!
//! Validates all config fields before a pipeline run.

use crate::domain::error::PricecastError;
use crate::domain::model::ModelKind;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_prediction_config(config: &dyn ConfigPort) -> Result<(), PricecastError> {
    validate_symbol(config)?;
    validate_dates(config)?;
    validate_model(config)?;
    validate_windows(config)?;
    validate_forest(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> PricecastError {
    PricecastError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), PricecastError> {
    match config.get_string("prediction", "symbol") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(PricecastError::ConfigMissing {
            section: "prediction".to_string(),
            key: "symbol".to_string(),
        }),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), PricecastError> {
    let start_str = config.get_string("prediction", "start_date");
    let end_str = config.get_string("prediction", "end_date");

    let start_date = parse_date(start_str.as_deref(), "start_date")?;
    let end_date = parse_date(end_str.as_deref(), "end_date")?;

    if start_date >= end_date {
        return Err(invalid(
            "prediction",
            "start_date",
            "start_date must be before end_date",
        ));
    }
    Ok(())
}

pub fn parse_date(value: Option<&str>, field: &str) -> Result<NaiveDate, PricecastError> {
    match value {
        None => Err(PricecastError::ConfigMissing {
            section: "prediction".to_string(),
            key: field.to_string(),
        }),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            invalid(
                "prediction",
                field,
                &format!("invalid {} format, expected YYYY-MM-DD", field),
            )
        }),
    }
}

fn validate_model(config: &dyn ConfigPort) -> Result<(), PricecastError> {
    if let Some(name) = config.get_string("prediction", "model") {
        name.parse::<ModelKind>()
            .map_err(|e| invalid("prediction", "model", &e.to_string()))?;
    }
    Ok(())
}

fn validate_windows(config: &dyn ConfigPort) -> Result<(), PricecastError> {
    for key in ["ma_short", "ma_long", "rsi_period"] {
        if config.get_int("indicators", key, 1)? < 1 {
            return Err(invalid(
                "indicators",
                key,
                &format!("{} must be at least 1", key),
            ));
        }
    }
    Ok(())
}

fn validate_forest(config: &dyn ConfigPort) -> Result<(), PricecastError> {
    if config.get_int("random_forest", "n_trees", 1)? < 1 {
        return Err(invalid(
            "random_forest",
            "n_trees",
            "n_trees must be at least 1",
        ));
    }
    if config.get_int("random_forest", "max_depth", 0)? < 0 {
        return Err(invalid(
            "random_forest",
            "max_depth",
            "max_depth must be non-negative (0 = unlimited)",
        ));
    }
    if config.get_int("random_forest", "min_samples_split", 2)? < 2 {
        return Err(invalid(
            "random_forest",
            "min_samples_split",
            "min_samples_split must be at least 2",
        ));
    }
    if config.get_int("random_forest", "seed", 0)? < 0 {
        return Err(invalid(
            "random_forest",
            "seed",
            "seed must be non-negative",
        ));
    }
    Ok(())
}
