//! Regression models behind a common fit/predict interface.
//!
//! The model set is closed: callers pick a [`ModelKind`] and get a [`Model`]
//! that dispatches to the concrete regressor. Each `Model` owns its fitted
//! state; nothing is shared between instances.

pub mod decision_tree;
pub mod linear;
pub mod random_forest;

use crate::domain::error::PricecastError;
use crate::domain::features::FeatureRow;
use std::fmt;
use std::str::FromStr;

pub use linear::LinearRegressor;
pub use random_forest::{ForestConfig, RandomForestRegressor};

pub trait Regressor {
    /// Fit on aligned features and labels, replacing any previous fit.
    fn fit(&mut self, features: &[FeatureRow], labels: &[f64]) -> Result<(), PricecastError>;

    /// One prediction per feature row.
    fn predict(&self, features: &[FeatureRow]) -> Result<Vec<f64>, PricecastError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    LinearRegression,
    RandomForest,
}

impl ModelKind {
    pub const ALL: [ModelKind; 2] = [ModelKind::LinearRegression, ModelKind::RandomForest];

    /// Name used in configuration files and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            ModelKind::LinearRegression => "linear",
            ModelKind::RandomForest => "random_forest",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::LinearRegression => write!(f, "Linear Regression"),
            ModelKind::RandomForest => write!(f, "Random Forest"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown model '{0}' (expected linear or random_forest)")]
pub struct UnknownModel(pub String);

impl FromStr for ModelKind {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();
        match normalized.as_str() {
            "linear" | "linear_regression" | "ols" => Ok(ModelKind::LinearRegression),
            "random_forest" | "rf" | "forest" => Ok(ModelKind::RandomForest),
            _ => Err(UnknownModel(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Model {
    Linear(LinearRegressor),
    RandomForest(RandomForestRegressor),
}

impl Model {
    pub fn new(kind: ModelKind, forest: &ForestConfig) -> Self {
        match kind {
            ModelKind::LinearRegression => Model::Linear(LinearRegressor::new()),
            ModelKind::RandomForest => Model::RandomForest(RandomForestRegressor::new(*forest)),
        }
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            Model::Linear(_) => ModelKind::LinearRegression,
            Model::RandomForest(_) => ModelKind::RandomForest,
        }
    }
}

impl Regressor for Model {
    fn fit(&mut self, features: &[FeatureRow], labels: &[f64]) -> Result<(), PricecastError> {
        match self {
            Model::Linear(m) => m.fit(features, labels),
            Model::RandomForest(m) => m.fit(features, labels),
        }
    }

    fn predict(&self, features: &[FeatureRow]) -> Result<Vec<f64>, PricecastError> {
        match self {
            Model::Linear(m) => m.predict(features),
            Model::RandomForest(m) => m.predict(features),
        }
    }
}

/// Shared precondition for every `fit`: non-empty, equal-length, finite input.
pub(crate) fn check_training_input(
    features: &[FeatureRow],
    labels: &[f64],
) -> Result<(), PricecastError> {
    if features.len() != labels.len() {
        return Err(PricecastError::Training {
            reason: format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            ),
        });
    }
    if features.is_empty() {
        return Err(PricecastError::Training {
            reason: "no training rows".into(),
        });
    }
    let all_finite = labels.iter().all(|l| l.is_finite())
        && features
            .iter()
            .all(|row| row.to_array().iter().all(|v| v.is_finite()));
    if !all_finite {
        return Err(PricecastError::Training {
            reason: "training input contains non-finite values".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(x: f64) -> FeatureRow {
        FeatureRow {
            ma_short: x,
            ma_long: x * 0.5,
            rsi: 50.0,
            volume_change: 0.0,
        }
    }

    #[test]
    fn model_kind_parses_aliases() {
        assert_eq!("linear".parse(), Ok(ModelKind::LinearRegression));
        assert_eq!("Linear Regression".parse(), Ok(ModelKind::LinearRegression));
        assert_eq!("random-forest".parse(), Ok(ModelKind::RandomForest));
        assert_eq!("Random Forest".parse(), Ok(ModelKind::RandomForest));
        assert_eq!(" RF ".parse(), Ok(ModelKind::RandomForest));
    }

    #[test]
    fn model_kind_rejects_unknown() {
        let err = "xgboost".parse::<ModelKind>().unwrap_err();
        assert_eq!(err, UnknownModel("xgboost".into()));
    }

    #[test]
    fn model_kind_display_and_key_round_trip() {
        for kind in ModelKind::ALL {
            assert_eq!(kind.key().parse::<ModelKind>(), Ok(kind));
            assert_eq!(kind.to_string().parse::<ModelKind>(), Ok(kind));
        }
    }

    #[test]
    fn model_new_matches_kind() {
        let forest = ForestConfig::default();
        for kind in ModelKind::ALL {
            assert_eq!(Model::new(kind, &forest).kind(), kind);
        }
    }

    #[test]
    fn every_model_rejects_mismatched_lengths() {
        let forest = ForestConfig {
            n_trees: 3,
            ..ForestConfig::default()
        };
        for kind in ModelKind::ALL {
            let mut model = Model::new(kind, &forest);
            let err = model.fit(&[row(1.0), row(2.0)], &[1.0]).unwrap_err();
            assert!(matches!(err, PricecastError::Training { .. }), "{kind}");
        }
    }

    #[test]
    fn every_model_rejects_empty_input() {
        let forest = ForestConfig::default();
        for kind in ModelKind::ALL {
            let mut model = Model::new(kind, &forest);
            assert!(matches!(
                model.fit(&[], &[]),
                Err(PricecastError::Training { .. })
            ));
        }
    }

    #[test]
    fn every_model_rejects_predict_before_fit() {
        let forest = ForestConfig::default();
        for kind in ModelKind::ALL {
            let model = Model::new(kind, &forest);
            assert!(matches!(
                model.predict(&[row(1.0)]),
                Err(PricecastError::NotFitted)
            ));
        }
    }

    #[test]
    fn non_finite_labels_are_rejected() {
        let err = check_training_input(&[row(1.0)], &[f64::INFINITY]).unwrap_err();
        assert!(matches!(err, PricecastError::Training { reason } if reason.contains("non-finite")));
    }

    #[test]
    fn every_model_predicts_same_length() {
        let forest = ForestConfig {
            n_trees: 5,
            ..ForestConfig::default()
        };
        let features: Vec<FeatureRow> = (0..10).map(|i| row(i as f64)).collect();
        let labels: Vec<f64> = (0..10).map(|i| 2.0 * i as f64 + 1.0).collect();
        for kind in ModelKind::ALL {
            let mut model = Model::new(kind, &forest);
            model.fit(&features, &labels).unwrap();
            assert_eq!(model.predict(&features).unwrap().len(), features.len());
            assert_eq!(model.predict(&[]).unwrap().len(), 0);
        }
    }
}
