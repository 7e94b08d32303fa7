//! Ordinary least squares regression with an intercept.
//!
//! Features and labels are mean-centred, then the coefficients are taken as
//! the minimum-norm least-squares solution of the centred system via SVD.
//! The intercept restores the means: b0 = mean(y) - beta . mean(x).
//! Rank-deficient designs (fewer rows than features, constant or collinear
//! columns) therefore still have a single well-defined fit.

use crate::domain::error::PricecastError;
use crate::domain::features::FeatureRow;
use crate::domain::model::{check_training_input, Regressor};
use nalgebra::{DMatrix, DVector};

/// Singular values below this fraction of the largest are treated as zero.
const SINGULAR_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone, PartialEq)]
struct Fit {
    coefficients: [f64; FeatureRow::LEN],
    intercept: f64,
    r_squared: f64,
}

#[derive(Debug, Clone, Default)]
pub struct LinearRegressor {
    fit: Option<Fit>,
}

impl LinearRegressor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coefficients(&self) -> Option<[f64; FeatureRow::LEN]> {
        self.fit.as_ref().map(|f| f.coefficients)
    }

    pub fn intercept(&self) -> Option<f64> {
        self.fit.as_ref().map(|f| f.intercept)
    }

    /// In-sample coefficient of determination; 0 when the labels are constant.
    pub fn r_squared(&self) -> Option<f64> {
        self.fit.as_ref().map(|f| f.r_squared)
    }

    fn predict_row(fit: &Fit, row: &FeatureRow) -> f64 {
        fit.intercept
            + fit
                .coefficients
                .iter()
                .zip(row.to_array())
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

impl Regressor for LinearRegressor {
    fn fit(&mut self, features: &[FeatureRow], labels: &[f64]) -> Result<(), PricecastError> {
        check_training_input(features, labels)?;

        let n = features.len();
        let rows: Vec<[f64; FeatureRow::LEN]> = features.iter().map(FeatureRow::to_array).collect();

        let mut x_mean = [0.0; FeatureRow::LEN];
        for row in &rows {
            for (m, v) in x_mean.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in &mut x_mean {
            *m /= n as f64;
        }
        let y_mean = labels.iter().sum::<f64>() / n as f64;

        let x = DMatrix::from_fn(n, FeatureRow::LEN, |i, j| rows[i][j] - x_mean[j]);
        let y = DVector::from_iterator(n, labels.iter().map(|l| l - y_mean));

        let svd = x.svd(true, true);
        let eps = svd.singular_values.max() * SINGULAR_TOLERANCE;
        let beta = svd
            .solve(&y, eps)
            .map_err(|reason| PricecastError::Training {
                reason: reason.to_string(),
            })?;

        let mut coefficients = [0.0; FeatureRow::LEN];
        for (c, b) in coefficients.iter_mut().zip(beta.iter()) {
            *c = *b;
        }
        let intercept = y_mean
            - coefficients
                .iter()
                .zip(&x_mean)
                .map(|(c, m)| c * m)
                .sum::<f64>();

        let mut fit = Fit {
            coefficients,
            intercept,
            r_squared: 0.0,
        };

        let ss_tot: f64 = labels.iter().map(|l| (l - y_mean).powi(2)).sum();
        if ss_tot > 1e-10 {
            let ss_res: f64 = features
                .iter()
                .zip(labels)
                .map(|(row, l)| (l - Self::predict_row(&fit, row)).powi(2))
                .sum();
            fit.r_squared = 1.0 - ss_res / ss_tot;
        } else {
            tracing::warn!(rows = n, "labels are constant, r_squared reported as 0");
        }

        tracing::debug!(
            rows = n,
            intercept = fit.intercept,
            r_squared = fit.r_squared,
            "fitted linear regressor"
        );
        self.fit = Some(fit);
        Ok(())
    }

    fn predict(&self, features: &[FeatureRow]) -> Result<Vec<f64>, PricecastError> {
        let fit = self.fit.as_ref().ok_or(PricecastError::NotFitted)?;
        Ok(features
            .iter()
            .map(|row| Self::predict_row(fit, row))
            .collect())
    }
}
