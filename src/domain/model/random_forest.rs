//! Bagged ensemble of regression trees.
//!
//! Tree `i` is trained on a bootstrap sample drawn from a `ChaCha8Rng`
//! seeded with `seed + i`, so a fixed seed reproduces the forest exactly.
//! Predictions are the mean over all trees.

use super::decision_tree::{DecisionTree, TreeConfig};
use crate::domain::error::PricecastError;
use crate::domain::features::FeatureRow;
use crate::domain::model::{check_training_input, Regressor};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForestConfig {
    pub n_trees: usize,
    /// `None` grows every tree until its leaves are pure.
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RandomForestRegressor {
    config: ForestConfig,
    trees: Vec<DecisionTree>,
}

impl RandomForestRegressor {
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
        }
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    fn bootstrap_indices(n: usize, seed: u64) -> Vec<usize> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..n).map(|_| rng.gen_range(0..n)).collect()
    }
}

impl Regressor for RandomForestRegressor {
    fn fit(&mut self, features: &[FeatureRow], labels: &[f64]) -> Result<(), PricecastError> {
        check_training_input(features, labels)?;
        if self.config.n_trees == 0 {
            return Err(PricecastError::Training {
                reason: "random forest needs at least one tree".into(),
            });
        }

        let rows: Vec<[f64; FeatureRow::LEN]> = features.iter().map(FeatureRow::to_array).collect();
        let tree_config = TreeConfig {
            max_depth: self.config.max_depth,
            min_samples_split: self.config.min_samples_split,
            ..TreeConfig::default()
        };

        let trees = (0..self.config.n_trees)
            .map(|i| {
                let indices =
                    Self::bootstrap_indices(rows.len(), self.config.seed.wrapping_add(i as u64));
                let mut tree = DecisionTree::new(tree_config);
                tree.fit(&rows, labels, &indices);
                tree
            })
            .collect();
        self.trees = trees;

        tracing::debug!(
            rows = rows.len(),
            trees = self.trees.len(),
            seed = self.config.seed,
            "fitted random forest"
        );
        Ok(())
    }

    fn predict(&self, features: &[FeatureRow]) -> Result<Vec<f64>, PricecastError> {
        if self.trees.is_empty() {
            return Err(PricecastError::NotFitted);
        }

        features
            .iter()
            .map(|row| {
                let row = row.to_array();
                let mut sum = 0.0;
                for tree in &self.trees {
                    sum += tree.predict_one(&row).ok_or(PricecastError::NotFitted)?;
                }
                Ok(sum / self.trees.len() as f64)
            })
            .collect()
    }
}
