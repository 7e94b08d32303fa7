//! Regression tree used as the forest's base learner.
//!
//! Splits minimise the summed squared error of the two children. Candidate
//! thresholds are midpoints between consecutive distinct feature values, and
//! a sample goes left when `value <= threshold`. Leaves hold the mean label.

use crate::domain::features::FeatureRow;

type Row = [f64; FeatureRow::LEN];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// `None` grows until leaves are pure or too small to split.
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn n_leaves(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Split { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }
}

struct Split {
    feature: usize,
    threshold: f64,
    sse: f64,
}

#[derive(Debug, Clone)]
pub struct DecisionTree {
    config: TreeConfig,
    root: Option<Node>,
}

impl DecisionTree {
    pub fn new(config: TreeConfig) -> Self {
        Self { config, root: None }
    }

    /// Fit on the rows named by `indices`; repeated indices weight a row
    /// more heavily, which is how bootstrap samples are passed in.
    pub fn fit(&mut self, rows: &[Row], labels: &[f64], indices: &[usize]) {
        self.root = if indices.is_empty() {
            None
        } else {
            Some(self.build(rows, labels, indices.to_vec(), 0))
        };
    }

    pub fn predict_one(&self, row: &Row) -> Option<f64> {
        let mut node = self.root.as_ref()?;
        loop {
            match node {
                Node::Leaf { value } => return Some(*value),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.root.is_some()
    }

    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, Node::depth)
    }

    pub fn n_leaves(&self) -> usize {
        self.root.as_ref().map_or(0, Node::n_leaves)
    }

    fn build(&self, rows: &[Row], labels: &[f64], indices: Vec<usize>, depth: usize) -> Node {
        let n = indices.len();
        let mean = indices.iter().map(|&i| labels[i]).sum::<f64>() / n as f64;

        let depth_reached = self.config.max_depth.is_some_and(|max| depth >= max);
        let pure = indices.iter().all(|&i| labels[i] == labels[indices[0]]);
        if depth_reached || pure || n < self.config.min_samples_split {
            return Node::Leaf { value: mean };
        }

        let Some(split) = best_split(rows, labels, &indices, self.config.min_samples_leaf) else {
            return Node::Leaf { value: mean };
        };
        tracing::trace!(depth, feature = split.feature, sse = split.sse, "tree split");

        let (left, right): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| rows[i][split.feature] <= split.threshold);

        Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left: Box::new(self.build(rows, labels, left, depth + 1)),
            right: Box::new(self.build(rows, labels, right, depth + 1)),
        }
    }
}

fn best_split(rows: &[Row], labels: &[f64], indices: &[usize], min_leaf: usize) -> Option<Split> {
    let n = indices.len();
    let min_leaf = min_leaf.max(1);
    let total_sum: f64 = indices.iter().map(|&i| labels[i]).sum();
    let total_sq: f64 = indices.iter().map(|&i| labels[i] * labels[i]).sum();

    let mut best: Option<Split> = None;
    let mut sorted = indices.to_vec();

    for feature in 0..FeatureRow::LEN {
        sorted.sort_by(|&a, &b| rows[a][feature].total_cmp(&rows[b][feature]));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for k in 1..n {
            let y = labels[sorted[k - 1]];
            left_sum += y;
            left_sq += y * y;

            let lo = rows[sorted[k - 1]][feature];
            let hi = rows[sorted[k]][feature];
            if lo == hi || k < min_leaf || n - k < min_leaf {
                continue;
            }

            let left_n = k as f64;
            let right_n = (n - k) as f64;
            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let sse = (left_sq - left_sum * left_sum / left_n)
                + (right_sq - right_sum * right_sum / right_n);

            if best.as_ref().is_none_or(|b| sse < b.sse) {
                let mut threshold = (lo + hi) / 2.0;
                if threshold >= hi {
                    threshold = lo;
                }
                best = Some(Split {
                    feature,
                    threshold,
                    sse,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_1d(xs: &[f64]) -> Vec<Row> {
        xs.iter().map(|&x| [x, 0.0, 0.0, 0.0]).collect()
    }

    fn all(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn unfitted_tree_predicts_nothing() {
        let tree = DecisionTree::new(TreeConfig::default());
        assert!(!tree.is_fitted());
        assert_eq!(tree.predict_one(&[0.0; 4]), None);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn step_function_is_learned_exactly() {
        let rows = rows_1d(&[1.0, 2.0, 3.0, 10.0, 11.0, 12.0]);
        let labels = [5.0, 5.0, 5.0, 20.0, 20.0, 20.0];
        let mut tree = DecisionTree::new(TreeConfig::default());
        tree.fit(&rows, &labels, &all(6));

        assert_eq!(tree.n_leaves(), 2);
        assert_eq!(tree.predict_one(&[2.5, 0.0, 0.0, 0.0]), Some(5.0));
        assert_eq!(tree.predict_one(&[6.5, 0.0, 0.0, 0.0]), Some(5.0));
        assert_eq!(tree.predict_one(&[6.6, 0.0, 0.0, 0.0]), Some(20.0));
    }

    #[test]
    fn fully_grown_tree_memorises_distinct_rows() {
        let xs: Vec<f64> = (0..16).map(|i| i as f64).collect();
        let rows = rows_1d(&xs);
        let labels: Vec<f64> = xs.iter().map(|x| (x * 0.7).sin() * 10.0).collect();
        let mut tree = DecisionTree::new(TreeConfig::default());
        tree.fit(&rows, &labels, &all(16));

        for (row, label) in rows.iter().zip(&labels) {
            assert_eq!(tree.predict_one(row), Some(*label));
        }
    }

    #[test]
    fn max_depth_limits_growth() {
        let xs: Vec<f64> = (0..32).map(|i| i as f64).collect();
        let rows = rows_1d(&xs);
        let labels = xs.clone();
        let mut tree = DecisionTree::new(TreeConfig {
            max_depth: Some(2),
            ..TreeConfig::default()
        });
        tree.fit(&rows, &labels, &all(32));
        assert!(tree.depth() <= 3);
        assert!(tree.n_leaves() <= 4);
    }

    #[test]
    fn identical_features_fall_back_to_mean() {
        let rows = rows_1d(&[1.0, 1.0, 1.0]);
        let labels = [1.0, 2.0, 6.0];
        let mut tree = DecisionTree::new(TreeConfig::default());
        tree.fit(&rows, &labels, &all(3));
        assert_eq!(tree.n_leaves(), 1);
        assert_eq!(tree.predict_one(&rows[0]), Some(3.0));
    }

    #[test]
    fn repeated_indices_weight_samples() {
        let rows = rows_1d(&[1.0, 1.0]);
        let labels = [0.0, 9.0];
        let mut tree = DecisionTree::new(TreeConfig::default());
        tree.fit(&rows, &labels, &[0, 1, 1]);
        assert_eq!(tree.predict_one(&rows[0]), Some(6.0));
    }

    #[test]
    fn splits_on_informative_feature() {
        // feature 0 is noise, feature 2 decides the label
        let rows: Vec<Row> = (0..10)
            .map(|i| [(i * 7 % 10) as f64, 0.0, if i < 5 { 0.0 } else { 1.0 }, 0.0])
            .collect();
        let labels: Vec<f64> = (0..10).map(|i| if i < 5 { -1.0 } else { 1.0 }).collect();
        let mut tree = DecisionTree::new(TreeConfig::default());
        tree.fit(&rows, &labels, &all(10));
        assert_eq!(tree.n_leaves(), 2);
        assert_eq!(tree.predict_one(&[3.0, 0.0, 1.0, 0.0]), Some(1.0));
    }
}
