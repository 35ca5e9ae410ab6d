//! Binary logistic regression on sparse rows.

use serde::{Deserialize, Serialize};

use super::tfidf::SparseRow;
use crate::config::TrainingConfig;
use crate::error::{Result, SkinMatchError};

/// A binary logistic-regression model fitted with full-batch gradient
/// descent and an L2 penalty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    weights: Vec<f64>,
    bias: f64,
}

impl LogisticRegression {
    /// Fit on `rows` (each of width `dim`) against binary `labels`.
    pub fn fit(
        rows: &[SparseRow],
        labels: &[bool],
        dim: usize,
        config: &TrainingConfig,
    ) -> Result<Self> {
        if rows.is_empty() {
            return Err(SkinMatchError::model("cannot fit on zero rows"));
        }
        if rows.len() != labels.len() {
            return Err(SkinMatchError::model(format!(
                "{} rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }
        if let Some(bad) = rows.iter().flatten().find(|(idx, _)| *idx >= dim) {
            return Err(SkinMatchError::model(format!(
                "feature index {} out of range for width {dim}",
                bad.0
            )));
        }

        let sample_weights = class_weights(labels, config.balanced_class_weights);
        let total_weight: f64 = sample_weights.iter().sum();

        let weighted_positive: f64 = labels
            .iter()
            .zip(&sample_weights)
            .filter(|(y, _)| **y)
            .map(|(_, w)| w)
            .sum();
        let base_rate = (weighted_positive / total_weight).clamp(1e-3, 1.0 - 1e-3);

        let mut model = Self {
            weights: vec![0.0; dim],
            bias: (base_rate / (1.0 - base_rate)).ln(),
        };

        let mut grad = vec![0.0; dim];
        for _ in 0..config.epochs {
            grad.iter_mut().for_each(|g| *g = 0.0);
            let mut grad_bias = 0.0;

            for ((row, &label), &weight) in rows.iter().zip(labels).zip(&sample_weights) {
                let target = if label { 1.0 } else { 0.0 };
                let error = weight * (model.predict_row(row) - target) / total_weight;
                for &(idx, value) in row {
                    grad[idx] += error * value;
                }
                grad_bias += error;
            }

            for (w, g) in model.weights.iter_mut().zip(&grad) {
                *w -= config.learning_rate * (g + config.l2_penalty * *w);
            }
            model.bias -= config.learning_rate * grad_bias;
        }

        Ok(model)
    }

    /// Positive-class probability for one row.
    pub fn predict_row(&self, row: &SparseRow) -> f64 {
        let z = self.bias
            + row
                .iter()
                .filter_map(|&(idx, value)| self.weights.get(idx).map(|w| w * value))
                .sum::<f64>();
        sigmoid(z)
    }

    pub fn width(&self) -> usize {
        self.weights.len()
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Per-sample weights; balanced weighting gives each class half the total.
fn class_weights(labels: &[bool], balanced: bool) -> Vec<f64> {
    let n = labels.len() as f64;
    let positives = labels.iter().filter(|y| **y).count() as f64;
    let negatives = n - positives;

    if !balanced || positives == 0.0 || negatives == 0.0 {
        return vec![1.0; labels.len()];
    }

    let positive_weight = n / (2.0 * positives);
    let negative_weight = n / (2.0 * negatives);
    labels
        .iter()
        .map(|&y| if y { positive_weight } else { negative_weight })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TrainingConfig {
        TrainingConfig {
            epochs: 500,
            learning_rate: 1.0,
            ..TrainingConfig::default()
        }
    }

    #[test]
    fn test_separable_data() {
        let rows = vec![
            vec![(0, 1.0)],
            vec![(0, 1.0)],
            vec![(1, 1.0)],
            vec![(1, 1.0)],
        ];
        let labels = [true, true, false, false];
        let model = LogisticRegression::fit(&rows, &labels, 2, &config()).unwrap();

        assert!(model.predict_row(&vec![(0, 1.0)]) > 0.8);
        assert!(model.predict_row(&vec![(1, 1.0)]) < 0.2);
    }

    #[test]
    fn test_constant_label_tracks_base_rate() {
        let rows = vec![vec![(0, 1.0)], vec![]];
        let model = LogisticRegression::fit(&rows, &[false, false], 1, &config()).unwrap();
        assert!(model.predict_row(&vec![]) < 0.01);
    }

    #[test]
    fn test_balanced_weights() {
        let weights = class_weights(&[true, false, false, false], true);
        assert_eq!(weights, vec![2.0, 2.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0]);
        assert_eq!(class_weights(&[true, true], true), vec![1.0, 1.0]);
        assert_eq!(class_weights(&[true, false, false], false), vec![1.0; 3]);
    }

    #[test]
    fn test_fit_rejects_bad_input() {
        let cfg = config();
        assert!(LogisticRegression::fit(&[], &[], 1, &cfg).is_err());
        assert!(LogisticRegression::fit(&[vec![]], &[true, false], 1, &cfg).is_err());
        assert!(LogisticRegression::fit(&[vec![(3, 1.0)]], &[true], 2, &cfg).is_err());
    }

    #[test]
    fn test_sigmoid_is_stable() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(1000.0) <= 1.0);
        assert!(sigmoid(-1000.0) >= 0.0);
    }
}
