//! Classifier trait definition and raw probability output.

use ndarray::ArrayD;

use crate::error::Result;
use crate::ml::features::FeatureTable;

/// Raw output of a multilabel probabilistic classifier.
///
/// Libraries disagree on how per-label probabilities are stacked, so the
/// shape is only known at runtime; see
/// [`ProbabilityNormalizer`](crate::ml::probability::ProbabilityNormalizer).
#[derive(Debug, Clone, PartialEq)]
pub enum RawProbabilities {
    /// One array per label, each expected to be `[n_rows, 2]`.
    PerLabel(Vec<ArrayD<f64>>),
    /// A single array, expected to be `[n_rows, n_labels]` or
    /// `[n_rows, n_labels, 2]`.
    Stacked(ArrayD<f64>),
}

/// A fitted multilabel classifier.
///
/// Implementations must not mutate themselves during prediction; one
/// instance is shared across concurrent callers.
pub trait Classifier: Send + Sync {
    /// Predict per-label probabilities for every row of `table`.
    fn predict_probabilities(&self, table: &FeatureTable) -> Result<RawProbabilities>;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}
