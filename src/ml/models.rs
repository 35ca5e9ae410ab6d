//! Model metadata and training statistics.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Model metadata for tracking model information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name/identifier.
    pub name: String,
    /// Version of the crate that trained the model.
    pub version: String,
    /// Training timestamp.
    pub trained_at: chrono::DateTime<chrono::Utc>,
    /// Number of training examples used.
    pub training_examples: usize,
    /// Model hyperparameters.
    pub hyperparameters: HashMap<String, f64>,
    /// Share of positive examples per label.
    pub positive_rates: HashMap<String, f64>,
}

impl ModelMetadata {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            version: crate::VERSION.to_string(),
            trained_at: chrono::Utc::now(),
            training_examples: 0,
            hyperparameters: HashMap::new(),
            positive_rates: HashMap::new(),
        }
    }
}

/// Training statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Number of examples the model was fitted on.
    pub examples: usize,
    /// Number of text features kept by the vectorizer.
    pub vocabulary_size: usize,
    /// Training time in milliseconds.
    pub training_time_ms: u64,
    /// Training-set accuracy per label at a 0.5 threshold.
    pub label_accuracy: HashMap<String, f64>,
}
