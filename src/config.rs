//! Configuration for SkinMatch.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! {
//!   "model_path": "./models/skinmatch_model.json",
//!   "ingredient_count_policy": "at_least_one",
//!   "training": { "epochs": 500 }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SkinMatchError};
use crate::ml::features::IngredientCountPolicy;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinMatchConfig {
    /// Where the trained model is saved and loaded.
    pub model_path: PathBuf,
    /// Name of the ingredient text column in CSV input.
    pub text_column: String,
    /// Ingredient count for empty text.
    pub ingredient_count_policy: IngredientCountPolicy,
    /// Training settings.
    pub training: TrainingConfig,
}

impl Default for SkinMatchConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("./models/skinmatch_model.json"),
            text_column: "Ingredients".to_string(),
            ingredient_count_policy: IngredientCountPolicy::default(),
            training: TrainingConfig::default(),
        }
    }
}

impl SkinMatchConfig {
    /// Load a config from a JSON file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading configuration");
        let content = std::fs::read_to_string(path)?;
        let config: SkinMatchConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values make sense.
    pub fn validate(&self) -> Result<()> {
        if self.text_column.trim().is_empty() {
            return Err(SkinMatchError::invalid_config("text_column cannot be empty"));
        }
        if self.model_path.as_os_str().is_empty() {
            return Err(SkinMatchError::invalid_config("model_path cannot be empty"));
        }
        self.training.validate()
    }
}

/// Settings for fitting a [`SkinClassifier`](crate::ml::skin_classifier::SkinClassifier).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Vocabulary size cap for the TF-IDF vectorizer.
    pub max_features: usize,
    /// Smallest and largest n-gram length.
    pub ngram_range: (usize, usize),
    /// Drop English stop words before counting n-grams.
    pub english_stop_words: bool,
    /// Gradient descent step size.
    pub learning_rate: f64,
    /// Number of full passes over the training data.
    pub epochs: usize,
    /// L2 penalty strength.
    pub l2_penalty: f64,
    /// Reweight classes inversely to their frequency.
    pub balanced_class_weights: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            max_features: 3000,
            ngram_range: (1, 2),
            english_stop_words: true,
            learning_rate: 0.5,
            epochs: 300,
            l2_penalty: 1e-4,
            balanced_class_weights: true,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(SkinMatchError::invalid_config(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }
        if self.max_features == 0 {
            return Err(SkinMatchError::invalid_config(
                "max_features must be greater than 0",
            ));
        }
        if self.epochs == 0 {
            return Err(SkinMatchError::invalid_config("epochs must be greater than 0"));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(SkinMatchError::invalid_config(
                "learning_rate must be a positive number",
            ));
        }
        if !(self.l2_penalty.is_finite() && self.l2_penalty >= 0.0) {
            return Err(SkinMatchError::invalid_config(
                "l2_penalty must be zero or positive",
            ));
        }
        Ok(())
    }
}
