//! Trainable multilabel skin-type classifier.
//!
//! The model mirrors a classic text pipeline: TF-IDF over the normalized
//! ingredient text, standard scaling of the eleven numeric features, and
//! one independent logistic regression per skin type.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::Instant;

use ndarray::{Array, IxDyn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::logistic::LogisticRegression;
use super::scaler::StandardScaler;
use super::tfidf::{SparseRow, TfIdfVectorizer};
use super::types::TrainingSample;
use crate::config::TrainingConfig;
use crate::error::{Result, SkinMatchError};
use crate::ml::classifier::{Classifier, RawProbabilities};
use crate::ml::features::{FeatureExtractor, FeatureRecord, FeatureTable, IngredientCountPolicy};
use crate::ml::models::{ModelMetadata, TrainingStats};
use crate::ml::types::{NUM_LABELS, SkinType};

const MODEL_NAME: &str = "skinmatch_multilabel_logreg";

/// Multilabel classifier over [`FeatureTable`]s.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkinClassifier {
    metadata: ModelMetadata,
    /// Column names the model was fitted on.
    columns: Vec<String>,
    /// Empty-input ingredient count policy of the training extractor.
    count_policy: IngredientCountPolicy,
    vectorizer: TfIdfVectorizer,
    scaler: StandardScaler,
    /// One model per label, in [`SkinType::ALL`] order.
    label_models: Vec<LogisticRegression>,
}

impl SkinClassifier {
    /// Fit a classifier on labeled samples.
    ///
    /// Features come from `extractor`, the same extractor used at
    /// prediction time.
    pub fn train(
        samples: &[TrainingSample],
        extractor: &FeatureExtractor,
        config: &TrainingConfig,
    ) -> Result<(Self, TrainingStats)> {
        config.validate()?;
        if samples.is_empty() {
            return Err(SkinMatchError::model("training requires at least one sample"));
        }

        let start = Instant::now();
        info!(samples = samples.len(), "training skin classifier");

        let texts: Vec<&str> = samples.iter().map(|s| s.ingredients.as_str()).collect();
        let table = FeatureTable::from_records(extractor.extract_all(&texts));

        let mut vectorizer = TfIdfVectorizer::new(
            config.max_features,
            config.ngram_range,
            config.english_stop_words,
        );
        let normalized: Vec<&str> = table
            .rows()
            .iter()
            .map(|r| r.normalized_text.as_str())
            .collect();
        vectorizer.fit(&normalized)?;
        debug!(vocabulary = vectorizer.vocabulary_size(), "fitted vectorizer");

        let numeric: Vec<Vec<f64>> = table
            .rows()
            .iter()
            .map(|r| r.numeric_values().to_vec())
            .collect();
        let scaler = StandardScaler::fit(&numeric)?;

        let mut model = Self {
            metadata: ModelMetadata::new(MODEL_NAME),
            columns: table.columns().to_vec(),
            count_policy: extractor.count_policy(),
            vectorizer,
            scaler,
            label_models: Vec::new(),
        };

        let rows = table
            .rows()
            .iter()
            .map(|r| model.design_row(r))
            .collect::<Result<Vec<_>>>()?;
        let dim = model.input_width();

        model.label_models = SkinType::ALL
            .par_iter()
            .map(|label| {
                let labels: Vec<bool> = samples.iter().map(|s| s.has(*label)).collect();
                let fitted = LogisticRegression::fit(&rows, &labels, dim, config)?;
                debug!(label = %label, "fitted label model");
                Ok(fitted)
            })
            .collect::<Result<Vec<_>>>()?;

        model.metadata.training_examples = samples.len();
        model.metadata.hyperparameters = HashMap::from([
            ("max_features".to_string(), config.max_features as f64),
            ("learning_rate".to_string(), config.learning_rate),
            ("epochs".to_string(), config.epochs as f64),
            ("l2_penalty".to_string(), config.l2_penalty),
        ]);
        model.metadata.positive_rates = SkinType::ALL
            .iter()
            .map(|label| {
                let positives = samples.iter().filter(|s| s.has(*label)).count();
                (label.to_string(), positives as f64 / samples.len() as f64)
            })
            .collect();

        let label_accuracy = SkinType::ALL
            .iter()
            .zip(&model.label_models)
            .map(|(label, lr)| {
                let correct = rows
                    .iter()
                    .zip(samples)
                    .filter(|(row, s)| (lr.predict_row(row) >= 0.5) == s.has(*label))
                    .count();
                (label.to_string(), correct as f64 / samples.len() as f64)
            })
            .collect();

        let stats = TrainingStats {
            examples: samples.len(),
            vocabulary_size: model.vectorizer.vocabulary_size(),
            training_time_ms: start.elapsed().as_millis() as u64,
            label_accuracy,
        };
        info!(
            elapsed_ms = stats.training_time_ms,
            vocabulary = stats.vocabulary_size,
            "training finished"
        );

        Ok((model, stats))
    }

    /// Save the model as JSON, creating parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, self)?;
        info!(path = %path.display(), "saved model");
        Ok(())
    }

    /// Load a model saved with [`SkinClassifier::save`].
    ///
    /// Any failure is reported as [`SkinMatchError::ModelUnavailable`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            SkinMatchError::model_unavailable(format!("cannot open {}: {e}", path.display()))
        })?;
        let model: SkinClassifier =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                SkinMatchError::model_unavailable(format!("cannot read {}: {e}", path.display()))
            })?;
        model.check_consistency().map_err(|e| {
            SkinMatchError::model_unavailable(format!("{} is inconsistent: {e}", path.display()))
        })?;
        info!(path = %path.display(), trained_at = %model.metadata.trained_at, "loaded model");
        Ok(model)
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Policy the model was trained with; serving must extract features
    /// the same way.
    pub fn count_policy(&self) -> IngredientCountPolicy {
        self.count_policy
    }

    /// Check that the fitted parts agree with each other and with the
    /// feature contract.
    fn check_consistency(&self) -> Result<()> {
        if self.columns.iter().map(String::as_str).ne(FeatureRecord::COLUMNS) {
            return Err(SkinMatchError::model(format!(
                "fitted columns {:?} differ from the feature columns",
                self.columns
            )));
        }
        self.vectorizer.check_consistency()?;
        self.scaler.check_consistency()?;
        if self.scaler.width() != FeatureRecord::NUM_NUMERIC {
            return Err(SkinMatchError::model(format!(
                "scaler covers {} columns, expected {}",
                self.scaler.width(),
                FeatureRecord::NUM_NUMERIC
            )));
        }
        if self.label_models.len() != NUM_LABELS {
            return Err(SkinMatchError::model(format!(
                "{} label models, expected {NUM_LABELS}",
                self.label_models.len()
            )));
        }
        let width = self.input_width();
        if let Some((label, lr)) = SkinType::ALL
            .iter()
            .zip(&self.label_models)
            .find(|(_, lr)| lr.width() != width)
        {
            return Err(SkinMatchError::model(format!(
                "{label} model has width {}, expected {width}",
                lr.width()
            )));
        }
        Ok(())
    }

    fn input_width(&self) -> usize {
        self.vectorizer.vocabulary_size() + self.scaler.width()
    }

    /// TF-IDF row followed by the scaled numeric columns.
    fn design_row(&self, record: &FeatureRecord) -> Result<SparseRow> {
        let mut row = self.vectorizer.transform(&record.normalized_text);
        let offset = self.vectorizer.vocabulary_size();
        let scaled = self.scaler.transform(&record.numeric_values())?;
        row.extend(scaled.into_iter().enumerate().map(|(i, v)| (offset + i, v)));
        Ok(row)
    }
}

impl Classifier for SkinClassifier {
    fn predict_probabilities(&self, table: &FeatureTable) -> Result<RawProbabilities> {
        if table.columns() != self.columns.as_slice() {
            return Err(SkinMatchError::model(format!(
                "feature columns {:?} do not match fitted columns {:?}",
                table.columns(),
                self.columns
            )));
        }

        let rows = table
            .rows()
            .iter()
            .map(|r| self.design_row(r))
            .collect::<Result<Vec<_>>>()?;

        let per_label = self
            .label_models
            .iter()
            .map(|lr| {
                let positive: Vec<f64> = rows.iter().map(|row| lr.predict_row(row)).collect();
                Array::from_shape_fn(IxDyn(&[rows.len(), 2]), |idx| {
                    let p = positive[idx[0]];
                    if idx[1] == 1 { p } else { 1.0 - p }
                })
            })
            .collect();

        Ok(RawProbabilities::PerLabel(per_label))
    }

    fn name(&self) -> &str {
        &self.metadata.name
    }
}
