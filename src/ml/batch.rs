//! Batch prediction over many ingredient lists.

use std::time::Instant;

use tracing::debug;

use crate::error::{Result, SkinMatchError};
use crate::ml::classifier::Classifier;
use crate::ml::features::{FeatureExtractor, FeatureTable};
use crate::ml::probability::ProbabilityNormalizer;
use crate::ml::types::ProbabilityVector;

/// Runs feature extraction, one classifier call and probability
/// normalization over a batch, keeping one output row per input text.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    extractor: FeatureExtractor,
    normalizer: ProbabilityNormalizer,
}

impl BatchRunner {
    pub fn new(extractor: FeatureExtractor) -> Self {
        Self {
            extractor,
            normalizer: ProbabilityNormalizer::new(),
        }
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    /// Build the feature table for `texts`, one row per text in input order.
    pub fn feature_table<S: AsRef<str>>(&self, texts: &[S]) -> FeatureTable {
        FeatureTable::from_records(self.extractor.extract_all(texts))
    }

    /// Predict probabilities for every text.
    ///
    /// The classifier is called once for the whole batch. A classifier
    /// failure fails the whole batch with
    /// [`SkinMatchError::BatchPrediction`]; output that matches no legal
    /// shape fails with [`SkinMatchError::Format`]. Duplicate and empty
    /// texts each keep their own row.
    pub fn run<S: AsRef<str>>(
        &self,
        texts: &[S],
        classifier: &dyn Classifier,
    ) -> Result<Vec<ProbabilityVector>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let table = self.feature_table(texts);
        debug!(rows = table.len(), classifier = classifier.name(), "running batch prediction");

        let raw = classifier.predict_probabilities(&table).map_err(|e| {
            SkinMatchError::batch_prediction(format!(
                "classifier '{}' failed on a batch of {} rows: {e}",
                classifier.name(),
                table.len()
            ))
        })?;

        let vectors = self.normalizer.normalize_batch(&raw, table.len())?;
        debug!(
            rows = vectors.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "batch prediction finished"
        );
        Ok(vectors)
    }

    /// Predict probabilities for a single text.
    pub fn run_single(&self, text: &str, classifier: &dyn Classifier) -> Result<ProbabilityVector> {
        let table = self.feature_table(&[text]);
        let raw = classifier.predict_probabilities(&table)?;
        self.normalizer.normalize_single(&raw)
    }
}
