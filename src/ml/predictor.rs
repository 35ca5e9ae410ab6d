//! Serving facade over feature extraction and a loaded classifier.

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::SkinMatchConfig;
use crate::error::{Result, SkinMatchError};
use crate::ml::batch::BatchRunner;
use crate::ml::classifier::Classifier;
use crate::ml::features::{FeatureExtractor, FeatureRecord};
use crate::ml::skin_classifier::SkinClassifier;
use crate::ml::types::ProbabilityVector;

/// Predicts skin-type suitability for ingredient lists.
///
/// A predictor without a classifier is still usable for feature
/// extraction; prediction calls fail with
/// [`SkinMatchError::ModelUnavailable`] without touching anything else.
#[derive(Clone)]
pub struct Predictor {
    runner: BatchRunner,
    classifier: Option<Arc<dyn Classifier>>,
}

impl fmt::Debug for Predictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predictor")
            .field("classifier", &self.classifier.as_ref().map(|c| c.name()))
            .finish()
    }
}

impl Predictor {
    /// Build a predictor from configuration, loading the model at
    /// `config.model_path`.
    ///
    /// A model that cannot be loaded leaves the predictor unavailable
    /// instead of failing. A loaded model's ingredient count policy
    /// overrides the configured one.
    pub fn load(config: &SkinMatchConfig) -> Result<Self> {
        config.validate()?;
        let extractor = FeatureExtractor::new()?;

        match SkinClassifier::load(&config.model_path) {
            Ok(model) => {
                let policy = model.count_policy();
                if policy != config.ingredient_count_policy {
                    warn!(
                        configured = ?config.ingredient_count_policy,
                        trained = ?policy,
                        "using the model's ingredient count policy"
                    );
                }
                Ok(Self::with_classifier(
                    extractor.with_count_policy(policy),
                    Arc::new(model),
                ))
            }
            Err(e) => {
                warn!("model unavailable: {e}");
                Ok(Self::unavailable(
                    extractor.with_count_policy(config.ingredient_count_policy),
                ))
            }
        }
    }

    /// Build a predictor around an already loaded classifier.
    pub fn with_classifier(extractor: FeatureExtractor, classifier: Arc<dyn Classifier>) -> Self {
        info!(classifier = classifier.name(), "predictor ready");
        Self {
            runner: BatchRunner::new(extractor),
            classifier: Some(classifier),
        }
    }

    /// Build a predictor with no classifier.
    pub fn unavailable(extractor: FeatureExtractor) -> Self {
        Self {
            runner: BatchRunner::new(extractor),
            classifier: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        self.runner.extractor()
    }

    /// Extract features without predicting.
    pub fn features(&self, text: &str) -> FeatureRecord {
        self.runner.extractor().extract(text)
    }

    /// Predict probabilities for one ingredient list.
    ///
    /// Blank text is rejected with an invalid-argument error.
    pub fn predict_one(&self, text: &str) -> Result<ProbabilityVector> {
        if text.trim().is_empty() {
            return Err(SkinMatchError::invalid_argument(
                "ingredient text cannot be empty",
            ));
        }
        let classifier = self.classifier()?;
        self.runner.run_single(text, classifier)
    }

    /// Predict probabilities for many ingredient lists, one vector per
    /// text in input order.
    pub fn predict_batch<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<ProbabilityVector>> {
        let classifier = self.classifier()?;
        self.runner.run(texts, classifier)
    }

    fn classifier(&self) -> Result<&dyn Classifier> {
        self.classifier
            .as_deref()
            .ok_or_else(|| SkinMatchError::model_unavailable("no classifier is loaded"))
    }
}
