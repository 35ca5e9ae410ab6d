//! Skin-type suitability prediction.
//!
//! Raw ingredient text flows through [`FeatureExtractor`] into a
//! [`FeatureTable`], a [`Classifier`] scores the table, and
//! [`ProbabilityNormalizer`] reshapes whatever the classifier returned into
//! one [`ProbabilityVector`] per row. [`BatchRunner`] and [`Predictor`] wrap
//! that flow.

pub mod batch;
pub mod classifier;
pub mod features;
pub mod keywords;
pub mod models;
pub mod predictor;
pub mod probability;
pub mod skin_classifier;
pub mod types;

// Re-export commonly used types
pub use batch::BatchRunner;
pub use classifier::{Classifier, RawProbabilities};
pub use features::{FeatureExtractor, FeatureRecord, FeatureTable, IngredientCountPolicy};
pub use keywords::{KeywordList, KeywordLists};
pub use models::{ModelMetadata, TrainingStats};
pub use predictor::Predictor;
pub use probability::{ProbabilityNormalizer, ProbabilityShape};
pub use skin_classifier::{SkinClassifier, TrainingSample};
pub use types::{NUM_LABELS, ProbabilityVector, SkinType};
