//! Trainable multilabel classifier for skin-type suitability.
//!
//! # Architecture
//!
//! - `TfIdfVectorizer`: n-gram TF-IDF over normalized ingredient text
//! - `StandardScaler`: scaling of the numeric feature columns
//! - `LogisticRegression`: one binary model per skin type
//! - `SkinClassifier`: ties them together and implements
//!   [`Classifier`](crate::ml::classifier::Classifier)
//! - `TrainingSample`: labeled training data
//!
//! # Example
//!
//! ```rust,no_run
//! use skinmatch::config::TrainingConfig;
//! use skinmatch::ml::features::FeatureExtractor;
//! use skinmatch::ml::skin_classifier::{SkinClassifier, TrainingSample};
//! use skinmatch::ml::types::SkinType;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let samples = vec![
//!     TrainingSample::with_labels("Aqua, Shea Butter", &[SkinType::Dry]),
//!     TrainingSample::with_labels("Alcohol, Salicylic Acid", &[SkinType::Oily]),
//! ];
//! let extractor = FeatureExtractor::new()?;
//! let (model, stats) = SkinClassifier::train(&samples, &extractor, &TrainingConfig::default())?;
//! model.save("models/skinmatch_model.json")?;
//! println!("trained on {} examples", stats.examples);
//! # Ok(())
//! # }
//! ```

mod classifier;
mod logistic;
mod scaler;
mod tfidf;
mod types;

pub use classifier::SkinClassifier;
pub use logistic::LogisticRegression;
pub use scaler::StandardScaler;
pub use tfidf::{SparseRow, TfIdfVectorizer};
pub use types::TrainingSample;
