//! # SkinMatch
//!
//! Skin-type suitability prediction from cosmetic ingredient lists.
//!
//! ## Features
//!
//! - Normalization of mixed Spanish/English ingredient text
//! - A fixed twelve-column feature contract (keyword counts, ratios, flags)
//! - Shape-agnostic normalization of multilabel classifier output
//! - Batch prediction over CSV tables
//! - A trainable TF-IDF + logistic-regression classifier
//!
//! ## Example
//!
//! ```
//! use skinmatch::ml::features::FeatureExtractor;
//!
//! let extractor = FeatureExtractor::new().unwrap();
//! let record = extractor.extract("Aqua, Glycerin, Niacinamide");
//! assert_eq!(record.normalized_text, "water, glycerin, niacinamide");
//! assert_eq!(record.ingredient_count, 3);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod ml;

pub mod prelude {
    pub use crate::analysis::TextNormalizer;
    pub use crate::config::{SkinMatchConfig, TrainingConfig};
    pub use crate::error::{Result, SkinMatchError};
    pub use crate::ml::{
        BatchRunner, Classifier, FeatureExtractor, FeatureRecord, FeatureTable, Predictor,
        ProbabilityNormalizer, ProbabilityVector, RawProbabilities, SkinClassifier, SkinType,
        TrainingSample,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
