//! Tabular input and output for batch prediction and training.

pub mod csv;

pub use self::csv::{IngredientTable, load_training_samples};
