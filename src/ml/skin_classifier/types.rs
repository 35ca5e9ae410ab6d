//! Common types for skin classifier training.

use serde::{Deserialize, Serialize};

use crate::ml::types::{NUM_LABELS, SkinType};

/// One labeled product: its ingredient list and which skin types it suits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    /// Raw ingredient text.
    pub ingredients: String,
    /// Label flags in [`SkinType::ALL`] order.
    pub labels: [bool; NUM_LABELS],
}

impl TrainingSample {
    pub fn new<S: Into<String>>(ingredients: S, labels: [bool; NUM_LABELS]) -> Self {
        Self {
            ingredients: ingredients.into(),
            labels,
        }
    }

    /// Build a sample from the set of skin types it suits.
    pub fn with_labels<S: Into<String>>(ingredients: S, suits: &[SkinType]) -> Self {
        let mut labels = [false; NUM_LABELS];
        for label in suits {
            labels[label.index()] = true;
        }
        Self::new(ingredients, labels)
    }

    pub fn has(&self, label: SkinType) -> bool {
        self.labels[label.index()]
    }
}
