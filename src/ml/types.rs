//! Common types for skin-type prediction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkinMatchError};

/// Number of skin-type labels predicted for every product.
pub const NUM_LABELS: usize = 5;

/// Skin types, in the fixed label order shared by the classifier, the
/// normalizer and every export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkinType {
    /// Reacts easily to fragrance, alcohol and acids.
    Sensitive,
    /// Produces excess sebum.
    Oily,
    /// Lacks hydration.
    Dry,
    /// Dry and oily zones at once.
    Combination,
    /// Balanced, tolerates most ingredients.
    Normal,
}

impl SkinType {
    /// All labels in label order.
    pub const ALL: [SkinType; NUM_LABELS] = [
        SkinType::Sensitive,
        SkinType::Oily,
        SkinType::Dry,
        SkinType::Combination,
        SkinType::Normal,
    ];

    /// Column/display name of the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkinType::Sensitive => "Sensitive",
            SkinType::Oily => "Oily",
            SkinType::Dry => "Dry",
            SkinType::Combination => "Combination",
            SkinType::Normal => "Normal",
        }
    }

    /// Position of the label in [`SkinType::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for SkinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkinType {
    type Err = SkinMatchError;

    fn from_str(s: &str) -> Result<Self> {
        SkinType::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SkinMatchError::invalid_argument(format!("unknown skin type '{s}'")))
    }
}

/// Per-label positive-class probabilities, index-aligned to [`SkinType::ALL`].
///
/// Labels are independent: values do not have to sum to 1. The constructor
/// rejects values that are not finite or fall outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; NUM_LABELS]", into = "[f64; NUM_LABELS]")]
pub struct ProbabilityVector([f64; NUM_LABELS]);

impl ProbabilityVector {
    /// Create a vector, validating every value.
    pub fn new(values: [f64; NUM_LABELS]) -> Result<Self> {
        if let Some((idx, value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0 || **v > 1.0)
        {
            return Err(SkinMatchError::format(format!(
                "probability for {} is {value}, expected a value in [0, 1]",
                SkinType::ALL[idx]
            )));
        }
        Ok(Self(values))
    }

    /// Create a vector from a slice that must hold exactly one value per label.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        let values: [f64; NUM_LABELS] = values.try_into().map_err(|_| {
            SkinMatchError::format(format!(
                "expected {NUM_LABELS} label probabilities, got {}",
                values.len()
            ))
        })?;
        Self::new(values)
    }

    /// Probability for one label.
    pub fn get(&self, label: SkinType) -> f64 {
        self.0[label.index()]
    }

    /// Values in label order.
    pub fn values(&self) -> &[f64; NUM_LABELS] {
        &self.0
    }

    /// `(label, probability)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (SkinType, f64)> + '_ {
        SkinType::ALL.into_iter().zip(self.0.iter().copied())
    }

    /// Pairs sorted by descending probability, ties kept in label order.
    pub fn ranked(&self) -> Vec<(SkinType, f64)> {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
        pairs
    }

    /// The label with the highest probability.
    pub fn best(&self) -> SkinType {
        self.ranked()[0].0
    }
}

impl TryFrom<[f64; NUM_LABELS]> for ProbabilityVector {
    type Error = SkinMatchError;

    fn try_from(values: [f64; NUM_LABELS]) -> Result<Self> {
        Self::new(values)
    }
}

impl From<ProbabilityVector> for [f64; NUM_LABELS] {
    fn from(vector: ProbabilityVector) -> Self {
        vector.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_order() {
        let names: Vec<_> = SkinType::ALL.iter().map(|l| l.as_str()).collect();
        assert_eq!(names, vec!["Sensitive", "Oily", "Dry", "Combination", "Normal"]);
        for (idx, label) in SkinType::ALL.iter().enumerate() {
            assert_eq!(label.index(), idx);
        }
    }

    #[test]
    fn test_skin_type_from_str() {
        assert_eq!("oily".parse::<SkinType>().unwrap(), SkinType::Oily);
        assert_eq!(" COMBINATION ".parse::<SkinType>().unwrap(), SkinType::Combination);
        assert!("greasy".parse::<SkinType>().is_err());
    }

    #[test]
    fn test_probability_vector_validation() {
        assert!(ProbabilityVector::new([0.0, 0.5, 1.0, 0.2, 0.9]).is_ok());

        let err = ProbabilityVector::new([0.0, 1.5, 0.0, 0.0, 0.0]).unwrap_err();
        assert!(err.is_format_error());
        assert!(ProbabilityVector::new([f64::NAN, 0.0, 0.0, 0.0, 0.0]).is_err());
        assert!(ProbabilityVector::from_slice(&[0.1, 0.2]).is_err());
    }

    #[test]
    fn test_ranked_does_not_reorder_values() {
        let vector = ProbabilityVector::new([0.2, 0.9, 0.4, 0.9, 0.1]).unwrap();
        let ranked = vector.ranked();
        assert_eq!(ranked[0], (SkinType::Oily, 0.9));
        assert_eq!(ranked[1], (SkinType::Combination, 0.9));
        assert_eq!(ranked[4], (SkinType::Normal, 0.1));
        assert_eq!(vector.best(), SkinType::Oily);
        assert_eq!(vector.values(), &[0.2, 0.9, 0.4, 0.9, 0.1]);
        assert_eq!(vector.get(SkinType::Dry), 0.4);
    }

    #[test]
    fn test_serde_as_array() {
        let vector = ProbabilityVector::new([0.1, 0.2, 0.3, 0.4, 0.5]).unwrap();
        let json = serde_json::to_string(&vector).unwrap();
        assert_eq!(json, "[0.1,0.2,0.3,0.4,0.5]");
        let back: ProbabilityVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vector);
        assert!(serde_json::from_str::<ProbabilityVector>("[2.0,0,0,0,0]").is_err());
    }
}
