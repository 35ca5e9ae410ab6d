//! Feature extraction from ingredient text.
//!
//! [`FeatureExtractor`] turns one ingredient list into a [`FeatureRecord`]:
//! the normalized text plus eleven numeric features. Column names are part
//! of the contract with fitted models and must not change.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::TextNormalizer;
use crate::error::Result;
use crate::ml::keywords::KeywordLists;

/// How to count ingredients when the normalized text is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientCountPolicy {
    /// Empty text has zero ingredients.
    #[default]
    ZeroWhenEmpty,
    /// The comma split count, which is never below one.
    AtLeastOne,
}

/// Fixed-width feature record for one ingredient list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    #[serde(rename = "ingredientes_limpios")]
    pub normalized_text: String,
    #[serde(rename = "cantidad_ingredientes")]
    pub ingredient_count: usize,
    #[serde(rename = "longitud_texto")]
    pub text_length: usize,
    #[serde(rename = "contiene_alcohol")]
    pub has_alcohol: u8,
    #[serde(rename = "contiene_fragancia")]
    pub has_fragrance: u8,
    #[serde(rename = "contiene_acido")]
    pub has_acid: u8,
    #[serde(rename = "cnt_irritantes")]
    pub irritant_count: usize,
    #[serde(rename = "cnt_emolientes")]
    pub emollient_count: usize,
    #[serde(rename = "cnt_aceites")]
    pub oil_count: usize,
    #[serde(rename = "cnt_calmantes")]
    pub soothing_count: usize,
    #[serde(rename = "ratio_irritantes")]
    pub irritant_ratio: f64,
    #[serde(rename = "ratio_calmantes")]
    pub soothing_ratio: f64,
}

impl FeatureRecord {
    /// Column names in record order.
    pub const COLUMNS: [&'static str; 12] = [
        "ingredientes_limpios",
        "cantidad_ingredientes",
        "longitud_texto",
        "contiene_alcohol",
        "contiene_fragancia",
        "contiene_acido",
        "cnt_irritantes",
        "cnt_emolientes",
        "cnt_aceites",
        "cnt_calmantes",
        "ratio_irritantes",
        "ratio_calmantes",
    ];

    /// Name of the single text column.
    pub const TEXT_COLUMN: &'static str = "ingredientes_limpios";

    /// Number of numeric columns.
    pub const NUM_NUMERIC: usize = 11;

    /// The numeric columns, in [`FeatureRecord::COLUMNS`] order.
    pub fn numeric_values(&self) -> [f64; Self::NUM_NUMERIC] {
        [
            self.ingredient_count as f64,
            self.text_length as f64,
            f64::from(self.has_alcohol),
            f64::from(self.has_fragrance),
            f64::from(self.has_acid),
            self.irritant_count as f64,
            self.emollient_count as f64,
            self.oil_count as f64,
            self.soothing_count as f64,
            self.irritant_ratio,
            self.soothing_ratio,
        ]
    }

    /// All columns rendered as strings, in column order.
    pub fn to_string_row(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(Self::COLUMNS.len());
        row.push(self.normalized_text.clone());
        row.extend(self.numeric_values().iter().map(|v| v.to_string()));
        row
    }
}

/// Feature table handed to a classifier in one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    columns: Vec<String>,
    rows: Vec<FeatureRecord>,
}

impl FeatureTable {
    /// Build a table from records; columns follow the record field order.
    pub fn from_records(rows: Vec<FeatureRecord>) -> Self {
        Self {
            columns: FeatureRecord::COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    /// Build a table with explicit column names.
    ///
    /// Used when a table arrives from elsewhere (e.g. a hand-written request)
    /// and the classifier has to check the schema itself.
    pub fn with_columns(columns: Vec<String>, rows: Vec<FeatureRecord>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[FeatureRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Feature extractor shared by training and serving.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    normalizer: Arc<TextNormalizer>,
    keywords: Arc<KeywordLists>,
    count_policy: IngredientCountPolicy,
}

impl FeatureExtractor {
    /// Create an extractor with the default normalizer and keyword lists.
    pub fn new() -> Result<Self> {
        Ok(Self::with_parts(
            Arc::new(TextNormalizer::new()?),
            Arc::new(KeywordLists::default()),
            IngredientCountPolicy::default(),
        ))
    }

    /// Create an extractor from shared parts.
    pub fn with_parts(
        normalizer: Arc<TextNormalizer>,
        keywords: Arc<KeywordLists>,
        count_policy: IngredientCountPolicy,
    ) -> Self {
        Self {
            normalizer,
            keywords,
            count_policy,
        }
    }

    /// Use a different empty-input ingredient count policy.
    pub fn with_count_policy(mut self, count_policy: IngredientCountPolicy) -> Self {
        self.count_policy = count_policy;
        self
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn count_policy(&self) -> IngredientCountPolicy {
        self.count_policy
    }

    /// Extract the feature record for one ingredient list.
    pub fn extract(&self, text: &str) -> FeatureRecord {
        let normalized = self.normalizer.normalize(text);

        let ingredient_count = self.count_ingredients(&normalized);
        let text_length = normalized.chars().count();

        let irritant_count = self.keywords.irritants.count_in(&normalized);
        let emollient_count = self.keywords.emollients.count_in(&normalized);
        let oil_count = self.keywords.oils.count_in(&normalized);
        let soothing_count = self.keywords.soothing.count_in(&normalized);

        // +1 keeps the denominator positive for empty text.
        let denominator = (ingredient_count + 1) as f64;

        FeatureRecord {
            ingredient_count,
            text_length,
            has_alcohol: u8::from(normalized.contains("alcohol")),
            has_fragrance: u8::from(normalized.contains("fragrance")),
            has_acid: u8::from(normalized.contains("acid")),
            irritant_count,
            emollient_count,
            oil_count,
            soothing_count,
            irritant_ratio: irritant_count as f64 / denominator,
            soothing_ratio: soothing_count as f64 / denominator,
            normalized_text: normalized,
        }
    }

    /// Extract records for many texts, preserving input order.
    pub fn extract_all<S: AsRef<str>>(&self, texts: &[S]) -> Vec<FeatureRecord> {
        texts.iter().map(|t| self.extract(t.as_ref())).collect()
    }

    fn count_ingredients(&self, normalized: &str) -> usize {
        match self.count_policy {
            IngredientCountPolicy::ZeroWhenEmpty if normalized.trim().is_empty() => 0,
            _ => normalized.split(',').count(),
        }
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::with_parts(
            Arc::new(TextNormalizer::default()),
            Arc::new(KeywordLists::default()),
            IngredientCountPolicy::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> FeatureExtractor {
        FeatureExtractor::new().unwrap()
    }

    #[test]
    fn test_hydrating_serum() {
        let record = extractor().extract("Aqua, Glycerin, Niacinamide, Hyaluronic Acid");

        assert!(record
            .normalized_text
            .contains("water, glycerin, niacinamide, hyaluronic acid"));
        assert_eq!(record.ingredient_count, 4);
        assert!(record.soothing_count >= 2);
        assert_eq!(record.emollient_count, 1);
        assert_eq!(record.has_acid, 1);
        assert_eq!(record.has_alcohol, 0);
        assert_eq!(record.has_fragrance, 0);
        assert_eq!(record.text_length, record.normalized_text.chars().count());
        assert!((record.soothing_ratio - 2.0 / 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_irritating_toner() {
        let record = extractor().extract("Alcohol Denat, Fragrance, Salicylic Acid");

        assert_eq!(record.has_alcohol, 1);
        assert_eq!(record.has_fragrance, 1);
        assert_eq!(record.has_acid, 1);
        assert!(record.irritant_count >= 2);
        assert_eq!(record.ingredient_count, 3);
        assert!((record.irritant_ratio - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input_zero_policy() {
        let record = extractor().extract("");

        assert_eq!(record.normalized_text, "");
        assert_eq!(record.ingredient_count, 0);
        assert_eq!(record.text_length, 0);
        assert_eq!(record.irritant_count, 0);
        assert_eq!(record.emollient_count, 0);
        assert_eq!(record.oil_count, 0);
        assert_eq!(record.soothing_count, 0);
        assert_eq!(record.has_alcohol + record.has_fragrance + record.has_acid, 0);
        assert_eq!(record.irritant_ratio, 0.0);
        assert_eq!(record.soothing_ratio, 0.0);
    }

    #[test]
    fn test_empty_input_at_least_one_policy() {
        let extractor = extractor().with_count_policy(IngredientCountPolicy::AtLeastOne);
        let record = extractor.extract("  ***  ");
        assert_eq!(record.ingredient_count, 1);
        assert_eq!(record.irritant_ratio, 0.0);

        let record = extractor.extract("water, glycerin");
        assert_eq!(record.ingredient_count, 2);
    }

    #[test]
    fn test_deterministic() {
        let extractor = extractor();
        let text = "Agua, Aloe Vera, Perfume, Cetyl Alcohol, Jojoba Oil , Shea";
        assert_eq!(extractor.extract(text), extractor.extract(text));
    }

    #[test]
    fn test_spanish_translation_feeds_counts() {
        let record = extractor().extract("Agua, Aloe Vera, Perfume");
        assert_eq!(
            record.normalized_text,
            "water, aloe barbadensis leaf extract, fragrance"
        );
        assert_eq!(record.soothing_count, 1);
        assert_eq!(record.has_fragrance, 1);
    }

    #[test]
    fn test_ratio_bounds_and_monotonicity() {
        let extractor = extractor();
        let mut previous = f64::INFINITY;
        for extra in 0..6 {
            let mut text = String::from("retinol, menthol");
            for i in 0..extra {
                text.push_str(&format!(", water{i}"));
            }
            let record = extractor.extract(&text);
            assert_eq!(record.irritant_count, 2);
            assert!(record.irritant_ratio >= 0.0);
            assert!(record.irritant_ratio <= record.irritant_count as f64);
            assert!(record.irritant_ratio <= previous);
            previous = record.irritant_ratio;
        }
    }

    #[test]
    fn test_columns_match_serialized_names() {
        let record = extractor().extract("water");
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), FeatureRecord::COLUMNS.len());
        for column in FeatureRecord::COLUMNS {
            assert!(object.contains_key(column), "missing {column}");
        }
    }

    #[test]
    fn test_string_row_and_numeric_values() {
        let record = extractor().extract("Cetyl Alcohol, Jojoba Oil , Aqua");
        let row = record.to_string_row();
        assert_eq!(row.len(), 12);
        assert_eq!(row[0], record.normalized_text);
        assert_eq!(row[1], "3");
        assert_eq!(row[3], "1");
        assert_eq!(record.numeric_values().len(), FeatureRecord::NUM_NUMERIC);
        assert_eq!(record.numeric_values()[7], record.oil_count as f64);
    }

    #[test]
    fn test_table_preserves_order() {
        let extractor = extractor();
        let records = extractor.extract_all(&["shea", "", "shea"]);
        let table = FeatureTable::from_records(records);
        assert_eq!(table.len(), 3);
        assert_eq!(table.columns()[0], FeatureRecord::TEXT_COLUMN);
        assert_eq!(table.rows()[0], table.rows()[2]);
        assert_eq!(table.rows()[1].ingredient_count, 0);
    }
}
