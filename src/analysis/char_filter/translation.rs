//! Whole-word translation of Spanish ingredient names to their English/INCI
//! equivalents.

use regex::Regex;

use super::CharFilter;
use crate::error::{Result, SkinMatchError};

/// Default Spanish to English ingredient dictionary, in application order.
///
/// Terms must already be in normalized form (lowercase, allowed characters
/// only), since the filter runs after cleaning.
pub const DEFAULT_TRANSLATIONS: &[(&str, &str)] = &[
    ("agua", "water"),
    ("aqua", "water"),
    ("glicerina", "glycerin"),
    ("ácido hialurónico", "hyaluronic acid"),
    ("acido hialuronico", "hyaluronic acid"),
    ("niacinamida", "niacinamide"),
    ("aloe vera", "aloe barbadensis leaf extract"),
    ("fragancia", "fragrance"),
    ("perfume", "fragrance"),
];

#[derive(Clone, Debug)]
struct TranslationRule {
    pattern: Regex,
    replacement: String,
}

/// A char filter applying an ordered list of word-boundary anchored
/// substitutions. Each rule sees the output of the previous ones.
#[derive(Clone, Debug)]
pub struct TranslationCharFilter {
    rules: Vec<TranslationRule>,
}

impl TranslationCharFilter {
    /// Build a filter from `(term, replacement)` pairs.
    pub fn new<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let rules = entries
            .into_iter()
            .map(|(term, replacement)| {
                let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(term))).map_err(|e| {
                    SkinMatchError::analysis(format!("Invalid translation term '{term}': {e}"))
                })?;
                Ok(TranslationRule {
                    pattern,
                    replacement: replacement.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }
}

impl CharFilter for TranslationCharFilter {
    fn filter(&self, input: &str) -> String {
        let mut text = input.to_string();
        for rule in &self.rules {
            if rule.pattern.is_match(&text) {
                text = rule
                    .pattern
                    .replace_all(&text, regex::NoExpand(&rule.replacement))
                    .into_owned();
            }
        }
        text
    }

    fn name(&self) -> &'static str {
        "translation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> TranslationCharFilter {
        TranslationCharFilter::new(DEFAULT_TRANSLATIONS.iter().copied()).unwrap()
    }

    #[test]
    fn test_standalone_word_is_translated() {
        assert_eq!(filter().filter("agua"), "water");
        assert_eq!(filter().filter("agua, glicerina"), "water, glycerin");
    }

    #[test]
    fn test_no_translation_inside_longer_word() {
        assert_eq!(filter().filter("paraguas"), "paraguas");
        assert_eq!(filter().filter("aguacate oil"), "aguacate oil");
    }

    #[test]
    fn test_accented_and_plain_forms() {
        assert_eq!(
            filter().filter("ácido hialurónico, acido hialuronico"),
            "hyaluronic acid, hyaluronic acid"
        );
    }

    #[test]
    fn test_multi_word_translation() {
        assert_eq!(
            filter().filter("aloe vera, perfume"),
            "aloe barbadensis leaf extract, fragrance"
        );
    }

    #[test]
    fn test_rules_apply_in_order() {
        let filter = TranslationCharFilter::new([("a", "b"), ("b", "c")]).unwrap();
        assert_eq!(filter.filter("a"), "c");

        let filter = TranslationCharFilter::new([("b", "c"), ("a", "b")]).unwrap();
        assert_eq!(filter.filter("a"), "b");
    }
}
