//! Char filter implementations for ingredient text normalization.
//!
//! A char filter takes the whole text and returns a rewritten text. The
//! [`TextNormalizer`](crate::analysis::normalizer::TextNormalizer) runs a
//! fixed chain of them.
//!
//! # Available Filters
//!
//! - [`unicode_normalize::UnicodeNormalizationCharFilter`] - Unicode NFC composition
//! - [`lowercase::LowercaseCharFilter`] - Unicode lowercasing
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//! - [`pattern_replace::WhitespaceCollapseCharFilter`] - Whitespace collapse and trim
//! - [`translation::TranslationCharFilter`] - Whole-word term translation
//!
//! # Examples
//!
//! ```
//! use skinmatch::analysis::char_filter::CharFilter;
//! use skinmatch::analysis::char_filter::lowercase::LowercaseCharFilter;
//!
//! let filter = LowercaseCharFilter::new();
//! assert_eq!(filter.filter("Aqua, GLYCERIN"), "aqua, glycerin");
//! ```

/// Trait for character filters that rewrite text.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod pattern_replace;
pub mod translation;
pub mod unicode_normalize;
