//! Ingredient text normalizer.
//!
//! Runs a fixed chain of char filters over raw ingredient text:
//! 1. Unicode NFC composition
//! 2. Lowercasing
//! 3. Every character outside the allowed set becomes a space
//! 4. Whitespace runs collapse to one space, ends are trimmed
//! 5. Spanish ingredient names are translated word by word
//!
//! The allowed set is `a-z`, `á é í ó ú ñ`, digits, comma, parentheses,
//! hyphen and space. Normalization never fails and is idempotent.
//!
//! # Examples
//!
//! ```
//! use skinmatch::analysis::normalizer::TextNormalizer;
//!
//! let normalizer = TextNormalizer::new().unwrap();
//! assert_eq!(
//!     normalizer.normalize("Agua; Glicerina,  Niacinamida!"),
//!     "water glycerin, niacinamide"
//! );
//! ```

use std::fmt;
use std::sync::Arc;

use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_filter::lowercase::LowercaseCharFilter;
use crate::analysis::char_filter::pattern_replace::{
    PatternReplaceCharFilter, WhitespaceCollapseCharFilter,
};
use crate::analysis::char_filter::translation::{DEFAULT_TRANSLATIONS, TranslationCharFilter};
use crate::analysis::char_filter::unicode_normalize::UnicodeNormalizationCharFilter;
use crate::error::Result;

/// Matches any single character outside the allowed ingredient alphabet.
pub const DISALLOWED_CHARS_PATTERN: &str = r"[^a-záéíóúñ0-9,()\- ]";

/// Text normalizer shared by the training and serving paths.
#[derive(Clone)]
pub struct TextNormalizer {
    char_filters: Vec<Arc<dyn CharFilter>>,
}

impl fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextNormalizer")
            .field(
                "char_filters",
                &self.char_filters.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl TextNormalizer {
    /// Create a normalizer with the default translation dictionary.
    pub fn new() -> Result<Self> {
        Self::with_translations(DEFAULT_TRANSLATIONS.iter().copied())
    }

    /// Create a normalizer with a custom translation dictionary.
    ///
    /// Dictionary terms are matched against already-cleaned text, so they
    /// should be lowercase and use only allowed characters.
    pub fn with_translations<'a, I>(translations: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let char_filters: Vec<Arc<dyn CharFilter>> = vec![
            Arc::new(UnicodeNormalizationCharFilter::new()),
            Arc::new(LowercaseCharFilter::new()),
            Arc::new(PatternReplaceCharFilter::new(DISALLOWED_CHARS_PATTERN, " ")?),
            Arc::new(WhitespaceCollapseCharFilter::new()?),
            Arc::new(TranslationCharFilter::new(translations)?),
        ];

        Ok(Self { char_filters })
    }

    /// Clean the text without translating it.
    pub fn clean(&self, text: &str) -> String {
        self.apply(text, self.char_filters.len() - 1)
    }

    /// Clean and translate the text.
    pub fn normalize(&self, text: &str) -> String {
        self.apply(text, self.char_filters.len())
    }

    /// Normalize anything with a string form.
    pub fn normalize_display<T: fmt::Display + ?Sized>(&self, value: &T) -> String {
        self.normalize(&value.to_string())
    }

    fn apply(&self, text: &str, filters: usize) -> String {
        self.char_filters[..filters]
            .iter()
            .fold(text.to_string(), |acc, filter| filter.filter(&acc))
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new().expect("Default normalizer patterns should be valid")
    }
}
