use unicode_normalization::UnicodeNormalization;

use super::CharFilter;

/// A char filter that composes text to Unicode NFC.
///
/// Ingredient lists pasted from web pages or PDFs often carry decomposed
/// accents (`e` + U+0301); composing them first keeps `é` inside the allowed
/// character set instead of losing the accent to the character filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeNormalizationCharFilter;

impl UnicodeNormalizationCharFilter {
    pub fn new() -> Self {
        Self
    }
}

impl CharFilter for UnicodeNormalizationCharFilter {
    fn filter(&self, input: &str) -> String {
        input.nfc().collect()
    }

    fn name(&self) -> &'static str {
        "unicode_normalization"
    }
}
