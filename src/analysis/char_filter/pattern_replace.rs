use regex::Regex;

use super::CharFilter;
use crate::error::{Result, SkinMatchError};

/// A char filter that replaces every match of a regex pattern.
#[derive(Clone, Debug)]
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)
                .map_err(|e| SkinMatchError::analysis(format!("Invalid regex pattern: {e}")))?,
            replacement: replacement.to_string(),
        })
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        // NoExpand: the replacement is literal text, never a capture reference.
        self.pattern
            .replace_all(input, regex::NoExpand(&self.replacement))
            .into_owned()
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }
}

/// Collapses every run of whitespace to a single space and trims both ends.
#[derive(Clone, Debug)]
pub struct WhitespaceCollapseCharFilter {
    inner: PatternReplaceCharFilter,
}

impl WhitespaceCollapseCharFilter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            inner: PatternReplaceCharFilter::new(r"\s+", " ")?,
        })
    }
}

impl CharFilter for WhitespaceCollapseCharFilter {
    fn filter(&self, input: &str) -> String {
        self.inner.filter(input).trim().to_string()
    }

    fn name(&self) -> &'static str {
        "whitespace_collapse"
    }
}
