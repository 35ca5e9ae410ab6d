//! Curated dermatological keyword lists.
//!
//! Each list is a fixed set of substrings counted against normalized text.
//! Lists may overlap; a text can hit several of them at once.

use serde::{Deserialize, Serialize};

/// Irritating actives and solvents.
pub const DEFAULT_IRRITANTS: &[&str] = &[
    "salicylic",
    "glycolic",
    "benzoyl",
    "alcohol",
    "menthol",
    "eucalyptus",
    "retinol",
];

/// Emollients and humectants.
pub const DEFAULT_EMOLLIENTS: &[&str] = &[
    "glycerin",
    "squalane",
    "petrolatum",
    "caprylic",
    "cetyl",
    "stearyl",
    "shea",
    "lanolin",
];

/// Plant oils. `" oil "` keeps its surrounding spaces and only matches a
/// standalone word between other words.
pub const DEFAULT_OILS: &[&str] = &[" oil ", "olea europaea", "jojoba", "coconut", "ricinus"];

/// Soothing and barrier-repair agents.
pub const DEFAULT_SOOTHING: &[&str] = &[
    "aloe",
    "panthenol",
    "bisabolol",
    "centella",
    "niacinamide",
    "hyaluronic",
];

/// An immutable list of keyword substrings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordList {
    keywords: Vec<String>,
}

impl KeywordList {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(Into::into)
                .filter(|k: &String| !k.is_empty())
                .collect(),
        }
    }

    /// Total number of keyword occurrences in `text`.
    ///
    /// Each keyword is scanned independently with non-overlapping matches,
    /// so a stretch of text may count once for several keywords.
    pub fn count_in(&self, text: &str) -> usize {
        self.keywords
            .iter()
            .map(|keyword| text.matches(keyword.as_str()).count())
            .sum()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

/// The four keyword lists used for feature extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordLists {
    pub irritants: KeywordList,
    pub emollients: KeywordList,
    pub oils: KeywordList,
    pub soothing: KeywordList,
}

impl Default for KeywordLists {
    fn default() -> Self {
        Self {
            irritants: KeywordList::new(DEFAULT_IRRITANTS.iter().copied()),
            emollients: KeywordList::new(DEFAULT_EMOLLIENTS.iter().copied()),
            oils: KeywordList::new(DEFAULT_OILS.iter().copied()),
            soothing: KeywordList::new(DEFAULT_SOOTHING.iter().copied()),
        }
    }
}
