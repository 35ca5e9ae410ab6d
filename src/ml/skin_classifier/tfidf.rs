//! TF-IDF vectorizer over normalized ingredient text.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SkinMatchError};

/// Common English words dropped before building n-grams.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

static ENGLISH_STOP_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| DEFAULT_ENGLISH_STOP_WORDS.iter().copied().collect());

/// Tokens are runs of two or more word characters.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("Token pattern should be valid"));

/// Sparse row: `(feature index, value)` pairs sorted by index.
pub type SparseRow = Vec<(usize, f64)>;

/// TF-IDF vectorizer with n-grams, a vocabulary cap and smooth IDF.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    /// Vocabulary: n-gram -> index mapping.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency for each n-gram.
    idf: Vec<f64>,
    /// Total number of documents seen during training.
    n_documents: usize,
    max_features: usize,
    ngram_range: (usize, usize),
    stop_words: bool,
}

impl TfIdfVectorizer {
    pub fn new(max_features: usize, ngram_range: (usize, usize), stop_words: bool) -> Self {
        Self {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            max_features,
            ngram_range,
            stop_words,
        }
    }

    /// Fit the vectorizer on training documents.
    ///
    /// Keeps the `max_features` most frequent n-grams across the corpus
    /// (ties broken alphabetically), indexed in alphabetical order.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        if documents.is_empty() {
            return Err(SkinMatchError::model("cannot fit TF-IDF on zero documents"));
        }

        let mut term_frequency: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let terms = self.analyze(doc.as_ref());
            let unique: HashSet<&String> = terms.iter().collect();
            for term in unique {
                *document_frequency.entry(term.clone()).or_insert(0) += 1;
            }
            for term in terms {
                *term_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = term_frequency.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_features);

        let mut kept: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        kept.sort();

        self.n_documents = documents.len();
        let n = self.n_documents as f64;
        // IDF = ln((N + 1) / (df + 1)) + 1
        self.idf = kept
            .iter()
            .map(|term| {
                let df = document_frequency.get(term).copied().unwrap_or(0) as f64;
                ((n + 1.0) / (df + 1.0)).ln() + 1.0
            })
            .collect();
        self.vocabulary = kept
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect();

        Ok(())
    }

    /// Transform a document into an L2-normalized sparse TF-IDF row.
    pub fn transform(&self, document: &str) -> SparseRow {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.analyze(document) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut row: SparseRow = counts
            .into_iter()
            .filter_map(|(idx, tf)| self.idf.get(idx).map(|idf| (idx, tf * idf)))
            .collect();
        row.sort_by_key(|(idx, _)| *idx);

        let norm = row.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, value) in &mut row {
                *value /= norm;
            }
        }
        row
    }

    /// Check that every vocabulary index has a finite IDF weight.
    pub fn check_consistency(&self) -> Result<()> {
        if self.idf.len() != self.vocabulary.len() {
            return Err(SkinMatchError::model(format!(
                "vocabulary has {} terms but {} IDF weights",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }
        if let Some((term, idx)) = self.vocabulary.iter().find(|(_, idx)| **idx >= self.idf.len()) {
            return Err(SkinMatchError::model(format!(
                "term '{term}' has index {idx} outside {} IDF weights",
                self.idf.len()
            )));
        }
        if self.idf.iter().any(|w| !w.is_finite()) {
            return Err(SkinMatchError::model("IDF weights must be finite"));
        }
        Ok(())
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Index of an n-gram in the vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Tokenize, drop stop words and build n-grams.
    fn analyze(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = TOKEN_PATTERN
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words || !ENGLISH_STOP_WORDS.contains(t))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n == 0 || n > tokens.len() {
                continue;
            }
            terms.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        terms
    }
}
