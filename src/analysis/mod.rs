//! Text analysis module for SkinMatch.
//!
//! This module turns raw ingredient lists into normalized text: a chain of
//! char filters (Unicode composition, lowercasing, character cleaning,
//! whitespace collapse and Spanish to English term translation) wrapped by
//! [`TextNormalizer`].

pub mod char_filter;
pub mod normalizer;

// Re-export commonly used types
pub use char_filter::CharFilter;
pub use normalizer::TextNormalizer;
