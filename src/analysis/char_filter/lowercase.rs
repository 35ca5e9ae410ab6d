use super::CharFilter;

/// A char filter that lowercases the whole text.
///
/// Uses Unicode-aware lowercasing, so accented capitals such as `Á` and `Ñ`
/// fold to `á` and `ñ`.
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        if input.is_ascii() {
            input.to_ascii_lowercase()
        } else {
            input.to_lowercase()
        }
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_lowercase() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(filter.filter("Hyaluronic ACID"), "hyaluronic acid");
    }

    #[test]
    fn test_unicode_lowercase() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(filter.filter("ÁCIDO HIALURÓNICO, AÑIL"), "ácido hialurónico, añil");
    }
}
