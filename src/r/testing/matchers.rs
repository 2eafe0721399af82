//! Text matching for tree assertions

/// How a node's source text is compared
#[derive(Debug, Clone)]
pub enum TextMatch {
    Exact(String),
    StartsWith(String),
    Contains(String),
}

impl TextMatch {
    pub fn matches(&self, actual: &str) -> bool {
        match self {
            TextMatch::Exact(expected) => actual == expected,
            TextMatch::StartsWith(prefix) => actual.starts_with(prefix),
            TextMatch::Contains(substring) => actual.contains(substring),
        }
    }

    fn describe(&self) -> String {
        match self {
            TextMatch::Exact(expected) => format!("to be {:?}", expected),
            TextMatch::StartsWith(prefix) => format!("to start with {:?}", prefix),
            TextMatch::Contains(substring) => format!("to contain {:?}", substring),
        }
    }

    /// Panics with `context` in the message when `actual` does not match
    pub fn assert(&self, actual: &str, context: &str) {
        assert!(
            self.matches(actual),
            "{}: Expected text {}, but got {:?}",
            context,
            self.describe(),
            actual
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches() {
        assert!(TextMatch::Exact("x <- 1".into()).matches("x <- 1"));
        assert!(!TextMatch::Exact("x".into()).matches("x <- 1"));
        assert!(TextMatch::StartsWith("function".into()).matches("function(x) x"));
        assert!(TextMatch::Contains("%in%".into()).matches("a %in% b"));
    }

    #[test]
    #[should_panic(expected = "statements[0]: Expected text to start with \"if\", but got \"for (i in x) i\"")]
    fn test_assert_reports_context() {
        TextMatch::StartsWith("if".into()).assert("for (i in x) i", "statements[0]");
    }
}
