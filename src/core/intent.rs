//! # Intent Classification
//!
//! Decides which endpoint a message goes to. The controller only sees the
//! [`IntentClassifier`] trait, so the keyword heuristic can be swapped for a
//! real classifier without touching the reducer.

/// Where a user message should be routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Product search (`POST /search`), carries attachments.
    Search,
    /// Ad copy generation (`POST /marketing`), text only.
    Marketing,
}

pub trait IntentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Intent;
}

pub const DEFAULT_MARKETING_KEYWORDS: [&str; 3] = ["marketing", "ad copy", "campaign"];

/// Case-insensitive substring match against a keyword list.
pub struct KeywordClassifier {
    keywords: Vec<String>,
}

impl KeywordClassifier {
    pub fn new(keywords: Vec<String>) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_MARKETING_KEYWORDS.iter().map(|k| k.to_string()).collect())
    }
}

impl IntentClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> Intent {
        let lowered = text.to_lowercase();
        if self.keywords.iter().any(|k| !k.is_empty() && lowered.contains(k.as_str())) {
            Intent::Marketing
        } else {
            Intent::Search
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marketing_keywords_route_to_marketing() {
        let classifier = KeywordClassifier::default();
        assert_eq!(classifier.classify("Write marketing text for my shop"), Intent::Marketing);
        assert_eq!(classifier.classify("I need AD COPY for sneakers"), Intent::Marketing);
        assert_eq!(classifier.classify("plan a Campaign"), Intent::Marketing);
    }

    #[test]
    fn everything_else_is_search() {
        let classifier = KeywordClassifier::default();
        assert_eq!(classifier.classify("cheap blue mugs under $20"), Intent::Search);
        assert_eq!(classifier.classify(""), Intent::Search);
        // "ad" alone is not "ad copy"
        assert_eq!(classifier.classify("ad space for rent"), Intent::Search);
    }

    #[test]
    fn custom_keywords_are_lowercased() {
        let classifier = KeywordClassifier::new(vec!["Slogan".into()]);
        assert_eq!(classifier.classify("give me a slogan"), Intent::Marketing);
        assert_eq!(classifier.classify("marketing"), Intent::Search);
    }

    #[test]
    fn empty_keyword_never_matches() {
        let classifier = KeywordClassifier::new(vec![String::new()]);
        assert_eq!(classifier.classify("anything"), Intent::Search);
    }
}
