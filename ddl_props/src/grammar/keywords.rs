//! Fixed keywords the property grammars themselves rely on
//!
//! Clause labels are free-form and supplied per descriptor; only the words the
//! catalogue hard-codes (tag blocks, alert conditions, column comments, the
//! `AS` terminator of expressions) are enumerated here.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    With,
    Tag,
    If,
    Exists,
    As,
    Comment,
}

impl Keyword {
    /// Canonical uppercase spelling
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::With => "WITH",
            Self::Tag => "TAG",
            Self::If => "IF",
            Self::Exists => "EXISTS",
            Self::As => "AS",
            Self::Comment => "COMMENT",
        }
    }

    /// Case-insensitive lookup
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_uppercase().as_str() {
            "WITH" => Some(Self::With),
            "TAG" => Some(Self::Tag),
            "IF" => Some(Self::If),
            "EXISTS" => Some(Self::Exists),
            "AS" => Some(Self::As),
            "COMMENT" => Some(Self::Comment),
            _ => None,
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a clause label into its keyword sequence
///
/// Multi-word labels (`"ROW ACCESS POLICY"`) match word by word, in order.
pub fn label_words(label: &str) -> Vec<String> {
    label
        .split_whitespace()
        .map(|word| word.to_ascii_uppercase())
        .collect()
}

/// Canonical rendered form of a label: uppercase, single-spaced
pub fn canonical_label(label: &str) -> String {
    label_words(label).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for keyword in [
            Keyword::With,
            Keyword::Tag,
            Keyword::If,
            Keyword::Exists,
            Keyword::As,
            Keyword::Comment,
        ] {
            assert_eq!(Keyword::from_word(keyword.as_str()), Some(keyword));
            assert_eq!(
                Keyword::from_word(&keyword.as_str().to_lowercase()),
                Some(keyword)
            );
        }
        assert_eq!(Keyword::from_word("TAGS"), None);
    }

    #[test]
    fn test_label_words() {
        assert_eq!(
            label_words("row  access policy"),
            vec!["ROW", "ACCESS", "POLICY"]
        );
        assert_eq!(canonical_label("data_retention_time_in_days"), "DATA_RETENTION_TIME_IN_DAYS");
        assert!(label_words("").is_empty());
    }
}
