//! Document categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category assigned to a document at upload time.
///
/// `Undefined` is both the "no confident match" answer and the fallback for
/// any classification failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentCategory {
    Policy,
    Report,
    Manual,
    #[default]
    Undefined,
}

impl DocumentCategory {
    /// All categories, in classification precedence order.
    pub const ALL: [DocumentCategory; 4] = [
        DocumentCategory::Policy,
        DocumentCategory::Report,
        DocumentCategory::Manual,
        DocumentCategory::Undefined,
    ];

    /// Get the canonical upper-case token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Policy => "POLICY",
            Self::Report => "REPORT",
            Self::Manual => "MANUAL",
            Self::Undefined => "UNDEFINED",
        }
    }

    /// Parse a free-form model response into a category.
    ///
    /// The response is upper-cased and every non-letter character is removed
    /// before an exact match against the four tokens. Anything else,
    /// including an empty response, yields `Undefined`.
    pub fn from_label(response: &str) -> Self {
        let cleaned: String = response
            .trim()
            .to_uppercase()
            .chars()
            .filter(|c| c.is_ascii_uppercase())
            .collect();

        cleaned.parse().unwrap_or(Self::Undefined)
    }
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive parse of the canonical token.
impl FromStr for DocumentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "POLICY" => Ok(Self::Policy),
            "REPORT" => Ok(Self::Report),
            "MANUAL" => Ok(Self::Manual),
            "UNDEFINED" => Ok(Self::Undefined),
            other => Err(format!("Unknown document category: '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_exact() {
        assert_eq!(DocumentCategory::from_label("POLICY"), DocumentCategory::Policy);
        assert_eq!(DocumentCategory::from_label("REPORT"), DocumentCategory::Report);
        assert_eq!(DocumentCategory::from_label("MANUAL"), DocumentCategory::Manual);
    }

    #[test]
    fn test_from_label_strips_noise() {
        assert_eq!(DocumentCategory::from_label("  report.\n"), DocumentCategory::Report);
        assert_eq!(DocumentCategory::from_label("\"Manual\""), DocumentCategory::Manual);
        assert_eq!(DocumentCategory::from_label("**policy**"), DocumentCategory::Policy);
    }

    #[test]
    fn test_from_label_unrecognized() {
        assert_eq!(DocumentCategory::from_label(""), DocumentCategory::Undefined);
        assert_eq!(
            DocumentCategory::from_label("This is a policy document"),
            DocumentCategory::Undefined
        );
        assert_eq!(DocumentCategory::from_label("INVOICE"), DocumentCategory::Undefined);
    }

    #[test]
    fn test_from_str_is_exact() {
        assert!("policy".parse::<DocumentCategory>().is_err());
        assert_eq!("UNDEFINED".parse::<DocumentCategory>(), Ok(DocumentCategory::Undefined));
    }

    #[test]
    fn test_serde_uses_tokens() {
        let json = serde_json::to_string(&DocumentCategory::Manual).unwrap();
        assert_eq!(json, "\"MANUAL\"");
        let parsed: DocumentCategory = serde_json::from_str("\"REPORT\"").unwrap();
        assert_eq!(parsed, DocumentCategory::Report);
    }
}
