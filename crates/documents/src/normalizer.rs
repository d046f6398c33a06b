//! Question normalization for answer-cache keys.
//!
//! Normalization is lossy on purpose: paraphrases that differ only in case,
//! punctuation or stop words map to the same key. The key format is shared
//! by every cache holding answers, so the word list and punctuation set must
//! stay fixed.

use std::collections::HashSet;
use std::sync::OnceLock;

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is",
    "it", "its", "of", "on", "that", "the", "to", "was", "will", "with", "what", "which", "who",
    "whom", "this", "these", "those", "tell", "me", "about", "can", "you", "please", "how", "do",
    "does", "did", "would", "could", "should",
];

const PUNCTUATION: &[char] = &[
    '?', '!', '.', ',', ';', ':', '(', ')', '[', ']', '{', '}', '\'', '"', '`',
];

fn stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

/// Canonicalize a question for cache lookups.
///
/// Returns an empty string only for an empty or blank question. When every
/// word is a stop word, the punctuation-stripped form is returned instead.
pub fn normalize(question: &str) -> String {
    let lowered = question.to_lowercase();
    let stripped: String = lowered
        .trim()
        .chars()
        .filter(|c| !PUNCTUATION.contains(c))
        .collect();

    let words: Vec<&str> = stripped.split_whitespace().collect();
    if words.is_empty() {
        return String::new();
    }

    let collapsed = words.join(" ");

    let kept: Vec<&str> = words
        .into_iter()
        .filter(|word| !stop_words().contains(word))
        .collect();

    if kept.is_empty() {
        collapsed
    } else {
        kept.join(" ")
    }
}

/// Build the cache key for a question about a document.
pub fn cache_key(document_id: i64, question: &str) -> String {
    format!("qa:doc:{}:q:{}", document_id, normalize(question))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paraphrases_share_a_key() {
        assert_eq!(normalize("What is the Refund Policy?"), "refund policy");
        assert_eq!(normalize("refund policy"), "refund policy");
        assert_eq!(normalize("Tell me about the refund policy"), "refund policy");
        assert_eq!(
            cache_key(1, "What is the refund policy?"),
            cache_key(1, "Can you please tell me about the REFUND   policy!!")
        );
    }

    #[test]
    fn test_key_format() {
        assert_eq!(cache_key(42, "Refund window?"), "qa:doc:42:q:refund window");
        assert_ne!(cache_key(1, "refund"), cache_key(2, "refund"));
    }

    #[test]
    fn test_idempotent() {
        let questions = [
            "What is the refund policy?",
            "  How   do I (re)install it?  ",
            "what is this",
            "",
            "   ",
            "Q3 revenue: up or down?",
            "Don't `panic`",
        ];

        for q in questions {
            let once = normalize(q);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", q);
        }
    }

    #[test]
    fn test_blank_question() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t\n "), "");
        assert_eq!(cache_key(7, ""), "qa:doc:7:q:");
    }

    #[test]
    fn test_only_stop_words_falls_back() {
        assert_eq!(normalize("What is this?"), "what is this");
        assert_eq!(normalize("??? !!"), "");
    }

    #[test]
    fn test_punctuation_removed_not_split() {
        assert_eq!(normalize("Don't stop"), "dont stop");
        assert_eq!(normalize("(section 4.2)"), "section 42");
    }

    #[test]
    fn test_non_listed_symbols_kept() {
        assert_eq!(normalize("cost in $ / unit"), "cost $ / unit");
    }
}
