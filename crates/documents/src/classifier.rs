//! Keyword-based document classification.

use docqa_core::DocumentCategory;

pub const POLICY_KEYWORDS: &[&str] = &[
    "policy",
    "procedure",
    "guideline",
    "rule",
    "regulation",
    "standard",
    "protocol",
    "directive",
    "compliance",
    "governance",
    "framework",
    "code of conduct",
    "terms of service",
    "terms and conditions",
];

pub const REPORT_KEYWORDS: &[&str] = &[
    "report",
    "analysis",
    "summary",
    "data",
    "statistic",
    "overview",
    "findings",
    "results",
    "evaluation",
    "assessment",
    "review",
    "audit",
    "metrics",
    "kpi",
    "dashboard",
    "quarterly",
    "annual",
    "monthly",
];

pub const MANUAL_KEYWORDS: &[&str] = &[
    "manual",
    "guide",
    "instruction",
    "how to",
    "how-to",
    "tutorial",
    "walkthrough",
    "step by step",
    "step-by-step",
    "getting started",
    "quick start",
    "handbook",
    "reference",
    "documentation",
    "docs",
];

/// Keyword tables in precedence order.
const KEYWORD_TABLES: [(DocumentCategory, &[&str]); 3] = [
    (DocumentCategory::Policy, POLICY_KEYWORDS),
    (DocumentCategory::Report, REPORT_KEYWORDS),
    (DocumentCategory::Manual, MANUAL_KEYWORDS),
];

/// Classify a document from its file name and extracted content.
///
/// The file name is checked before the content. Within each field the
/// categories are tried in the order POLICY, REPORT, MANUAL, and the first
/// table with any keyword occurring as a substring wins.
pub fn classify_by_keywords(file_name: &str, content: &str) -> DocumentCategory {
    if let Some(category) = match_keywords(file_name) {
        tracing::debug!("Classified '{}' as {} from its name", file_name, category);
        return category;
    }

    if let Some(category) = match_keywords(content) {
        tracing::debug!("Classified '{}' as {} from its content", file_name, category);
        return category;
    }

    DocumentCategory::Undefined
}

fn match_keywords(text: &str) -> Option<DocumentCategory> {
    if text.trim().is_empty() {
        return None;
    }

    let lower = text.to_lowercase();

    KEYWORD_TABLES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|(category, _)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_match() {
        assert_eq!(
            classify_by_keywords("Refund_Policy.pdf", ""),
            DocumentCategory::Policy
        );
        assert_eq!(
            classify_by_keywords("Q3 Sales REPORT.docx", ""),
            DocumentCategory::Report
        );
        assert_eq!(
            classify_by_keywords("user-manual.txt", ""),
            DocumentCategory::Manual
        );
    }

    #[test]
    fn test_content_match() {
        assert_eq!(
            classify_by_keywords("notes.txt", "Follow these steps to get STARTED: a quick start."),
            DocumentCategory::Manual
        );
    }

    #[test]
    fn test_policy_wins_over_report() {
        assert_eq!(
            classify_by_keywords("x.txt", "This report describes the new travel policy."),
            DocumentCategory::Policy
        );
    }

    #[test]
    fn test_file_name_checked_before_content() {
        // Name says REPORT, content says POLICY; the name decides
        assert_eq!(
            classify_by_keywords("annual.pdf", "company policy"),
            DocumentCategory::Report
        );
    }

    #[test]
    fn test_no_match_is_undefined() {
        assert_eq!(
            classify_by_keywords("notes.txt", "Lunch on Friday at noon."),
            DocumentCategory::Undefined
        );
        assert_eq!(classify_by_keywords("", ""), DocumentCategory::Undefined);
    }

    #[test]
    fn test_multi_word_keyword() {
        assert_eq!(
            classify_by_keywords("x.txt", "Please read our Terms and Conditions"),
            DocumentCategory::Policy
        );
    }
}
