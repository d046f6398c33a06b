//! Prompt types for DocQA.

use docqa_core::DocumentCategory;
use serde::{Deserialize, Serialize};

/// A fully built prompt ready for LLM execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// System message (optional)
    pub system: Option<String>,

    /// User message (required)
    pub user: String,

    /// Metadata about the built prompt
    pub metadata: BuiltPromptMetadata,
}

/// Metadata about a built prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPromptMetadata {
    /// Source prompt ID
    #[serde(rename = "sourcePromptId")]
    pub source_prompt_id: String,

    /// Document category the prompt was specialised for (QA prompts only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<DocumentCategory>,

    /// Whether the document content was cut to the preview limit
    #[serde(rename = "contentTruncated")]
    pub content_truncated: bool,
}

impl BuiltPrompt {
    /// Create a new built prompt.
    pub fn new(
        system: Option<String>,
        user: String,
        source_prompt_id: impl Into<String>,
        category: Option<DocumentCategory>,
        content_truncated: bool,
    ) -> Self {
        Self {
            system,
            user,
            metadata: BuiltPromptMetadata {
                source_prompt_id: source_prompt_id.into(),
                category,
                content_truncated,
            },
        }
    }
}
