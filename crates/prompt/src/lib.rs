//! Prompt system for DocQA.
//!
//! This crate builds the two prompts the system sends to a language model:
//! - document classification (file name + truncated content preview)
//! - question answering (full document context + category-specific guidance)
//!
//! Templates are rendered with Handlebars; the wording lives in [`templates`].

pub mod builder;
pub mod templates;
pub mod types;

// Re-export main types
pub use builder::{
    build_answer_prompt, build_classification_prompt, truncate_preview, MAX_PREVIEW_CHARS,
};
pub use types::{BuiltPrompt, BuiltPromptMetadata};
