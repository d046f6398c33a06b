//! Prompt builder for rendering templates and injecting document context.

use crate::templates::{
    ANSWER_PROMPT_ID, ANSWER_TEMPLATE, CLASSIFICATION_PROMPT_ID, CLASSIFICATION_TEMPLATE,
    MANUAL_INSTRUCTIONS, POLICY_INSTRUCTIONS, REPORT_INSTRUCTIONS,
};
use crate::types::BuiltPrompt;
use docqa_core::{AppError, AppResult, DocumentCategory};
use handlebars::Handlebars;
use std::collections::HashMap;

/// Maximum number of content characters sent for classification.
pub const MAX_PREVIEW_CHARS: usize = 3000;

const TRUNCATION_MARKER: &str = "\n[... content truncated ...]";

/// Build the document classification prompt.
///
/// The content is cut to [`MAX_PREVIEW_CHARS`] characters. Empty content is
/// reported to the model as "Content: Not available".
///
/// # Example
/// ```
/// use docqa_prompt::build_classification_prompt;
///
/// let built = build_classification_prompt("refund_policy.pdf", "Refunds are issued...").unwrap();
/// assert!(built.user.contains("File Name: refund_policy.pdf"));
/// ```
pub fn build_classification_prompt(file_name: &str, content: &str) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", CLASSIFICATION_PROMPT_ID);

    let (preview, truncated) = truncate_preview(content);

    let document_section = if preview.is_empty() {
        "Content: Not available\n".to_string()
    } else {
        format!("\nDocument Content Preview:\n---\n{}\n---\n", preview)
    };

    let mut variables = HashMap::new();
    variables.insert("fileName".to_string(), file_name.to_string());
    variables.insert("documentSection".to_string(), document_section);

    let rendered = render_template(CLASSIFICATION_TEMPLATE, &variables)?;

    Ok(BuiltPrompt::new(
        None,
        rendered,
        CLASSIFICATION_PROMPT_ID,
        None,
        truncated,
    ))
}

/// Build the question-answering prompt.
///
/// The document context is embedded in full. POLICY, REPORT and MANUAL
/// documents get an extra instruction block; UNDEFINED gets none.
pub fn build_answer_prompt(
    question: &str,
    document_context: &str,
    category: DocumentCategory,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {} ({})", ANSWER_PROMPT_ID, category);

    let mut variables = HashMap::new();
    variables.insert("documentContext".to_string(), document_context.to_string());
    variables.insert("question".to_string(), question.to_string());
    variables.insert(
        "categoryInstructions".to_string(),
        category_instructions(category).to_string(),
    );

    let rendered = render_template(ANSWER_TEMPLATE, &variables)?;

    Ok(BuiltPrompt::new(
        None,
        rendered,
        ANSWER_PROMPT_ID,
        Some(category),
        false,
    ))
}

/// Cut `content` to [`MAX_PREVIEW_CHARS`] characters, appending a marker
/// when anything was dropped. Returns the preview and whether it was cut.
pub fn truncate_preview(content: &str) -> (String, bool) {
    match content.char_indices().nth(MAX_PREVIEW_CHARS) {
        Some((byte_idx, _)) => {
            let mut preview = String::with_capacity(byte_idx + TRUNCATION_MARKER.len());
            preview.push_str(&content[..byte_idx]);
            preview.push_str(TRUNCATION_MARKER);
            (preview, true)
        }
        None => (content.to_string(), false),
    }
}

fn category_instructions(category: DocumentCategory) -> &'static str {
    match category {
        DocumentCategory::Policy => POLICY_INSTRUCTIONS,
        DocumentCategory::Report => REPORT_INSTRUCTIONS,
        DocumentCategory::Manual => MANUAL_INSTRUCTIONS,
        DocumentCategory::Undefined => "",
    }
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Disable HTML escaping for plain text
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    let rendered = handlebars
        .render("prompt", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))?;

    Ok(rendered)
}
