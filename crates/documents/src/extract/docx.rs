//! Office Open XML (.docx) text extraction via docx-rs.

use docqa_core::{AppError, AppResult};
use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

/// Extract body paragraphs as newline-separated text.
pub fn extract_text(bytes: &[u8]) -> AppResult<String> {
    let docx = read_docx(bytes)
        .map_err(|e| AppError::Extraction(format!("Failed to parse DOCX: {}", e)))?;

    let mut text = String::new();

    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            for p_child in &paragraph.children {
                if let ParagraphChild::Run(run) = p_child {
                    for r_child in &run.children {
                        match r_child {
                            RunChild::Text(t) => text.push_str(&t.text),
                            RunChild::Tab(_) => text.push('\t'),
                            RunChild::Break(_) => text.push('\n'),
                            _ => {}
                        }
                    }
                }
            }
            text.push('\n');
        }
    }

    Ok(text)
}
