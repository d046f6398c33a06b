//! PDF text extraction via lopdf.

use docqa_core::{AppError, AppResult};
use lopdf::Document;

/// Extract the text of every page, in page order.
///
/// Pages whose content streams cannot be decoded are skipped. The document
/// fails only when it cannot be loaded or no page yields text.
pub fn extract_text(bytes: &[u8]) -> AppResult<String> {
    let document = Document::load_mem(bytes)
        .map_err(|e| AppError::Extraction(format!("Failed to parse PDF: {}", e)))?;

    let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
    if page_numbers.is_empty() {
        return Ok(String::new());
    }

    let mut text = String::new();
    let mut failed_pages = 0usize;

    for page in &page_numbers {
        match document.extract_text(&[*page]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => {
                tracing::debug!("Skipping unreadable PDF page {}: {}", page, e);
                failed_pages += 1;
            }
        }
    }

    if failed_pages == page_numbers.len() {
        return Err(AppError::Extraction(format!(
            "No readable text in {} PDF page(s)",
            failed_pages
        )));
    }

    Ok(text)
}
