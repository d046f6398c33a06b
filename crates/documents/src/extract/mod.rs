//! Document text extraction.
//!
//! Dispatch is strictly by the lowercased file-name suffix. Unsupported
//! formats and parse failures degrade to empty text; only a dangling file
//! reference or an unreadable file is reported as an error.

mod doc;
mod docx;
mod pdf;

use docqa_core::{AppError, AppResult};
use std::fs;
use std::path::Path;

/// Extraction strategy selected from a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Pdf,
    Doc,
    Docx,
    PlainText,
    Unsupported,
}

impl ContentKind {
    /// Detect the strategy from the file name's extension, ignoring case.
    pub fn from_file_name(file_name: &str) -> Self {
        let lower = file_name.to_lowercase();

        if lower.ends_with(".pdf") {
            Self::Pdf
        } else if lower.ends_with(".doc") {
            Self::Doc
        } else if lower.ends_with(".docx") {
            Self::Docx
        } else if lower.ends_with(".txt") {
            Self::PlainText
        } else {
            Self::Unsupported
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Doc => "doc",
            Self::Docx => "docx",
            Self::PlainText => "text",
            Self::Unsupported => "unsupported",
        }
    }
}

/// Extract text from in-memory file content (the upload path).
///
/// Never fails: unsupported formats and corrupt files yield an empty string.
pub fn extract_bytes(file_name: &str, bytes: &[u8]) -> String {
    let kind = ContentKind::from_file_name(file_name);

    if kind == ContentKind::Unsupported {
        tracing::debug!("No extractor for file type: {}", file_name);
        return String::new();
    }

    parse_or_empty(kind, file_name, bytes)
}

/// Extract text from a stored file.
///
/// # Errors
/// Returns `AppError::Processing` if the file does not exist or cannot be
/// read. Parse failures are not errors; they yield an empty string.
pub fn extract_file(path: &Path, file_name: &str) -> AppResult<String> {
    if !path.exists() {
        return Err(AppError::Processing(format!(
            "Document file not found: {}",
            path.display()
        )));
    }

    let kind = ContentKind::from_file_name(file_name);

    if kind == ContentKind::Unsupported {
        tracing::warn!("Unsupported file type for content extraction: {}", file_name);
        return Ok(String::new());
    }

    let bytes = fs::read(path).map_err(|e| {
        AppError::Processing(format!("Failed to read {}: {}", path.display(), e))
    })?;

    Ok(parse_or_empty(kind, file_name, &bytes))
}

fn parse_or_empty(kind: ContentKind, file_name: &str, bytes: &[u8]) -> String {
    let parsed = match kind {
        ContentKind::Pdf => pdf::extract_text(bytes),
        ContentKind::Doc => doc::extract_text(bytes),
        ContentKind::Docx => docx::extract_text(bytes),
        ContentKind::PlainText => Ok(String::from_utf8_lossy(bytes).into_owned()),
        ContentKind::Unsupported => Ok(String::new()),
    };

    match parsed {
        Ok(text) => {
            tracing::debug!(
                "Extracted {} chars from {} ({})",
                text.len(),
                file_name,
                kind.as_str()
            );
            text
        }
        Err(e) => {
            tracing::warn!(
                "Could not extract text from {} file {}: {}",
                kind.as_str(),
                file_name,
                e
            );
            String::new()
        }
    }
}
