//! On-disk storage of uploaded files.

use docqa_core::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};

const UPLOADS_DIR: &str = "uploads";

/// Stores uploads under `<root>/uploads/` with generated names.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` under a fresh UUID name that keeps the original extension.
    ///
    /// Returns the storage reference `uploads/<uuid><ext>`.
    pub fn save(&self, original_name: &str, bytes: &[u8]) -> AppResult<String> {
        let uploads = self.root.join(UPLOADS_DIR);
        fs::create_dir_all(&uploads).map_err(|e| {
            AppError::Processing(format!("Failed to create upload directory: {}", e))
        })?;

        let stored_name = format!("{}{}", uuid::Uuid::new_v4(), extension_of(original_name));
        let path = uploads.join(&stored_name);

        fs::write(&path, bytes).map_err(|e| {
            AppError::Processing(format!("Failed to store file {}: {}", original_name, e))
        })?;

        tracing::debug!("Stored {} ({} bytes) at {:?}", original_name, bytes.len(), path);
        Ok(format!("{}/{}", UPLOADS_DIR, stored_name))
    }

    /// Absolute path of a storage reference.
    pub fn resolve(&self, reference: &str) -> PathBuf {
        self.root.join(reference)
    }

    /// Remove a stored file. A file that is already gone only logs a warning.
    pub fn delete(&self, reference: &str) -> AppResult<()> {
        let path = self.resolve(reference);

        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!("Deleted stored file {:?}", path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Stored file already missing: {:?}", path);
                Ok(())
            }
            Err(e) => Err(AppError::Processing(format!(
                "Failed to delete {:?}: {}",
                path, e
            ))),
        }
    }
}

/// Display name for a file: the name without its last extension.
///
/// Names whose only dot is the leading one are kept whole.
pub fn document_name(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(dot) if dot > 0 => file_name[..dot].to_string(),
        _ => file_name.to_string(),
    }
}

/// MIME type used when serving a stored file.
pub fn content_type(file_name: &str) -> &'static str {
    let lower = file_name.to_lowercase();

    if lower.ends_with(".pdf") {
        "application/pdf"
    } else if lower.ends_with(".docx") {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    } else if lower.ends_with(".doc") {
        "application/msword"
    } else if lower.ends_with(".txt") {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}

/// Dotted extension of the final path component, or "" when there is none.
fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default()
}
