//! Command handlers for the DocQA CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod ask;
pub mod classify;
pub mod delete;
pub mod list;
pub mod upload;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use classify::ClassifyCommand;
pub use delete::DeleteCommand;
pub use list::{ListCommand, ShowCommand};
pub use upload::UploadCommand;

use docqa_core::{AppError, AppResult};
use std::path::Path;

/// Read a local file, returning its file name and content.
pub(crate) fn read_input(path: &Path) -> AppResult<(String, Vec<u8>)> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| AppError::Processing(format!("Invalid file path: {:?}", path)))?
        .to_string();

    let bytes = std::fs::read(path)
        .map_err(|e| AppError::Processing(format!("Failed to read {:?}: {}", path, e)))?;

    Ok((file_name, bytes))
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json(value: &serde_json::Value) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
