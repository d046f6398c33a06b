//! Classify command handler.
//!
//! Classifies a local file with the active provider without storing it.

use super::{print_json, read_input};
use clap::Args;
use docqa_core::AppResult;
use docqa_documents::DocumentService;
use std::path::PathBuf;

/// Classify a file without uploading it
#[derive(Args, Debug)]
pub struct ClassifyCommand {
    /// File to classify
    pub path: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ClassifyCommand {
    pub async fn execute(&self, service: &DocumentService) -> AppResult<()> {
        tracing::info!("Executing classify command for {:?}", self.path);

        let (file_name, bytes) = read_input(&self.path)?;
        let category = service.identify_document_type(&file_name, &bytes).await;

        if self.json {
            print_json(&serde_json::json!({
                "fileName": file_name,
                "category": category,
            }))
        } else {
            println!("{}", category);
            Ok(())
        }
    }
}
