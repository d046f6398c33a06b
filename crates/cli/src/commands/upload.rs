//! Upload command handler.

use super::{print_json, read_input};
use clap::Args;
use docqa_core::AppResult;
use docqa_documents::DocumentService;
use std::path::PathBuf;

/// Upload and classify a document
#[derive(Args, Debug)]
pub struct UploadCommand {
    /// File to upload (.pdf, .doc, .docx, .txt)
    pub path: PathBuf,

    /// Name recorded as the uploader
    #[arg(long, default_value = "cli", env = "USER")]
    pub uploaded_by: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl UploadCommand {
    pub async fn execute(&self, service: &DocumentService) -> AppResult<()> {
        tracing::info!("Executing upload command for {:?}", self.path);

        let (file_name, bytes) = read_input(&self.path)?;
        let document = service.upload(&file_name, &bytes, &self.uploaded_by).await?;

        if self.json {
            print_json(&serde_json::to_value(&document)?)?;
        } else {
            println!(
                "Uploaded document {}: {} [{}]",
                document.id, document.name, document.category
            );
        }

        Ok(())
    }
}
