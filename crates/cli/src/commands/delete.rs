//! Delete command handler.

use clap::Args;
use docqa_core::AppResult;
use docqa_documents::DocumentService;

/// Delete a document and its stored file
#[derive(Args, Debug)]
pub struct DeleteCommand {
    /// Document id
    pub id: i64,
}

impl DeleteCommand {
    pub async fn execute(&self, service: &DocumentService) -> AppResult<()> {
        tracing::info!("Executing delete command for document {}", self.id);

        service.delete(self.id)?;
        println!("Deleted document {}", self.id);

        Ok(())
    }
}
