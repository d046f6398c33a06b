//! List and show command handlers.

use super::print_json;
use clap::Args;
use docqa_core::AppResult;
use docqa_documents::{Document, DocumentService};

/// List uploaded documents
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListCommand {
    pub async fn execute(&self, service: &DocumentService) -> AppResult<()> {
        tracing::info!("Executing list command");

        let documents = service.list()?;

        if self.json {
            return print_json(&serde_json::to_value(&documents)?);
        }

        if documents.is_empty() {
            println!("No documents uploaded");
            return Ok(());
        }

        for document in &documents {
            println!(
                "{:>5}  {:<10} {}",
                document.id,
                document.category.as_str(),
                document.file_name
            );
        }

        Ok(())
    }
}

/// Show one document
#[derive(Args, Debug)]
pub struct ShowCommand {
    /// Document id
    pub id: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ShowCommand {
    pub async fn execute(&self, service: &DocumentService) -> AppResult<()> {
        tracing::info!("Executing show command for document {}", self.id);

        let document = service.get(self.id)?;

        if self.json {
            print_json(&serde_json::to_value(&document)?)
        } else {
            print_document(&document);
            Ok(())
        }
    }
}

fn print_document(document: &Document) {
    println!("Id:          {}", document.id);
    println!("Name:        {}", document.name);
    println!("Category:    {}", document.category);
    println!("File:        {}", document.file_name);
    println!("Stored as:   {}", document.file_path);
    println!("Uploaded by: {}", document.uploaded_by);
    println!("Uploaded at: {}", document.uploaded_at.to_rfc3339());
}
