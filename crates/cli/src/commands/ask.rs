//! Ask command handler.
//!
//! Answers one or more questions about a stored document. All questions run
//! in the same process, so paraphrases of an earlier question hit the cache.

use super::print_json;
use clap::Args;
use docqa_core::AppResult;
use docqa_documents::DocumentService;

/// Ask questions about a document
#[derive(Args, Debug)]
pub struct AskCommand {
    /// Document id
    pub id: i64,

    /// Questions to ask, answered in order
    #[arg(required = true, num_args = 1..)]
    pub questions: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    pub async fn execute(&self, service: &DocumentService) -> AppResult<()> {
        tracing::info!(
            "Executing ask command for document {} ({} question(s))",
            self.id,
            self.questions.len()
        );

        let qa = service.qa();
        let mut answers = Vec::with_capacity(self.questions.len());

        for question in &self.questions {
            let answer = qa.answer_question(self.id, question).await?;

            if !self.json {
                if self.questions.len() > 1 {
                    println!("Q: {}", question);
                    println!("A: {}\n", answer);
                } else {
                    println!("{}", answer);
                }
            }

            answers.push(serde_json::json!({
                "question": question,
                "answer": answer,
            }));
        }

        let stats = qa.cache_stats();
        tracing::debug!(
            "Answer cache - hits: {}, misses: {}, entries: {}",
            stats.hits,
            stats.misses,
            stats.entries
        );

        if self.json {
            print_json(&serde_json::json!({
                "documentId": self.id,
                "answers": answers,
            }))?;
        }

        Ok(())
    }
}
