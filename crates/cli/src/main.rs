//! DocQA CLI
//!
//! Main entry point for the docqa command-line tool.
//! Uploads documents, classifies them and answers questions about them.

mod commands;

use clap::{Parser, Subcommand};
use commands::{
    AskCommand, ClassifyCommand, DeleteCommand, ListCommand, ShowCommand, UploadCommand,
};
use docqa_core::{config::AppConfig, logging, AppResult};
use docqa_documents::DocumentService;
use std::path::PathBuf;

/// DocQA CLI - document classification and question answering
#[derive(Parser, Debug)]
#[command(name = "docqa")]
#[command(about = "Document classification and question answering", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "DOCQA_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "DOCQA_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// LLM provider (mock, openai)
    #[arg(short, long, global = true, env = "DOCQA_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "DOCQA_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upload and classify a document
    Upload(UploadCommand),

    /// List uploaded documents
    List(ListCommand),

    /// Show one document
    Show(ShowCommand),

    /// Delete a document (clears all cached answers)
    Delete(DeleteCommand),

    /// Classify a file without uploading it
    Classify(ClassifyCommand),

    /// Ask questions about a document
    Ask(AskCommand),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Upload(_) => "upload",
            Commands::List(_) => "list",
            Commands::Show(_) => "show",
            Commands::Delete(_) => "delete",
            Commands::Classify(_) => "classify",
            Commands::Ask(_) => "ask",
        }
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load defaults, YAML and environment; CLI paths decide which YAML is read
    let config = AppConfig::load_from(cli.workspace.clone(), cli.config.clone())?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.workspace,
        cli.config,
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color, config.log_json)?;

    tracing::info!("DocQA CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    config.validate()?;

    let service = DocumentService::from_config(&config)?;

    let _span = tracing::info_span!("command", name = cli.command.name()).entered();

    // Route to command handlers
    let result = match &cli.command {
        Commands::Upload(cmd) => cmd.execute(&service).await,
        Commands::List(cmd) => cmd.execute(&service).await,
        Commands::Show(cmd) => cmd.execute(&service).await,
        Commands::Delete(cmd) => cmd.execute(&service).await,
        Commands::Classify(cmd) => cmd.execute(&service).await,
        Commands::Ask(cmd) => cmd.execute(&service).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
