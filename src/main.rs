//! ai-gcm - CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ai_gcm::generate::{
    DEFAULT_COMMIT_MODEL, DEFAULT_SUMMARY_MODEL, GenerateConfig, TerminalPrompter, run_generate,
};
use ai_gcm::git::GitCli;
use ai_gcm::ollama::OllamaClient;

/// Generate a commit message from staged changes using local Ollama models.
#[derive(Parser, Debug)]
#[command(name = "ai-gcm")]
#[command(about = "Generate a commit message from staged changes using local Ollama models")]
#[command(version)]
struct Cli {
    /// Model to use for code summary generation
    #[arg(short = 's', long, default_value = DEFAULT_SUMMARY_MODEL)]
    summary_model: String,

    /// Model to use for commit message generation
    #[arg(short = 'c', long, default_value = DEFAULT_COMMIT_MODEL)]
    commit_model: String,

    /// Show detailed output including the change summary
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = GenerateConfig {
        summary_model: cli.summary_model,
        commit_model: cli.commit_model,
        verbose: cli.verbose,
    };

    // Every business-logic failure is reported as printed text with a
    // graceful exit 0; the outcome value exists for tests.
    let _outcome = run_generate(&config, &OllamaClient::new(), &GitCli::new(), &TerminalPrompter).await;

    Ok(())
}
