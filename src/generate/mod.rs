//! Generation pipeline: availability checks, staging gate, two model calls,
//! and an optional commit behind a confirmation prompt.
//!
//! The flow is strictly linear. Every step is a potential terminal state,
//! reported as a [`RunOutcome`]; business failures are printed text and a
//! graceful return, never a process error.

use async_trait::async_trait;
use dialoguer::Confirm;

use crate::error::{GenerationError, GitError};
use crate::git::{GitChanges, GitCli};

/// Default model for diff summarization.
pub const DEFAULT_SUMMARY_MODEL: &str = "qwen2.5-coder";

/// Default model for commit message drafting.
pub const DEFAULT_COMMIT_MODEL: &str = "llama3.2";

/// Separator rule printed around status, summary, and message blocks.
const SEPARATOR: &str = "----------------------------------------";

/// Configuration for one generation run, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub summary_model: String,
    pub commit_model: String,
    pub verbose: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            summary_model: DEFAULT_SUMMARY_MODEL.to_string(),
            commit_model: DEFAULT_COMMIT_MODEL.to_string(),
            verbose: false,
        }
    }
}

/// Model-serving capability the pipeline depends on.
#[async_trait]
pub trait ModelBackend {
    /// Whether a model is installed, plus the known-model list for reporting.
    async fn is_model_available(&self, model: &str) -> (bool, Vec<String>);

    /// Summarize a staged diff as free-form text.
    async fn summarize(&self, diff: &str, model: &str) -> Result<String, GenerationError>;

    /// Draft a schema-validated conventional-commit message from a summary.
    async fn draft_commit_message(
        &self,
        summary: &str,
        model: &str,
    ) -> Result<String, GenerationError>;
}

/// Version-control capability the pipeline depends on.
pub trait Vcs {
    fn read_changes(&self) -> Result<GitChanges, GitError>;
    fn status_short(&self) -> String;
    fn stage_all(&self) -> Result<(), GitError>;
    fn commit(&self, message: &str) -> Result<String, GitError>;
}

impl Vcs for GitCli {
    fn read_changes(&self) -> Result<GitChanges, GitError> {
        GitCli::read_changes(self)
    }

    fn status_short(&self) -> String {
        GitCli::status_short(self)
    }

    fn stage_all(&self) -> Result<(), GitError> {
        GitCli::stage_all(self)
    }

    fn commit(&self, message: &str) -> Result<String, GitError> {
        GitCli::commit(self, message)
    }
}

/// Injected confirmation capability, so the pipeline is testable without a
/// real terminal.
pub trait Prompter {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Interactive prompter over dialoguer. Blocks indefinitely on input; a
/// terminal-level error counts as a decline.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&self, prompt: &str) -> bool {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// Terminal state of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// A configured model is not installed.
    ModelUnavailable,
    /// A git invocation failed (diff read or staging).
    GitError,
    /// Nothing staged and nothing unstaged.
    NoChanges,
    /// Unstaged changes exist but nothing was staged.
    NoStagedChanges,
    /// The summarization call failed.
    SummaryFailed,
    /// The drafting call failed (daemon, JSON, or validation).
    DraftFailed,
    /// Commit created.
    Committed,
    /// User confirmed but the commit invocation failed.
    CommitError,
    /// User declined the drafted message.
    Cancelled,
}

/// Run the generation pipeline.
pub async fn run_generate<M, V, P>(
    config: &GenerateConfig,
    models: &M,
    vcs: &V,
    prompter: &P,
) -> RunOutcome
where
    M: ModelBackend,
    V: Vcs,
    P: Prompter,
{
    // ── Stage 1: Model availability ──
    for model in [&config.summary_model, &config.commit_model] {
        let (available, known) = models.is_model_available(model).await;
        if !available {
            println!("Model '{model}' is not available. Please run: ollama pull {model}");
            if !known.is_empty() {
                println!();
                println!("Available models:");
                for (i, name) in known.iter().enumerate() {
                    println!("  {}. {}", i + 1, name);
                }
            }
            return RunOutcome::ModelUnavailable;
        }
    }

    // ── Stage 2: Load changes ──
    let mut changes = match vcs.read_changes() {
        Ok(c) => c,
        Err(e) => {
            println!("Error: {e}");
            return RunOutcome::GitError;
        }
    };

    // ── Stage 3: Ensure staged input (staging retry happens at most once) ──
    let mut staged_once = false;
    while changes.staged.is_empty() {
        if changes.unstaged.is_empty() {
            println!("No changes found to commit.");
            return RunOutcome::NoChanges;
        }

        if staged_once {
            println!("No staged changes found. Use 'git add' to stage your changes.");
            return RunOutcome::NoStagedChanges;
        }

        println!();
        println!("Unstaged changes found:");
        println!("{SEPARATOR}");
        print!("{}", vcs.status_short());
        println!("{SEPARATOR}");
        println!();

        if !prompter.confirm("Would you like to stage these changes?") {
            println!("No staged changes found. Use 'git add' to stage your changes.");
            return RunOutcome::NoStagedChanges;
        }

        if let Err(e) = vcs.stage_all() {
            println!("Error staging changes: {e}");
            return RunOutcome::GitError;
        }

        changes = match vcs.read_changes() {
            Ok(c) => c,
            Err(e) => {
                println!("Error: {e}");
                return RunOutcome::GitError;
            }
        };
        staged_once = true;
    }

    // ── Stage 4: Summarize ──
    println!();
    println!("Analyzing changes using {}...", config.summary_model);

    let summary = match models.summarize(&changes.staged, &config.summary_model).await {
        Ok(s) => s,
        Err(e) => {
            println!("{e}");
            return RunOutcome::SummaryFailed;
        }
    };

    if config.verbose {
        println!();
        println!("Code Changes Summary:");
        println!("{SEPARATOR}");
        println!("{summary}");
        println!("{SEPARATOR}");
    }

    // ── Stage 5: Draft ──
    println!();
    println!("Generating commit message using {}...", config.commit_model);

    let message = match models
        .draft_commit_message(&summary, &config.commit_model)
        .await
    {
        Ok(m) => m,
        Err(e) => {
            println!("{e}");
            return RunOutcome::DraftFailed;
        }
    };

    println!();
    println!("Suggested Commit Message:");
    println!("{SEPARATOR}");
    println!("{message}");
    println!("{SEPARATOR}");
    println!();

    // ── Stage 6: Confirm and commit ──
    if !prompter.confirm("Would you like to use this commit message?") {
        println!("Commit cancelled.");
        return RunOutcome::Cancelled;
    }

    match vcs.commit(&message) {
        Ok(detail) => {
            println!("{detail}");
            RunOutcome::Committed
        }
        Err(e) => {
            println!("{e}");
            RunOutcome::CommitError
        }
    }
}
