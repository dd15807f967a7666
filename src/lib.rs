//! ai-gcm - Generate git commit messages from staged changes using local Ollama models.
//!
//! # Overview
//!
//! ai-gcm reads the staged diff, asks one local model to summarize the
//! changes, asks a second model to draft a conventional-commit message
//! constrained to a JSON schema, and commits after user confirmation.

pub mod commit;
pub mod error;
pub mod generate;
pub mod git;
pub mod ollama;

// Re-export commonly used types
pub use commit::CommitMessage;
pub use error::{GenerationError, GitError};
pub use generate::{GenerateConfig, RunOutcome};
pub use git::GitChanges;
pub use ollama::OllamaClient;
