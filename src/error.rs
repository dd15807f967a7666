//! Error types for ai-gcm modules using thiserror.

use thiserror::Error;

/// Errors from git subprocess invocations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to run git {operation}: {source}")]
    Spawn {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} failed: {stderr}")]
    NonZeroExit {
        operation: &'static str,
        stderr: String,
    },
}

/// Errors from model generation via the Ollama daemon.
///
/// The three draft-failure causes (daemon error, malformed JSON, schema
/// validation) get distinct variants so their Display strings stay
/// distinguishable; callers still branch only on Ok/Err.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Error reaching Ollama: {0}")]
    Daemon(String),

    #[error("Ollama returned HTTP {status}: {detail}")]
    Server { status: u16, detail: String },

    #[error("Model '{model}' not found. Run 'ollama pull {model}' first.")]
    ModelNotFound { model: String },

    #[error("Error parsing JSON response: {0}")]
    InvalidJson(String),

    #[error("Error validating commit message: {0}")]
    Validation(String),
}
