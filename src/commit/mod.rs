//! Commit message record, schema validation, and prompt construction.

pub mod message;
pub mod prompt;

pub use message::{CommitMessage, MAX_MESSAGE_CHARS, parse_response, response_schema};
pub use prompt::{build_commit_prompt, build_summary_prompt};
