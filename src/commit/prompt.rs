//! Prompt construction for the two model calls.

/// Build the summarization prompt for the staged diff.
pub fn build_summary_prompt(diff: &str) -> String {
    format!(
        r#"Analyze this git diff and provide a concise summary of the changes:

{diff}

Provide a clear and specific summary of what changed. Focus on the important details."#
    )
}

/// Build the commit-message drafting prompt from a change summary.
///
/// The response is additionally constrained to a JSON schema; the prompt
/// carries the conventional-commit requirements the model should follow.
pub fn build_commit_prompt(summary: &str) -> String {
    format!(
        r#"Based on this summary of code changes, generate a commit message following conventional commit format.

Summary of changes:
{summary}

Requirements for the commit message:
- Start with a verb in the present tense
- Be clear and specific
- Be under 72 characters for the first line
- Only include essential information
- Follow conventional commit format

Example commit types:
- feat: A new feature
- fix: A bug fix
- refactor: Code restructuring
- docs: Documentation changes
- style: Formatting changes
- test: Adding or updating tests
- chore: Maintenance tasks"#
    )
}
