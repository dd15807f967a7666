//! Model client for the local Ollama daemon.
//!
//! Two-call surface: list installed models (`/api/tags`) and run a
//! non-streaming generation (`/api/generate`), optionally constrained to a
//! JSON schema via the `format` parameter. No retries and no request
//! timeout; the process waits for the daemon.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::commit::{build_commit_prompt, build_summary_prompt, parse_response, response_schema};
use crate::error::GenerationError;
use crate::generate::ModelBackend;

/// Default daemon address when `OLLAMA_HOST` is unset.
pub const DEFAULT_HOST: &str = "http://localhost:11434";

/// Environment variable overriding the daemon address.
const HOST_ENV_VAR: &str = "OLLAMA_HOST";

/// Resolve the daemon base URL from the environment.
fn resolve_host() -> String {
    match std::env::var(HOST_ENV_VAR) {
        Ok(v) if !v.trim().is_empty() => v.trim().trim_end_matches('/').to_string(),
        _ => DEFAULT_HOST.to_string(),
    }
}

/// True if a known (installed) model satisfies a requested model name.
///
/// A match is the requested name verbatim, or any tagged variant of its
/// base name: `qwen2.5-coder` matches `qwen2.5-coder:latest`, while
/// `llama3.2:1b` matches both itself and any other `llama3.2:*` tag.
pub fn model_matches(requested: &str, known: &str) -> bool {
    let base = requested.split(':').next().unwrap_or(requested);
    known == requested || known.starts_with(&format!("{base}:"))
}

/// Client for the Ollama HTTP API.
pub struct OllamaClient {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<Value>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<ModelEntry>,
}

#[derive(Deserialize)]
struct ModelEntry {
    name: String,
}

impl OllamaClient {
    /// Client pointed at the address from `OLLAMA_HOST` (or the default).
    pub fn new() -> Self {
        Self::with_base_url(resolve_host())
    }

    /// Client pointed at an explicit base URL (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// List installed models.
    ///
    /// Any failure degrades to an empty list: callers cannot and need not
    /// distinguish "none installed" from "the query failed".
    pub async fn list_models(&self) -> Vec<String> {
        let url = format!("{}/api/tags", self.base_url);

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Could not list Ollama models: {e}");
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            warn!("Ollama model listing returned HTTP {}", response.status());
            return Vec::new();
        }

        match response.json::<TagsResponse>().await {
            Ok(tags) => tags.models.into_iter().map(|m| m.name).collect(),
            Err(e) => {
                warn!("Could not parse Ollama model listing: {e}");
                Vec::new()
            }
        }
    }

    /// Run a non-streaming generation, optionally schema-constrained.
    pub async fn generate(
        &self,
        model: &str,
        prompt: &str,
        format: Option<Value>,
    ) -> Result<String, GenerationError> {
        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            model,
            prompt,
            stream: false,
            format,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Daemon(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::NOT_FOUND {
                return Err(GenerationError::ModelNotFound {
                    model: model.to_string(),
                });
            }
            let detail = response.text().await.unwrap_or_default();
            return Err(GenerationError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Daemon(format!("invalid daemon response: {e}")))?;

        Ok(body.response)
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelBackend for OllamaClient {
    async fn is_model_available(&self, model: &str) -> (bool, Vec<String>) {
        let known = self.list_models().await;
        let available = known.iter().any(|k| model_matches(model, k));
        (available, known)
    }

    async fn summarize(&self, diff: &str, model: &str) -> Result<String, GenerationError> {
        let prompt = build_summary_prompt(diff);
        let text = self.generate(model, &prompt, None).await?;
        Ok(text.trim().to_string())
    }

    async fn draft_commit_message(
        &self,
        summary: &str,
        model: &str,
    ) -> Result<String, GenerationError> {
        let prompt = build_commit_prompt(summary);
        let raw = self
            .generate(model, &prompt, Some(response_schema()))
            .await?;
        parse_response(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_matches_verbatim() {
        assert!(model_matches("llama3.2", "llama3.2"));
        assert!(model_matches("llama3.2:1b", "llama3.2:1b"));
    }

    #[test]
    fn test_model_matches_unqualified_against_tagged() {
        assert!(model_matches("qwen2.5-coder", "qwen2.5-coder:latest"));
        assert!(model_matches("qwen2.5-coder", "qwen2.5-coder:7b"));
    }

    #[test]
    fn test_model_matches_tagged_against_other_tags_of_same_base() {
        // The base name drives the prefix match even when a tag was requested
        assert!(model_matches("llama3.2:1b", "llama3.2:3b"));
    }

    #[test]
    fn test_model_matches_rejects_different_base() {
        assert!(!model_matches("llama3.2", "llama3"));
        assert!(!model_matches("llama3", "llama3.2:latest"));
        assert!(!model_matches("qwen2.5-coder", "qwen2.5"));
    }

    #[test]
    fn test_model_matches_rejects_bare_name_when_requested_verbatim_differs() {
        // "llama3.2" installed without a tag does not match a "llama3:latest" request
        assert!(!model_matches("llama3:latest", "llama3.2"));
    }

    #[test]
    fn test_resolve_host_default() {
        temp_env::with_var_unset(HOST_ENV_VAR, || {
            assert_eq!(resolve_host(), DEFAULT_HOST);
        });
    }

    #[test]
    fn test_resolve_host_from_env_trims_trailing_slash() {
        temp_env::with_var(HOST_ENV_VAR, Some("http://daemon:11434/"), || {
            assert_eq!(resolve_host(), "http://daemon:11434");
        });
    }

    #[test]
    fn test_resolve_host_empty_env_uses_default() {
        temp_env::with_var(HOST_ENV_VAR, Some(""), || {
            assert_eq!(resolve_host(), DEFAULT_HOST);
        });
    }
}
