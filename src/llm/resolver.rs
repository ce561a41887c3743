use crate::catalog::{self, CatalogError, ResolvedCommand};
use crate::git::RepositoryInfo;
use crate::llm::client::{LlmClient, LlmError};
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Empty request")]
    EmptyRequest,

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Model response is not a recognizable intent: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// The structured intent the model is asked to produce
#[derive(Debug, Deserialize)]
struct IntentPayload {
    operation: String,
    #[serde(default)]
    params: HashMap<String, String>,
}

/// Turns free-text requests into pre-vetted, parameterized commands
///
/// The model never supplies a command line. It picks an operation from the
/// catalog and extracts its parameters; the catalog builds the argument
/// vector. Anything outside that contract is a typed error.
pub struct Resolver {
    client: Box<dyn LlmClient>,
}

impl Resolver {
    pub fn new(client: Box<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub async fn resolve(
        &self,
        request: &str,
        info: &RepositoryInfo,
    ) -> Result<ResolvedCommand, ResolveError> {
        let request = request.trim();
        if request.is_empty() {
            return Err(ResolveError::EmptyRequest);
        }

        let prompt = build_prompt(request, info);
        let response = self.client.complete(&prompt).await?;

        let payload = parse_intent(&response)?;
        let command = catalog::build(&payload.operation, &payload.params)?;

        Ok(command)
    }
}

fn build_prompt(request: &str, info: &RepositoryInfo) -> String {
    format!(
        "You are a git assistant. Map the user's request onto exactly one \
operation from the catalog below.

Operation catalog:
{catalog}
Repository context:
{context}
User request: {request}

CRITICAL INSTRUCTIONS:
- Respond with ONLY a JSON object, no explanation, no markdown fences
- Format: {{\"operation\": \"<name>\", \"params\": {{\"<param>\": \"<value>\"}}}}
- The operation name must come from the catalog
- Fill every parameter the operation lists; omit params only for operations with none
- When the user says \"my branch\" or \"current branch\", use the current branch from the context
- When the user names a file loosely, pick the matching path from the context file lists

Your response:",
        catalog = catalog::prompt_block(),
        context = info.render(),
        request = request,
    )
}

/// Extract the intent JSON from a model reply
///
/// Tolerates markdown fences and stray prose around the object; everything
/// else is rejected.
fn parse_intent(response: &str) -> Result<IntentPayload, ResolveError> {
    let cleaned = strip_fences(response);

    let start = cleaned.find('{');
    let end = cleaned.rfind('}');

    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &cleaned[start..=end],
        _ => {
            return Err(ResolveError::MalformedResponse(truncate(response)));
        }
    };

    serde_json::from_str(json).map_err(|_| ResolveError::MalformedResponse(truncate(response)))
}

fn strip_fences(response: &str) -> &str {
    let mut cleaned = response.trim();

    if cleaned.starts_with("```") {
        if let Some(first_newline) = cleaned.find('\n') {
            cleaned = &cleaned[first_newline + 1..];
        }
        if let Some(last_backticks) = cleaned.rfind("```") {
            cleaned = &cleaned[..last_backticks];
        }
        cleaned = cleaned.trim();
    }

    cleaned
}

/// Cap error detail so a rambling model reply stays displayable
fn truncate(response: &str) -> String {
    const MAX: usize = 200;
    let trimmed = response.trim();
    if trimmed.len() <= MAX {
        trimmed.to_string()
    } else {
        let cut = trimmed
            .char_indices()
            .take_while(|(i, _)| *i < MAX)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &trimmed[..cut])
    }
}
