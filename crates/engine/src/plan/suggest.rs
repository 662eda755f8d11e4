//! The external suggestion tier: provider trait, prompt, and response checks.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use super::IssuePlan;
use crate::skills::SkillVocabulary;

/// Prompt template for plan suggestions.
const PLAN_PROMPT: &str = r#"You are the operations planner for a campus volunteer service unit.
Read the reported issue below and suggest one volunteer activity that addresses it.

Issue: "{description}"

Respond with ONLY a JSON object of this exact shape and nothing else:
{
  "type": "<short activity type label>",
  "est_hours": <whole number of hours, at least 1>,
  "count": <whole number of volunteers needed, at least 1>,
  "skills": [<skills chosen only from: {vocabulary}>]
}"#;

/// A natural-language planning capability, such as a hosted LLM.
///
/// Implementations take a prompt and return the raw response text. The
/// planner owns validation; providers must not be trusted to honour the
/// requested shape.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Short name used in logs and plan provenance.
    fn name(&self) -> &str;

    async fn complete(&self, prompt: &str) -> Result<String, SuggestError>;
}

/// Ways the suggestion tier can fail. All of them trigger fallback.
#[derive(Error, Debug)]
pub enum SuggestError {
    /// The provider is not configured or refused to run.
    #[error("suggestion provider unavailable: {0}")]
    Unavailable(String),

    #[error("suggestion request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("suggestion provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("suggestion response contained no text")]
    EmptyResponse,

    #[error("suggestion timed out after {0:?}")]
    Timeout(Duration),

    #[error("suggestion rejected: {0}")]
    Schema(#[from] PlanSchemaError),
}

/// Why a suggested plan failed validation.
#[derive(Error, Debug)]
pub enum PlanSchemaError {
    #[error("response is not a JSON plan: {0}")]
    NotJson(#[source] serde_json::Error),

    #[error("activity type is empty")]
    EmptyType,

    #[error("{field} must be a positive integer, got {value}")]
    NotPositive { field: &'static str, value: u64 },

    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: u64 },

    #[error("skill '{0}' is not in the vocabulary")]
    UnknownSkill(String),
}

/// The shape we ask providers for. Extra fields are ignored.
#[derive(Debug, Deserialize)]
struct RawPlan {
    #[serde(rename = "type")]
    activity_type: String,
    est_hours: u64,
    count: u64,
    skills: Vec<String>,
}

/// Build the prompt sent to a provider.
pub fn build_plan_prompt(description: &str, vocabulary: &SkillVocabulary) -> String {
    PLAN_PROMPT
        .replace("{description}", description.trim())
        .replace("{vocabulary}", &vocabulary.to_string())
}

/// Strip markdown code fences a model may wrap around JSON.
fn strip_code_fences(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop a language tag such as ```json
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest.trim_start_matches("json"),
    };
    body.trim_end().trim_end_matches("```").trim()
}

fn positive(field: &'static str, value: u64) -> Result<u32, PlanSchemaError> {
    if value == 0 {
        return Err(PlanSchemaError::NotPositive { field, value });
    }
    u32::try_from(value).map_err(|_| PlanSchemaError::OutOfRange { field, value })
}

/// Parse and validate a provider response.
///
/// Hours and volunteer count must be positive integers and every skill must
/// belong to the vocabulary; anything else is a schema violation.
pub fn parse_plan_response(
    response: &str,
    vocabulary: &SkillVocabulary,
) -> Result<IssuePlan, PlanSchemaError> {
    let raw: RawPlan =
        serde_json::from_str(strip_code_fences(response)).map_err(PlanSchemaError::NotJson)?;

    let activity_type = raw.activity_type.trim().to_string();
    if activity_type.is_empty() {
        return Err(PlanSchemaError::EmptyType);
    }
    let est_hours = positive("est_hours", raw.est_hours)?;
    let count = positive("count", raw.count)?;

    if let Some(unknown) = raw.skills.iter().find(|s| !vocabulary.contains(s)) {
        return Err(PlanSchemaError::UnknownSkill(unknown.clone()));
    }

    Ok(IssuePlan {
        activity_type,
        est_hours,
        count,
        skills: vocabulary.retain_known(&raw.skills),
    })
}
