//! Issue planning: turn a free-text problem report into an activity plan.
//!
//! Three tiers are tried in order: an external suggestion provider (when one
//! is configured), a fixed keyword table, and a default plan. Provider
//! failures of any kind are logged and never reach the caller.

mod gemini;
pub mod rules;
mod suggest;

pub use gemini::{GeminiConfig, GeminiSuggester};
pub use rules::{default_plan, match_rule};
pub use suggest::{
    build_plan_prompt, parse_plan_response, PlanSchemaError, SuggestError, SuggestionProvider,
};

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::skills::SkillVocabulary;

/// Default deadline for the suggestion tier.
pub const DEFAULT_PLAN_TIMEOUT: Duration = Duration::from_secs(10);

/// A fully populated activity plan.
///
/// Built only by the rule table or by validating a provider response, so
/// it is serialize-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuePlan {
    /// Activity type label, e.g. "Clean-up Drive".
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Estimated hours of work.
    pub est_hours: u32,
    /// Volunteers needed.
    pub count: u32,
    /// Required skills, all from the vocabulary.
    pub skills: Vec<String>,
}

/// Which tier produced a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tier", rename_all = "snake_case")]
pub enum PlanSource {
    Suggested { provider: String },
    Rule { keyword: String },
    Default,
}

impl PlanSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Suggested { .. } => "suggested",
            Self::Rule { .. } => "rule",
            Self::Default => "default",
        }
    }
}

/// A plan together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedIssue {
    pub plan: IssuePlan,
    pub source: PlanSource,
}

/// Plans activities from issue descriptions.
#[derive(Clone)]
pub struct IssuePlanner {
    vocabulary: SkillVocabulary,
    provider: Option<Arc<dyn SuggestionProvider>>,
    deadline: Duration,
}

impl std::fmt::Debug for IssuePlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuePlanner")
            .field("vocabulary", &self.vocabulary)
            .field("provider", &self.provider.as_ref().map(|p| p.name().to_string()))
            .field("deadline", &self.deadline)
            .finish()
    }
}

impl Default for IssuePlanner {
    fn default() -> Self {
        Self::new(SkillVocabulary::default())
    }
}

impl IssuePlanner {
    /// Planner with no suggestion provider: keyword rules and default only.
    pub fn new(vocabulary: SkillVocabulary) -> Self {
        Self {
            vocabulary,
            provider: None,
            deadline: DEFAULT_PLAN_TIMEOUT,
        }
    }

    /// Use the given provider as the first tier.
    pub fn with_provider(mut self, provider: Arc<dyn SuggestionProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Bound the suggestion tier; on expiry planning falls through.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Plan an activity for the description.
    pub async fn plan(&self, description: &str) -> IssuePlan {
        self.plan_detailed(description).await.plan
    }

    /// Plan an activity and report which tier produced it.
    pub async fn plan_detailed(&self, description: &str) -> PlannedIssue {
        if let Some(provider) = &self.provider {
            match self.suggest(provider.as_ref(), description).await {
                Ok(plan) => {
                    info!(
                        provider = provider.name(),
                        activity = %plan.activity_type,
                        "Using suggested plan"
                    );
                    return PlannedIssue {
                        plan,
                        source: PlanSource::Suggested {
                            provider: provider.name().to_string(),
                        },
                    };
                }
                Err(err) => {
                    warn!(
                        provider = provider.name(),
                        error = %err,
                        "Plan suggestion failed, falling back to rules"
                    );
                }
            }
        }

        self.plan_offline(description)
    }

    /// Keyword rules, then the default plan. Never calls a provider.
    pub fn plan_offline(&self, description: &str) -> PlannedIssue {
        if let Some((keyword, mut plan)) = match_rule(description) {
            debug!(keyword, "Issue matched keyword rule");
            plan.skills = self.vocabulary.retain_known(&plan.skills);
            return PlannedIssue {
                plan,
                source: PlanSource::Rule {
                    keyword: keyword.to_string(),
                },
            };
        }

        debug!("No keyword rule matched, using default plan");
        let mut plan = default_plan();
        plan.skills = self.vocabulary.retain_known(&plan.skills);
        PlannedIssue {
            plan,
            source: PlanSource::Default,
        }
    }

    async fn suggest(
        &self,
        provider: &dyn SuggestionProvider,
        description: &str,
    ) -> Result<IssuePlan, SuggestError> {
        let prompt = build_plan_prompt(description, &self.vocabulary);
        let response = tokio::time::timeout(self.deadline, provider.complete(&prompt))
            .await
            .map_err(|_| SuggestError::Timeout(self.deadline))??;
        Ok(parse_plan_response(&response, &self.vocabulary)?)
    }
}
