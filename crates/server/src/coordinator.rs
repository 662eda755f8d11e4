//! Ties the engine components to the service store.

use std::sync::Arc;

use anyhow::Result;
use nsshub_engine::{
    GeminiSuggester, IssuePlanner, MatchResult, MatchScorer, PlannedIssue, ProofValidator,
    ProofVerdict, SkillVocabulary,
};
use nsshub_state::{
    ActivityRecord, EngineSettings, NewActivity, ServiceStore, StoreError, VolunteerRecord,
};
use tracing::{debug, info};

/// Build the issue planner for the given settings.
///
/// The Gemini tier is attached only when online and an API key is configured.
pub fn build_planner(settings: &EngineSettings, offline: bool) -> IssuePlanner {
    let planner =
        IssuePlanner::new(SkillVocabulary::default()).with_deadline(settings.plan_timeout);
    if offline {
        debug!(target: "nsshub::plan", "Offline mode, suggestion tier disabled");
        return planner;
    }
    match GeminiSuggester::from_env() {
        Ok(suggester) => planner.with_provider(Arc::new(suggester)),
        Err(e) => {
            debug!(target: "nsshub::plan", reason = %e, "Suggestion tier disabled");
            planner
        }
    }
}

/// Owns the store and the engine components used against it.
#[derive(Debug)]
pub struct Coordinator {
    store: ServiceStore,
    scorer: MatchScorer,
    validator: ProofValidator,
    planner: IssuePlanner,
}

impl Coordinator {
    pub fn new(
        store: ServiceStore,
        scorer: MatchScorer,
        validator: ProofValidator,
        planner: IssuePlanner,
    ) -> Self {
        Self {
            store,
            scorer,
            validator,
            planner,
        }
    }

    /// Coordinator over `store` configured from the environment.
    ///
    /// `NSSHUB_OFFLINE` disables the suggestion tier.
    pub fn from_env(store: ServiceStore) -> Self {
        let settings = EngineSettings::from_env();
        Self::with_settings(store, &settings, nsshub_state::env_offline())
    }

    pub fn with_settings(store: ServiceStore, settings: &EngineSettings, offline: bool) -> Self {
        Self::new(
            store,
            MatchScorer::new(SkillVocabulary::default(), settings.match_options()),
            ProofValidator::new(settings.blur_threshold),
            build_planner(settings, offline),
        )
    }

    pub fn store(&self) -> &ServiceStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ServiceStore {
        &mut self.store
    }

    pub fn scorer(&self) -> &MatchScorer {
        &self.scorer
    }

    /// Rank available volunteers for an activity's required skills.
    pub fn match_activity(
        &self,
        activity_id: u64,
    ) -> Result<Vec<MatchResult<'_, VolunteerRecord>>, StoreError> {
        let activity = self.store.activity(activity_id)?;
        Ok(self.match_skills(&activity.skills_needed))
    }

    /// Rank available volunteers for an ad-hoc skill list.
    pub fn match_skills<S: AsRef<str>>(
        &self,
        required_skills: &[S],
    ) -> Vec<MatchResult<'_, VolunteerRecord>> {
        self.scorer.rank(self.store.volunteers(), required_skills)
    }

    /// Validate a proof photo and record the outcome in the store.
    pub fn submit_proof(&mut self, activity_id: u64, image_bytes: &[u8]) -> ProofVerdict {
        let verdict = self
            .validator
            .validate(image_bytes, self.store.proof_fingerprints());

        match &verdict.fingerprint {
            Some(fingerprint) if verdict.accepted => {
                let known_activity = self
                    .store
                    .record_proof(activity_id, fingerprint.clone())
                    .is_some();
                info!(activity_id, known_activity, %fingerprint, "Proof accepted");
            }
            _ => {
                self.store.record_rejected_proof();
                info!(activity_id, outcome = verdict.outcome.label(), "Proof rejected");
            }
        }
        verdict
    }

    /// Plan an activity for an issue description.
    pub async fn plan_issue(&self, description: &str) -> PlannedIssue {
        self.planner.plan_detailed(description).await
    }

    /// Create an activity carrying the plan's type, hours, headcount, and skills.
    pub fn create_activity_from_plan(
        &mut self,
        title: impl Into<String>,
        location: Option<String>,
        planned: &PlannedIssue,
    ) -> ActivityRecord {
        let activity = self.store.add_activity(NewActivity::from_plan(
            title,
            location,
            &planned.plan,
        ));
        info!(
            id = activity.id,
            source = planned.source.label(),
            "Created activity from plan"
        );
        activity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsshub_engine::{MatchOptions, PlanSource, ProofOutcome};
    use nsshub_state::ActivityStatus;
    use nsshub_test_utils::images::{checkerboard_png, uniform_png};

    fn coordinator() -> Coordinator {
        Coordinator::new(
            ServiceStore::seeded(),
            MatchScorer::new(SkillVocabulary::default(), MatchOptions::default()),
            ProofValidator::default(),
            IssuePlanner::default(),
        )
    }

    #[test]
    fn match_activity_ranks_seeded_roster() {
        let coord = coordinator();
        let health_camp = coord
            .store()
            .activities()
            .iter()
            .find(|a| a.activity_type == "medical")
            .map(|a| a.id)
            .unwrap();

        let results = coord.match_activity(health_camp).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].volunteer.name, "Arjun Kumar");
        assert_eq!(results[0].reason, "High skill overlap");
        assert!(results[1].score.is_zero());
    }

    #[test]
    fn match_activity_unknown_id_is_error() {
        let coord = coordinator();
        assert_eq!(
            coord.match_activity(999).unwrap_err(),
            StoreError::ActivityNotFound(999)
        );
    }

    #[test]
    fn submit_proof_records_and_rejects_duplicates() {
        let mut coord = coordinator();
        let photo = checkerboard_png(32, 32, 4);

        let first = coord.submit_proof(1, &photo);
        assert!(first.accepted, "{}", first.message);
        assert_eq!(
            coord.store().activity(1).unwrap().status,
            ActivityStatus::ProofSubmitted
        );

        let second = coord.submit_proof(2, &photo);
        assert!(!second.accepted);
        assert_eq!(second.outcome, ProofOutcome::Duplicate);
        assert_eq!(coord.store().stats().proofs_rejected, 1);
        assert_eq!(
            coord.store().activity(2).unwrap().status,
            ActivityStatus::Created
        );
    }

    #[test]
    fn blurry_proof_is_counted_but_not_recorded() {
        let mut coord = coordinator();
        let verdict = coord.submit_proof(1, &uniform_png(16, 16, 128));
        assert!(matches!(verdict.outcome, ProofOutcome::TooBlurry { .. }));
        assert!(coord.store().proof_fingerprints().is_empty());
        assert_eq!(coord.store().stats().proofs_rejected, 1);
    }

    #[test]
    fn proof_for_unknown_activity_still_blocks_reuse() {
        let mut coord = coordinator();
        let photo = checkerboard_png(24, 24, 3);
        assert!(coord.submit_proof(42, &photo).accepted);
        assert_eq!(coord.submit_proof(1, &photo).outcome, ProofOutcome::Duplicate);
    }

    #[tokio::test]
    async fn plan_issue_and_create_activity() {
        let mut coord = coordinator();
        let planned = coord.plan_issue("Garbage piling up near the canteen").await;
        assert_eq!(
            planned.source,
            PlanSource::Rule {
                keyword: "garbage".into()
            }
        );

        let activity =
            coord.create_activity_from_plan("Canteen cleanup", Some("Canteen".into()), &planned);
        assert_eq!(activity.activity_type, "Clean-up Drive");
        assert_eq!(activity.estimated_hours, planned.plan.est_hours);
        assert_eq!(activity.required_count, planned.plan.count);
        assert_eq!(activity.skills_needed, planned.plan.skills);
        assert_eq!(activity.status, ActivityStatus::Created);

        let matches = coord.match_activity(activity.id).unwrap();
        assert_eq!(matches[0].volunteer.name, "Raj Mulligan");
    }

    #[test]
    fn offline_planner_has_no_provider() {
        let planner = build_planner(&EngineSettings::default(), true);
        assert!(!planner.has_provider());
    }
}
