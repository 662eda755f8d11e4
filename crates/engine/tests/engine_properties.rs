//! Cross-module behaviour of the engine through its public API.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use nsshub_engine::{
    match_volunteers, Fingerprint, IssuePlan, IssuePlanner, PlanSource, ProofOutcome,
    ProofValidator, SuggestError, SuggestionProvider, Volunteer, DEFAULT_SKILLS,
};
use nsshub_test_utils::images::{checkerboard_png, gradient_png, uniform_png};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Helper {
    skills: Vec<String>,
    available: bool,
}

impl Volunteer for Helper {
    fn skills(&self) -> &[String] {
        &self.skills
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

fn helper(skills: &[&str], available: bool) -> Helper {
    Helper {
        skills: skills.iter().map(|s| s.to_string()).collect(),
        available,
    }
}

fn roster_strategy() -> impl Strategy<Value = Vec<Helper>> {
    let skill = prop::sample::select(DEFAULT_SKILLS.to_vec());
    proptest::collection::vec(
        (proptest::collection::vec(skill, 0..5), any::<bool>()).prop_map(|(skills, available)| {
            Helper {
                skills: skills.into_iter().map(String::from).collect(),
                available,
            }
        }),
        0..12,
    )
}

proptest! {
    #[test]
    fn prop_unavailable_volunteers_never_ranked(
        roster in roster_strategy(),
        required in proptest::collection::vec(
            prop::sample::select(DEFAULT_SKILLS.to_vec()),
            0..4,
        ),
    ) {
        let results = match_volunteers(&roster, &required);
        let available = roster.iter().filter(|h| h.available).count();
        prop_assert_eq!(results.len(), available);
        for result in &results {
            prop_assert!(result.volunteer.available);
            prop_assert!((0.0..=1.0).contains(&result.score.value()));
        }
        for pair in results.windows(2) {
            prop_assert!(pair[0].score.value() >= pair[1].score.value());
        }
    }
}

#[test]
fn empty_requirements_give_zero_scores_for_everyone() {
    let roster = vec![helper(&["medical"], true), helper(&["art", "tech"], true)];
    let none: [&str; 0] = [];
    let results = match_volunteers(&roster, &none);
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.score.is_zero()));
    assert!(results
        .iter()
        .all(|r| r.reason == "No specific skill match, but available"));
}

#[test]
fn identical_skill_sets_are_a_perfect_match() {
    let roster = vec![helper(&["cooking", "logistics", "tech"], true)];
    let results = match_volunteers(&roster, &["tech", "cooking", "logistics"]);
    assert_eq!(results[0].score.value(), 1.0);
    assert_eq!(results[0].reason, "Perfect match!");
}

#[test]
fn proof_session_catches_reuse_and_bad_photos() {
    let validator = ProofValidator::default();
    let mut known: HashSet<Fingerprint> = HashSet::new();

    let photo = checkerboard_png(64, 64, 8);
    let first = validator.validate(&photo, &known);
    assert!(first.accepted);
    known.insert(first.fingerprint.clone().unwrap());

    let second = validator.validate(&photo, &known);
    assert_eq!(second.outcome, ProofOutcome::Duplicate);

    let blank = validator.validate(&uniform_png(64, 64, 200), &known);
    assert!(matches!(blank.outcome, ProofOutcome::TooBlurry { .. }));
    assert!(blank.fingerprint.is_none());

    // A smooth ramp has almost no second-derivative energy.
    let ramp = validator.validate(&gradient_png(64, 64), &known);
    assert!(!ramp.accepted);
}

struct Stalled;

#[async_trait]
impl SuggestionProvider for Stalled {
    fn name(&self) -> &str {
        "stalled"
    }

    async fn complete(&self, _prompt: &str) -> Result<String, SuggestError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(String::new())
    }
}

#[tokio::test]
async fn offline_planning_matches_keyword_and_default_tables() {
    let planner = IssuePlanner::default();

    let garbage = planner.plan("There is garbage near the hostel").await;
    assert_eq!(
        garbage,
        IssuePlan {
            activity_type: "Clean-up Drive".into(),
            est_hours: 4,
            count: 10,
            skills: vec!["physical_labor".into(), "logistics".into()],
        }
    );

    let other = planner.plan_detailed("xyz unrelated text").await;
    assert_eq!(other.source, PlanSource::Default);
    assert_eq!(other.plan.activity_type, "General Awareness");
}

#[tokio::test]
async fn stalled_provider_falls_through_after_deadline() {
    let planner = IssuePlanner::default()
        .with_provider(Arc::new(Stalled))
        .with_deadline(Duration::from_millis(50));

    let started = std::time::Instant::now();
    let planned = planner.plan_detailed("Waste dumped behind the library").await;
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(
        planned.source,
        PlanSource::Rule {
            keyword: "waste".into()
        }
    );
}
