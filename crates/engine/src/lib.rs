//! Matching and verification engine for volunteer coordination.
//!
//! This crate provides:
//! - A fixed skill vocabulary and binary skill vectors
//! - Cosine-similarity matching of volunteers to activities, with reasons
//! - Proof-of-work image validation (duplicate detection and blur scoring)
//! - Issue planning with an external suggestion tier and keyword fallbacks

pub mod matching;
pub mod plan;
pub mod proof;
pub mod skills;
mod types;

pub use matching::{
    match_volunteers, MatchOptions, MatchResult, MatchScorer, Volunteer,
    DEFAULT_HIGH_OVERLAP_THRESHOLD,
};
pub use plan::{
    GeminiConfig, GeminiSuggester, IssuePlan, IssuePlanner, PlanSchemaError, PlanSource,
    PlannedIssue, SuggestError, SuggestionProvider, DEFAULT_PLAN_TIMEOUT,
};
pub use proof::{
    Fingerprint, FingerprintSet, ProofOutcome, ProofValidator, ProofVerdict,
    DEFAULT_BLUR_THRESHOLD,
};
pub use skills::{SkillVector, SkillVocabulary, DEFAULT_SKILLS};
pub use types::Similarity;
