//! Ranking available volunteers against an activity's required skills.

mod explainer;
pub mod similarity;

pub use explainer::{explain_match, matched_skills};
pub use similarity::cosine_similarity;

use serde::Serialize;
use tracing::debug;

use crate::skills::SkillVocabulary;
use crate::types::Similarity;

/// Default score above which a match is reported as high overlap.
pub const DEFAULT_HIGH_OVERLAP_THRESHOLD: f64 = 0.7;

/// A roster entry the scorer can rank.
///
/// The scorer only reads skills and availability; everything else about a
/// volunteer record belongs to the caller.
pub trait Volunteer {
    /// Skills as entered for the volunteer, in their own order.
    fn skills(&self) -> &[String];
    /// Unavailable volunteers never appear in match results.
    fn is_available(&self) -> bool;
}

/// Tunables for the match scorer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOptions {
    /// Scores strictly above this (and below 1.0) read "High skill overlap".
    pub high_overlap_threshold: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            high_overlap_threshold: DEFAULT_HIGH_OVERLAP_THRESHOLD,
        }
    }
}

/// One ranked volunteer.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult<'a, V> {
    /// The roster entry this result refers to.
    pub volunteer: &'a V,
    /// Cosine similarity in [0.0, 1.0].
    pub score: Similarity,
    /// Human-readable explanation.
    pub reason: String,
}

/// Scores volunteers against required skills over a fixed vocabulary.
#[derive(Debug, Clone, Default)]
pub struct MatchScorer {
    vocabulary: SkillVocabulary,
    options: MatchOptions,
}

impl MatchScorer {
    pub fn new(vocabulary: SkillVocabulary, options: MatchOptions) -> Self {
        Self {
            vocabulary,
            options,
        }
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Score a single skill list against the required skills.
    pub fn score<S: AsRef<str>>(
        &self,
        volunteer_skills: &[String],
        required_skills: &[S],
    ) -> (Similarity, String) {
        let required = self.vocabulary.vectorize(required_skills);
        let offered = self.vocabulary.vectorize(volunteer_skills);
        let score = cosine_similarity(&required, &offered);
        let reason = explain_match(
            score,
            volunteer_skills,
            required_skills,
            self.options.high_overlap_threshold,
        );
        (score, reason)
    }

    /// Rank the available volunteers, best first.
    ///
    /// Equal scores keep roster order, so the same roster always produces the
    /// same ranking.
    pub fn rank<'a, V, S>(
        &self,
        volunteers: &'a [V],
        required_skills: &[S],
    ) -> Vec<MatchResult<'a, V>>
    where
        V: Volunteer,
        S: AsRef<str>,
    {
        if volunteers.is_empty() {
            return Vec::new();
        }

        let required = self.vocabulary.vectorize(required_skills);
        let mut results: Vec<MatchResult<'a, V>> = volunteers
            .iter()
            .filter(|v| v.is_available())
            .map(|volunteer| {
                let offered = self.vocabulary.vectorize(volunteer.skills());
                let score = cosine_similarity(&required, &offered);
                let reason = explain_match(
                    score,
                    volunteer.skills(),
                    required_skills,
                    self.options.high_overlap_threshold,
                );
                MatchResult {
                    volunteer,
                    score,
                    reason,
                }
            })
            .collect();

        // sort_by is stable: ties keep roster order
        results.sort_by(|a, b| b.score.value().total_cmp(&a.score.value()));

        debug!(
            roster = volunteers.len(),
            ranked = results.len(),
            "Ranked volunteers"
        );

        results
    }
}

/// Rank volunteers with the default vocabulary and thresholds.
pub fn match_volunteers<'a, V, S>(
    volunteers: &'a [V],
    required_skills: &[S],
) -> Vec<MatchResult<'a, V>>
where
    V: Volunteer,
    S: AsRef<str>,
{
    MatchScorer::default().rank(volunteers, required_skills)
}
