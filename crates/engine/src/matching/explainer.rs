//! Human-readable reasons attached to match results.

use crate::types::Similarity;

pub(crate) const PERFECT_MATCH: &str = "Perfect match!";
pub(crate) const HIGH_OVERLAP: &str = "High skill overlap";
pub(crate) const NO_SKILL_MATCH: &str = "No specific skill match, but available";

/// Pick the reason for a score; the first matching rule wins.
pub fn explain_match<S: AsRef<str>>(
    score: Similarity,
    volunteer_skills: &[String],
    required_skills: &[S],
    high_overlap_threshold: f64,
) -> String {
    if score.is_perfect() {
        return PERFECT_MATCH.to_string();
    }
    if score.value() > high_overlap_threshold {
        return HIGH_OVERLAP.to_string();
    }
    if score.is_zero() {
        return NO_SKILL_MATCH.to_string();
    }

    let matched = matched_skills(volunteer_skills, required_skills);
    format!("Matches {} skills: {}", matched.len(), matched.join(", "))
}

/// Volunteer skills that are also required, in the volunteer's order.
pub fn matched_skills<'a, S: AsRef<str>>(
    volunteer_skills: &'a [String],
    required_skills: &[S],
) -> Vec<&'a str> {
    let mut matched: Vec<&str> = Vec::new();
    for skill in volunteer_skills {
        let skill = skill.as_str();
        if matched.contains(&skill) {
            continue;
        }
        if required_skills.iter().any(|r| r.as_ref() == skill) {
            matched.push(skill);
        }
    }
    matched
}
