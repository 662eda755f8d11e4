//! The fixed, ordered set of recognized skill tags.

use serde::{Deserialize, Serialize};

use super::SkillVector;

/// Skills recognized out of the box, in vector-position order.
pub const DEFAULT_SKILLS: [&str; 8] = [
    "teaching",
    "medical",
    "physical_labor",
    "tech",
    "management",
    "art",
    "cooking",
    "logistics",
];

/// Ordered vocabulary of valid skill identifiers.
///
/// The position of a skill in the vocabulary is its index in every
/// [`SkillVector`], so a vocabulary is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillVocabulary {
    skills: Vec<String>,
}

impl SkillVocabulary {
    /// Build a vocabulary from the given skills.
    ///
    /// Blank entries are dropped and duplicates keep their first position.
    pub fn new<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for skill in skills {
            let skill = skill.into().trim().to_string();
            if skill.is_empty() || unique.contains(&skill) {
                continue;
            }
            unique.push(skill);
        }
        Self { skills: unique }
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Skills in vector-position order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.position(skill).is_some()
    }

    /// Vector index of a skill, if it belongs to the vocabulary.
    pub fn position(&self, skill: &str) -> Option<usize> {
        self.skills.iter().position(|s| s == skill)
    }

    /// Convert a skill set into its binary vector.
    ///
    /// Unknown skills are ignored rather than rejected, so callers can pass
    /// free-text tags without breaking matching.
    pub fn vectorize<I, S>(&self, skills: I) -> SkillVector
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut bits = vec![0u8; self.skills.len()];
        for skill in skills {
            if let Some(index) = self.position(skill.as_ref()) {
                bits[index] = 1;
            }
        }
        SkillVector::from_bits(bits)
    }

    /// Keep only the known skills, deduplicated, in input order.
    pub fn retain_known<I, S>(&self, skills: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kept: Vec<String> = Vec::new();
        for skill in skills {
            let skill = skill.as_ref();
            if self.contains(skill) && !kept.iter().any(|k| k == skill) {
                kept.push(skill.to_string());
            }
        }
        kept
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS)
    }
}

impl std::fmt::Display for SkillVocabulary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.skills.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_vocabulary_order() {
        let vocab = SkillVocabulary::default();
        assert_eq!(vocab.len(), 8);
        assert_eq!(vocab.position("teaching"), Some(0));
        assert_eq!(vocab.position("logistics"), Some(7));
    }

    #[test]
    fn test_new_drops_blank_and_duplicate_entries() {
        let vocab = SkillVocabulary::new(["art", " ", "tech", "art"]);
        assert_eq!(vocab.iter().collect::<Vec<_>>(), vec!["art", "tech"]);
    }

    #[test]
    fn test_vectorize_sets_known_positions() {
        let vocab = SkillVocabulary::default();
        let vector = vocab.vectorize(["medical", "logistics"]);
        assert_eq!(vector.as_slice(), &[0, 1, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_vectorize_ignores_unknown_skills() {
        let vocab = SkillVocabulary::default();
        let vector = vocab.vectorize(["juggling", "tech", ""]);
        assert_eq!(vector.ones(), 1);
        assert_eq!(vector.len(), vocab.len());
    }

    #[test]
    fn test_vectorize_empty_is_zero() {
        let vocab = SkillVocabulary::default();
        assert!(vocab.vectorize(Vec::<String>::new()).is_zero());
    }

    #[test]
    fn test_vectorize_is_case_sensitive() {
        let vocab = SkillVocabulary::default();
        assert!(vocab.vectorize(["Teaching"]).is_zero());
    }

    #[test]
    fn test_retain_known() {
        let vocab = SkillVocabulary::default();
        let kept = vocab.retain_known(["art", "knitting", "art", "cooking"]);
        assert_eq!(kept, vec!["art", "cooking"]);
    }

    #[test]
    fn test_display_joins_skills() {
        let vocab = SkillVocabulary::new(["a", "b"]);
        assert_eq!(vocab.to_string(), "a, b");
    }

    fn skill_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            proptest::sample::select(DEFAULT_SKILLS.to_vec()).prop_map(str::to_string),
            "[a-z_]{1,12}",
        ]
    }

    proptest! {
        #[test]
        fn prop_ones_equal_known_distinct_skills(
            skills in proptest::collection::vec(skill_strategy(), 0..16)
        ) {
            let vocab = SkillVocabulary::default();
            let known: std::collections::HashSet<&str> = skills
                .iter()
                .map(String::as_str)
                .filter(|s| vocab.contains(s))
                .collect();
            prop_assert_eq!(vocab.vectorize(&skills).ones(), known.len());
        }

        #[test]
        fn prop_vectorize_is_order_independent(
            skills in proptest::collection::vec(skill_strategy(), 0..16)
        ) {
            let vocab = SkillVocabulary::default();
            let mut reversed = skills.clone();
            reversed.reverse();
            prop_assert_eq!(vocab.vectorize(&skills), vocab.vectorize(&reversed));
        }
    }
}
