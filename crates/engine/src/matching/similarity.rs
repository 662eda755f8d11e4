//! Cosine similarity over binary skill vectors.

use crate::skills::SkillVector;
use crate::types::Similarity;

/// Compute cosine similarity between two skill vectors.
///
/// Returns 0.0 when either vector has no skills set. For binary vectors the
/// squared norms are integer counts, so `dot / sqrt(|a| * |b|)` yields exactly
/// 1.0 for identical vectors.
pub fn cosine_similarity(a: &SkillVector, b: &SkillVector) -> Similarity {
    let norm_a = a.ones();
    let norm_b = b.ones();
    if norm_a == 0 || norm_b == 0 {
        return Similarity::zero();
    }

    let dot = a.dot(b) as f64;
    Similarity::new(dot / ((norm_a * norm_b) as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::SkillVocabulary;

    fn vec_of(skills: &[&str]) -> SkillVector {
        SkillVocabulary::default().vectorize(skills)
    }

    #[test]
    fn test_identical_vectors_score_exactly_one() {
        for n in 1..=8 {
            let skills: Vec<&str> = crate::skills::DEFAULT_SKILLS[..n].to_vec();
            let v = vec_of(&skills);
            assert_eq!(cosine_similarity(&v, &v).value(), 1.0, "n = {n}");
        }
    }

    #[test]
    fn test_disjoint_vectors_score_zero() {
        let a = vec_of(&["teaching"]);
        let b = vec_of(&["cooking"]);
        assert!(cosine_similarity(&a, &b).is_zero());
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        let a = vec_of(&[]);
        let b = vec_of(&["cooking"]);
        assert!(cosine_similarity(&a, &b).is_zero());
        assert!(cosine_similarity(&b, &a).is_zero());
        assert!(cosine_similarity(&a, &a).is_zero());
    }

    #[test]
    fn test_partial_overlap() {
        // one shared of (1, 2): 1 / sqrt(2)
        let a = vec_of(&["medical"]);
        let b = vec_of(&["medical", "management"]);
        let score = cosine_similarity(&a, &b).value();
        assert!((score - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    }
}
