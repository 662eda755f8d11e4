//! Fixed-length binary skill vectors.

use serde::Serialize;

/// Binary vector over a [`SkillVocabulary`](super::SkillVocabulary).
///
/// Derived on demand from a skill set and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SkillVector {
    bits: Vec<u8>,
}

impl SkillVector {
    pub(crate) fn from_bits(bits: Vec<u8>) -> Self {
        Self { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    /// Number of set positions.
    pub fn ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b != 0).count()
    }

    /// True when no position is set.
    pub fn is_zero(&self) -> bool {
        self.ones() == 0
    }

    /// Count of positions set in both vectors.
    pub fn dot(&self, other: &SkillVector) -> usize {
        self.bits
            .iter()
            .zip(other.bits.iter())
            .filter(|(a, b)| **a != 0 && **b != 0)
            .count()
    }
}
