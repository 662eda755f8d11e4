//! Skill vocabulary and the binary vector space built on it.

mod vector;
mod vocabulary;

pub use vector::SkillVector;
pub use vocabulary::{SkillVocabulary, DEFAULT_SKILLS};
