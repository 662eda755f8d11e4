//! Common types shared across engine modules.

use serde::Serialize;

/// Similarity score clamped to the [0.0, 1.0] range.
///
/// Cosine similarity over binary vectors can never leave this range, but
/// floating point rounding can land a hair outside it; construction clamps.
///
/// # Examples
///
/// ```
/// use nsshub_engine::Similarity;
///
/// let s = Similarity::new(0.75);
/// assert_eq!(s.value(), 0.75);
///
/// assert_eq!(Similarity::new(1.0000001).value(), 1.0);
/// assert_eq!(Similarity::new(-0.2).value(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Similarity(f64);

impl Similarity {
    /// Create a new Similarity, clamping the value to [0.0, 1.0].
    ///
    /// NaN maps to zero.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the inner score.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn zero() -> Self {
        Self(0.0)
    }

    #[must_use]
    pub fn full() -> Self {
        Self(1.0)
    }

    /// True when the score is exactly 1.0.
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.0 == 1.0
    }

    /// True when the score is exactly 0.0.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Default for Similarity {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<f64> for Similarity {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Similarity> for f64 {
    fn from(score: Similarity) -> Self {
        score.0
    }
}

impl std::fmt::Display for Similarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
