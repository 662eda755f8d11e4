//! Proof-of-work image validation.
//!
//! A submission is rejected when its bytes were accepted before, when it
//! cannot be decoded as an image, or when it is too blurry to show anything.
//! Accepted submissions hand back a fingerprint for the caller to record;
//! the validator itself keeps no state.

mod fingerprint;
mod quality;

pub use fingerprint::{Fingerprint, FingerprintSet};
pub use quality::{laplacian_variance, to_grayscale};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default minimum Laplacian variance for an acceptable photo.
pub const DEFAULT_BLUR_THRESHOLD: f64 = 100.0;

const DUPLICATE_MESSAGE: &str = "Duplicate image detected! This proof has already been used.";
const INVALID_MESSAGE: &str = "Invalid image format.";
const ACCEPTED_MESSAGE: &str = "Image verified successfully.";

/// Why a submission was accepted or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProofOutcome {
    Accepted { quality: f64 },
    Duplicate,
    InvalidImage,
    TooBlurry { quality: f64 },
}

impl ProofOutcome {
    /// Short label for logs and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Accepted { .. } => "accepted",
            Self::Duplicate => "duplicate",
            Self::InvalidImage => "invalid-image",
            Self::TooBlurry { .. } => "too-blurry",
        }
    }
}

/// Result of validating one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofVerdict {
    pub accepted: bool,
    /// User-facing message.
    pub message: String,
    /// Present only on acceptance; the caller records it.
    pub fingerprint: Option<Fingerprint>,
    pub outcome: ProofOutcome,
}

impl ProofVerdict {
    fn accepted(fingerprint: Fingerprint, quality: f64) -> Self {
        Self {
            accepted: true,
            message: ACCEPTED_MESSAGE.to_string(),
            fingerprint: Some(fingerprint),
            outcome: ProofOutcome::Accepted { quality },
        }
    }

    fn rejected(outcome: ProofOutcome, message: impl Into<String>) -> Self {
        Self {
            accepted: false,
            message: message.into(),
            fingerprint: None,
            outcome,
        }
    }
}

/// Validates proof images against caller-owned fingerprints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProofValidator {
    blur_threshold: f64,
}

impl Default for ProofValidator {
    fn default() -> Self {
        Self::new(DEFAULT_BLUR_THRESHOLD)
    }
}

impl ProofValidator {
    /// Validator rejecting photos whose quality score is below `blur_threshold`.
    ///
    /// A NaN, infinite, or negative threshold would disable or invert the
    /// blur check, so it is replaced by [`DEFAULT_BLUR_THRESHOLD`].
    pub fn new(blur_threshold: f64) -> Self {
        if !blur_threshold.is_finite() || blur_threshold < 0.0 {
            warn!(
                blur_threshold,
                default = DEFAULT_BLUR_THRESHOLD,
                "Invalid blur threshold, using default"
            );
            return Self {
                blur_threshold: DEFAULT_BLUR_THRESHOLD,
            };
        }
        Self { blur_threshold }
    }

    pub fn blur_threshold(&self) -> f64 {
        self.blur_threshold
    }

    /// Validate raw image bytes.
    ///
    /// Never mutates `known`; on acceptance the returned fingerprint must be
    /// inserted by the caller for later duplicates to be caught.
    pub fn validate<K>(&self, image_bytes: &[u8], known: &K) -> ProofVerdict
    where
        K: FingerprintSet + ?Sized,
    {
        let fingerprint = Fingerprint::of(image_bytes);
        if known.contains_fingerprint(&fingerprint) {
            debug!(%fingerprint, "Rejected duplicate proof");
            return ProofVerdict::rejected(ProofOutcome::Duplicate, DUPLICATE_MESSAGE);
        }

        let image = match image::load_from_memory(image_bytes) {
            Ok(image) => image,
            Err(err) => {
                debug!(error = %err, bytes = image_bytes.len(), "Proof failed to decode");
                return ProofVerdict::rejected(ProofOutcome::InvalidImage, INVALID_MESSAGE);
            }
        };

        let quality = laplacian_variance(&to_grayscale(&image));
        if quality < self.blur_threshold {
            debug!(quality, threshold = self.blur_threshold, "Proof too blurry");
            return ProofVerdict::rejected(
                ProofOutcome::TooBlurry { quality },
                format!(
                    "Image is too blurry (Quality Score: {}). Please retake.",
                    quality.trunc() as i64
                ),
            );
        }

        debug!(%fingerprint, quality, "Proof accepted");
        ProofVerdict::accepted(fingerprint, quality)
    }
}
