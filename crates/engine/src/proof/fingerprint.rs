//! Exact-content fingerprints for submitted proof images.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// SHA-256 digest of raw proof bytes, lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint the given bytes.
    pub fn of(bytes: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(bytes)))
    }

    /// Parse a previously recorded fingerprint.
    ///
    /// Returns `None` unless the input is 64 hex characters.
    pub fn from_hex(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.len() != 64 || !value.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self(value.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller-owned set of previously accepted fingerprints.
///
/// The validator only asks for membership; storage stays with the caller.
pub trait FingerprintSet {
    fn contains_fingerprint(&self, fingerprint: &Fingerprint) -> bool;
}

impl FingerprintSet for HashSet<Fingerprint> {
    fn contains_fingerprint(&self, fingerprint: &Fingerprint) -> bool {
        self.contains(fingerprint)
    }
}

impl FingerprintSet for BTreeSet<Fingerprint> {
    fn contains_fingerprint(&self, fingerprint: &Fingerprint) -> bool {
        self.contains(fingerprint)
    }
}

impl FingerprintSet for [Fingerprint] {
    fn contains_fingerprint(&self, fingerprint: &Fingerprint) -> bool {
        self.contains(fingerprint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_sha256_hex() {
        let fp = Fingerprint::of(b"abc");
        assert_eq!(
            fp.as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_fingerprint_deterministic() {
        assert_eq!(Fingerprint::of(b"proof"), Fingerprint::of(b"proof"));
        assert_ne!(Fingerprint::of(b"proof"), Fingerprint::of(b"proof!"));
    }

    #[test]
    fn test_from_hex_round_trips_display() {
        let fp = Fingerprint::of(b"x");
        assert_eq!(Fingerprint::from_hex(&fp.to_string()), Some(fp.clone()));
        assert_eq!(
            Fingerprint::from_hex(&fp.to_string().to_uppercase()),
            Some(fp)
        );
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(Fingerprint::from_hex("abc").is_none());
        assert!(Fingerprint::from_hex(&"z".repeat(64)).is_none());
    }

    #[test]
    fn test_sets_report_membership() {
        let fp = Fingerprint::of(b"a");
        let hashed: HashSet<Fingerprint> = [fp.clone()].into_iter().collect();
        let ordered: BTreeSet<Fingerprint> = [fp.clone()].into_iter().collect();
        let listed = vec![fp.clone()];
        assert!(hashed.contains_fingerprint(&fp));
        assert!(ordered.contains_fingerprint(&fp));
        assert!(listed.as_slice().contains_fingerprint(&fp));
        assert!(!hashed.contains_fingerprint(&Fingerprint::of(b"b")));
    }
}
