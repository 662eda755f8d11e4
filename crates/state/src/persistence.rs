use crate::env::config_dir;
use anyhow::{Context, Result};
use nsshub_engine::Fingerprint;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Returns `~/.nsshub/proof-fingerprints.json`, or `NSSHUB_LEDGER` if set.
pub fn fingerprint_ledger_file() -> Result<PathBuf> {
    if let Ok(custom) = std::env::var("NSSHUB_LEDGER") {
        return Ok(PathBuf::from(custom));
    }
    Ok(config_dir()?.join("proof-fingerprints.json"))
}

/// Loads previously accepted fingerprints. A missing file is an empty ledger.
///
/// Entries that are not valid hex digests are skipped with a warning.
pub fn load_fingerprints(path: &Path) -> Result<HashSet<Fingerprint>> {
    if !path.exists() {
        return Ok(HashSet::new());
    }
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading fingerprint ledger {}", path.display()))?;
    let list: Vec<String> = serde_json::from_str(&data)
        .with_context(|| format!("parsing fingerprint ledger {}", path.display()))?;

    let mut known = HashSet::with_capacity(list.len());
    for entry in list {
        match Fingerprint::from_hex(&entry) {
            Some(fp) => {
                known.insert(fp);
            }
            None => tracing::warn!(entry = %entry, "Skipping malformed ledger entry"),
        }
    }
    Ok(known)
}

/// Writes the ledger, sorted so the file diffs cleanly.
pub fn save_fingerprints(path: &Path, known: &HashSet<Fingerprint>) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut list: Vec<&str> = known.iter().map(Fingerprint::as_str).collect();
    list.sort_unstable();
    std::fs::write(path, serde_json::to_string_pretty(&list)?)?;
    Ok(())
}
