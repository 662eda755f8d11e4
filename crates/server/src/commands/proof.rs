//! CLI handler for the `verify` command.

use super::print_json;
use crate::cli::OutputFormat;
use crate::coordinator::Coordinator;
use anyhow::{Context, Result};
use nsshub_engine::ProofVerdict;
use nsshub_state::{
    fingerprint_ledger_file, load_fingerprints, save_fingerprints, EngineSettings, ServiceStore,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct VerifyRow {
    path: PathBuf,
    #[serde(flatten)]
    verdict: ProofVerdict,
}

/// Reads every image up front so an unreadable file aborts the run before any
/// proof is accepted or the ledger is touched.
fn read_images(paths: Vec<PathBuf>) -> Result<Vec<(PathBuf, Vec<u8>)>> {
    paths
        .into_iter()
        .map(|path| {
            let bytes =
                std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
            Ok((path, bytes))
        })
        .collect()
}

/// Handle the `verify` command.
///
/// Images are checked in order within one session, so a repeated file is a
/// duplicate of its first occurrence. Unless `no_ledger` is set, fingerprints
/// accepted in earlier runs are loaded first and new ones saved afterwards.
pub(crate) fn handle_verify_command(
    images: Vec<PathBuf>,
    activity: Option<u64>,
    blur_threshold: Option<f64>,
    no_ledger: bool,
    format: OutputFormat,
) -> Result<()> {
    let mut settings = EngineSettings::from_env();
    if let Some(threshold) = blur_threshold {
        settings.blur_threshold = threshold;
    }
    let mut coordinator = Coordinator::with_settings(ServiceStore::seeded(), &settings, true);

    let ledger = if no_ledger {
        None
    } else {
        let path = fingerprint_ledger_file()?;
        coordinator
            .store_mut()
            .import_fingerprints(load_fingerprints(&path)?);
        Some(path)
    };

    let activity_id = activity.unwrap_or(0);
    let submissions = read_images(images)?;
    let mut rows = Vec::with_capacity(submissions.len());
    for (path, bytes) in submissions {
        let verdict = coordinator.submit_proof(activity_id, &bytes);
        rows.push(VerifyRow { path, verdict });
    }

    if let Some(path) = ledger {
        save_fingerprints(&path, coordinator.store().proof_fingerprints())?;
    }

    if format.is_json() {
        return print_json(&rows);
    }

    for row in &rows {
        let mark = if row.verdict.accepted { "ok " } else { "REJ" };
        println!(
            "[{}] {} ({}): {}",
            mark,
            row.path.display(),
            row.verdict.outcome.label(),
            row.verdict.message
        );
    }
    let accepted = rows.iter().filter(|r| r.verdict.accepted).count();
    println!("\n{} accepted, {} rejected", accepted, rows.len() - accepted);
    Ok(())
}
