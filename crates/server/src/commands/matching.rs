//! CLI handler for the `match` command.

use super::{print_json, print_match_rows, MatchRow};
use crate::cli::OutputFormat;
use crate::coordinator::Coordinator;
use anyhow::{bail, Result};
use nsshub_state::ServiceStore;
use serde_json::json;

/// Handle the `match` command against the demo roster.
pub(crate) fn handle_match_command(
    skills: Vec<String>,
    activity: Option<u64>,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let coordinator = Coordinator::from_env(ServiceStore::seeded());

    let (required, mut results) = match activity {
        Some(id) => {
            let required = coordinator.store().activity(id)?.skills_needed.clone();
            (required, coordinator.match_activity(id)?)
        }
        None if skills.is_empty() => bail!("pass --skills or --activity"),
        None => {
            let results = coordinator.match_skills(&skills);
            (skills, results)
        }
    };

    let unknown: Vec<&String> = required
        .iter()
        .filter(|s| !coordinator.scorer().vocabulary().contains(s))
        .collect();
    if !unknown.is_empty() {
        tracing::warn!(?unknown, "Ignoring skills outside the vocabulary");
    }

    if let Some(limit) = limit {
        results.truncate(limit);
    }
    let rows: Vec<MatchRow<'_>> = results.iter().map(MatchRow::from_result).collect();

    if format.is_json() {
        return print_json(&json!({
            "required_skills": required,
            "matches": rows,
        }));
    }

    println!("Required skills: {}", required.join(", "));
    print_match_rows(&rows);
    Ok(())
}
