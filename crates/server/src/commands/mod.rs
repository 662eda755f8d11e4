//! CLI command handlers for the nsshub application.

mod matching;
mod plan;
mod proof;
mod roster;

pub(crate) use matching::handle_match_command;
pub(crate) use plan::handle_plan_command;
pub(crate) use proof::handle_verify_command;
pub(crate) use roster::{handle_roster_command, handle_stats_command};

use anyhow::Result;
use nsshub_engine::MatchResult;
use nsshub_state::VolunteerRecord;
use serde::Serialize;

/// One ranked volunteer as printed by `match` and `plan --create`.
#[derive(Debug, Serialize)]
pub(crate) struct MatchRow<'a> {
    pub id: u64,
    pub name: &'a str,
    pub skills: &'a [String],
    pub score: f64,
    pub reason: &'a str,
}

impl<'a> MatchRow<'a> {
    pub(crate) fn from_result(result: &'a MatchResult<'a, VolunteerRecord>) -> Self {
        Self {
            id: result.volunteer.id,
            name: &result.volunteer.name,
            skills: &result.volunteer.skills,
            score: result.score.value(),
            reason: &result.reason,
        }
    }
}

pub(crate) fn print_match_rows(rows: &[MatchRow<'_>]) {
    if rows.is_empty() {
        println!("No available volunteers.");
        return;
    }
    for (rank, row) in rows.iter().enumerate() {
        println!(
            "{:>2}. {} (#{}) score {:.2} | {}",
            rank + 1,
            row.name,
            row.id,
            row.score,
            row.reason
        );
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
