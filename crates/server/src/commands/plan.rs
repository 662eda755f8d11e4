//! CLI handler for the `plan` command.

use super::{print_json, print_match_rows, MatchRow};
use crate::cli::OutputFormat;
use crate::coordinator::Coordinator;
use anyhow::Result;
use nsshub_state::{EngineSettings, ServiceStore};
use serde_json::json;
use std::time::Duration;

/// Handle the `plan` command.
pub(crate) async fn handle_plan_command(
    description: String,
    offline: bool,
    timeout_ms: Option<u64>,
    create: bool,
    location: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let mut settings = EngineSettings::from_env();
    if let Some(ms) = timeout_ms {
        settings.plan_timeout = Duration::from_millis(ms);
    }
    let mut coordinator = Coordinator::with_settings(ServiceStore::seeded(), &settings, offline);

    let planned = coordinator.plan_issue(&description).await;

    if !create {
        if format.is_json() {
            return print_json(&planned);
        }
        println!("Activity:  {}", planned.plan.activity_type);
        println!("Hours:     {}", planned.plan.est_hours);
        println!("Needed:    {}", planned.plan.count);
        println!("Skills:    {}", planned.plan.skills.join(", "));
        println!("Source:    {}", planned.source.label());
        return Ok(());
    }

    let activity = coordinator.create_activity_from_plan(&description, location, &planned);
    let results = coordinator.match_activity(activity.id)?;
    let rows: Vec<MatchRow<'_>> = results.iter().map(MatchRow::from_result).collect();

    if format.is_json() {
        return print_json(&json!({
            "plan": planned,
            "activity": activity,
            "matches": rows,
        }));
    }

    println!(
        "Created activity #{} \"{}\" ({}, {}h, {} volunteers) from {} plan",
        activity.id,
        activity.title,
        activity.activity_type,
        activity.estimated_hours,
        activity.required_count,
        planned.source.label()
    );
    print_match_rows(&rows);
    Ok(())
}
