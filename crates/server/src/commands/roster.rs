//! CLI handlers for the `roster` and `stats` commands.

use super::print_json;
use crate::cli::OutputFormat;
use anyhow::Result;
use nsshub_engine::SkillVocabulary;
use nsshub_state::{ServiceStore, VolunteerRecord};
use serde_json::json;

pub(crate) fn handle_roster_command(available_only: bool, format: OutputFormat) -> Result<()> {
    let store = ServiceStore::seeded();
    let volunteers: Vec<&VolunteerRecord> = store
        .volunteers()
        .iter()
        .filter(|v| !available_only || v.available)
        .collect();

    if format.is_json() {
        return print_json(&json!({
            "volunteers": volunteers,
            "activities": store.activities(),
        }));
    }

    println!("Volunteers:");
    for v in &volunteers {
        println!(
            "  #{} {} [{}] {}{}",
            v.id,
            v.name,
            v.skills.join(", "),
            v.location.as_deref().unwrap_or("-"),
            if v.available { "" } else { " (unavailable)" }
        );
    }
    println!("\nActivities:");
    for a in store.activities() {
        println!(
            "  #{} {} ({}) needs {} x [{}], {}h, {}",
            a.id,
            a.title,
            a.activity_type,
            a.required_count,
            a.skills_needed.join(", "),
            a.estimated_hours,
            a.status
        );
    }
    Ok(())
}

pub(crate) fn handle_stats_command(format: OutputFormat) -> Result<()> {
    let store = ServiceStore::seeded();
    let stats = store.stats();
    let vocabulary = SkillVocabulary::default();

    if format.is_json() {
        return print_json(&json!({
            "stats": stats,
            "skills": vocabulary,
        }));
    }

    println!("Volunteers:           {}", stats.volunteers_count);
    println!("Activities created:   {}", stats.activities_created);
    println!("Activities verified:  {}", stats.activities_verified);
    println!("Service hours:        {}", stats.total_hours);
    println!("Proofs rejected:      {}", stats.proofs_rejected);
    println!("Skill vocabulary:     {}", vocabulary);
    Ok(())
}
