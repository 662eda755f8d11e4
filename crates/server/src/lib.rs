//! nsshub coordinator and command-line front end.
//!
//! The binary crate only calls [`run`]; everything else lives here so it can
//! be tested without spawning a process.

pub mod cli;
mod commands;
pub mod config;
pub mod coordinator;

pub use coordinator::{build_planner, Coordinator};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

/// Parse arguments and run the selected command.
pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    config::apply_config_to_env();

    let cli = Cli::parse();
    match cli.command {
        Commands::Match {
            skills,
            activity,
            limit,
            format,
        } => commands::handle_match_command(skills, activity, limit, format),
        Commands::Verify {
            images,
            activity,
            blur_threshold,
            no_ledger,
            format,
        } => commands::handle_verify_command(images, activity, blur_threshold, no_ledger, format),
        Commands::Plan {
            description,
            offline,
            timeout_ms,
            create,
            location,
            format,
        } => {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            rt.block_on(commands::handle_plan_command(
                description,
                offline,
                timeout_ms,
                create,
                location,
                format,
            ))
        }
        Commands::Roster {
            available_only,
            format,
        } => commands::handle_roster_command(available_only, format),
        Commands::Stats { format } => commands::handle_stats_command(format),
    }
}
