use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// How command results are printed.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Parses a finite, non-negative quality threshold.
fn parse_blur_threshold(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("`{raw}` is not a number: {e}"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("`{raw}` must be a finite, non-negative number"));
    }
    Ok(value)
}

/// Command-line interface for the `nsshub` application.
#[derive(Debug, Parser)]
#[command(
    name = "nsshub",
    version,
    about = "Volunteer matching, proof checking, and issue planning for service drives"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available `nsshub` commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Ranks available volunteers from the demo roster against required skills.
    Match {
        /// Required skills, comma separated (e.g. `medical,logistics`).
        #[arg(long, value_delimiter = ',', conflicts_with = "activity")]
        skills: Vec<String>,
        /// Use the skills of an existing activity instead.
        #[arg(long, value_name = "ID")]
        activity: Option<u64>,
        /// Show at most this many volunteers.
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Checks proof photos for duplicates, decode failures, and blur.
    Verify {
        /// Image files to check, in submission order.
        #[arg(required = true)]
        images: Vec<PathBuf>,
        /// Activity the proof belongs to.
        #[arg(long, value_name = "ID")]
        activity: Option<u64>,
        /// Minimum quality score (overrides `NSSHUB_BLUR_THRESHOLD`).
        #[arg(long, value_name = "SCORE", value_parser = parse_blur_threshold)]
        blur_threshold: Option<f64>,
        /// Do not read or update the fingerprint ledger.
        #[arg(long, default_value_t = false)]
        no_ledger: bool,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Turns a free-text issue report into an activity plan.
    Plan {
        /// Issue description.
        #[arg(required = true)]
        description: String,
        /// Skip the AI suggestion tier.
        #[arg(long, env = "NSSHUB_OFFLINE", default_value_t = false)]
        offline: bool,
        /// Deadline for the AI suggestion in milliseconds (overrides `NSSHUB_PLAN_TIMEOUT_MS`).
        #[arg(long, value_name = "MILLIS")]
        timeout_ms: Option<u64>,
        /// Create the planned activity and rank volunteers for it.
        #[arg(long, default_value_t = false)]
        create: bool,
        /// Location recorded on the created activity.
        #[arg(long, requires = "create")]
        location: Option<String>,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Lists the demo roster and activities.
    Roster {
        /// Only show available volunteers.
        #[arg(long, default_value_t = false)]
        available_only: bool,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Prints service counters and the known skill vocabulary.
    Stats {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}
