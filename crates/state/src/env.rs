use anyhow::Result;
use nsshub_engine::{
    MatchOptions, DEFAULT_BLUR_THRESHOLD, DEFAULT_HIGH_OVERLAP_THRESHOLD, DEFAULT_PLAN_TIMEOUT,
};
use std::path::PathBuf;
use std::time::Duration;

pub const HIGH_OVERLAP_THRESHOLD_VAR: &str = "NSSHUB_HIGH_OVERLAP_THRESHOLD";
pub const BLUR_THRESHOLD_VAR: &str = "NSSHUB_BLUR_THRESHOLD";
pub const PLAN_TIMEOUT_VAR: &str = "NSSHUB_PLAN_TIMEOUT_MS";

/// Returns the user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    #[cfg(unix)]
    if let Ok(home) = std::env::var("HOME") {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("home directory not found"))
}

/// Returns `~/.nsshub`.
pub fn config_dir() -> Result<PathBuf> {
    Ok(home_dir()?.join(".nsshub"))
}

/// Returns the path to the config file, honouring `NSSHUB_CONFIG`.
pub fn config_file() -> Option<PathBuf> {
    if let Ok(custom) = std::env::var("NSSHUB_CONFIG") {
        return Some(PathBuf::from(custom));
    }
    config_dir().ok().map(|d| d.join("config.toml"))
}

/// Checks if `NSSHUB_OFFLINE` is set to true (disables AI planning).
pub fn env_offline() -> bool {
    std::env::var("NSSHUB_OFFLINE")
        .map(|s| s == "1" || s.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn env_f64(key: &str, default: f64) -> f64 {
    match std::env::var(key) {
        Ok(v) => match v.trim().parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => parsed,
            _ => {
                tracing::warn!(key, value = %v, default, "Invalid numeric setting, using default");
                default
            }
        },
        Err(_) => default,
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(v) => v.trim().parse::<u64>().unwrap_or_else(|_| {
            tracing::warn!(key, value = %v, default, "Invalid numeric setting, using default");
            default
        }),
        Err(_) => default,
    }
}

/// Engine tunables resolved from the environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    pub high_overlap_threshold: f64,
    pub blur_threshold: f64,
    pub plan_timeout: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            high_overlap_threshold: DEFAULT_HIGH_OVERLAP_THRESHOLD,
            blur_threshold: DEFAULT_BLUR_THRESHOLD,
            plan_timeout: DEFAULT_PLAN_TIMEOUT,
        }
    }
}

impl EngineSettings {
    /// Read settings, falling back to defaults for unset or invalid values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            high_overlap_threshold: env_f64(
                HIGH_OVERLAP_THRESHOLD_VAR,
                defaults.high_overlap_threshold,
            ),
            blur_threshold: env_f64(BLUR_THRESHOLD_VAR, defaults.blur_threshold),
            plan_timeout: Duration::from_millis(env_u64(
                PLAN_TIMEOUT_VAR,
                defaults.plan_timeout.as_millis() as u64,
            )),
        }
    }

    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            high_overlap_threshold: self.high_overlap_threshold,
        }
    }
}
