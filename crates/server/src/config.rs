//! Configuration file support for nsshub.
//!
//! Loads settings from `~/.nsshub/config.toml` (or `NSSHUB_CONFIG`) with the
//! following precedence: CLI arguments > Environment variables > Config file
//!
//! ## Configuration File Format
//!
//! ```toml
//! # ~/.nsshub/config.toml
//!
//! [engine]
//! # Scores above this read "High skill overlap"
//! high_overlap_threshold = 0.7
//! # Minimum Laplacian variance for proof photos
//! blur_threshold = 100.0
//! # Deadline for AI plan suggestions in milliseconds
//! plan_timeout_ms = 10000
//! # Skip AI planning entirely
//! offline = false
//!
//! [gemini]
//! api_key = "your-api-key"
//! model = "gemini-1.5-flash"
//! base_url = "https://generativelanguage.googleapis.com/v1beta/"
//! timeout_ms = 30000
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration structure.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub gemini: GeminiFileConfig,
}

/// Engine tunables.
#[derive(Debug, Default, Deserialize)]
pub struct EngineConfig {
    pub high_overlap_threshold: Option<f64>,
    pub blur_threshold: Option<f64>,
    pub plan_timeout_ms: Option<u64>,
    pub offline: Option<bool>,
}

/// Gemini connection settings.
#[derive(Default, Deserialize)]
pub struct GeminiFileConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
}

impl std::fmt::Debug for GeminiFileConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiFileConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

/// Reads `path`; a missing file is `Ok(None)`, a malformed one an error.
pub fn load_config_from(path: &Path) -> Result<Option<Config>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;

    tracing::debug!(
        target: "nsshub::config",
        path = %path.display(),
        "Loaded configuration file"
    );

    Ok(Some(config))
}

/// Loads the configuration file if it exists.
pub fn load_config() -> Result<Option<Config>> {
    match nsshub_state::config_file() {
        Some(path) => load_config_from(&path),
        None => Ok(None),
    }
}

/// Exports config file values for variables the environment leaves unset.
///
/// Must run before [`clap`] parsing so `env = ...` flags see file values.
/// An unreadable file is logged and skipped.
pub fn apply_config_to_env() {
    match load_config() {
        Ok(Some(config)) => apply_to_env(&config),
        Ok(None) => {}
        Err(e) => tracing::warn!(
            target: "nsshub::config",
            error = %e,
            "Ignoring unreadable configuration file"
        ),
    }
}

fn set_if_absent(key: &str, value: &str) {
    if std::env::var(key).is_err() {
        std::env::set_var(key, value);
        tracing::trace!(
            target: "nsshub::config",
            key,
            "Set environment variable from config file"
        );
    }
}

/// Applies a parsed configuration to environment variables.
pub fn apply_to_env(config: &Config) {
    let engine = &config.engine;
    if let Some(v) = engine.high_overlap_threshold {
        set_if_absent(nsshub_state::HIGH_OVERLAP_THRESHOLD_VAR, &v.to_string());
    }
    if let Some(v) = engine.blur_threshold {
        set_if_absent(nsshub_state::BLUR_THRESHOLD_VAR, &v.to_string());
    }
    if let Some(v) = engine.plan_timeout_ms {
        set_if_absent(nsshub_state::PLAN_TIMEOUT_VAR, &v.to_string());
    }
    if let Some(offline) = engine.offline {
        set_if_absent("NSSHUB_OFFLINE", if offline { "true" } else { "false" });
    }

    let gemini = &config.gemini;
    if let Some(ref key) = gemini.api_key {
        set_if_absent("NSSHUB_GEMINI_API_KEY", key);
    }
    if let Some(ref model) = gemini.model {
        set_if_absent("NSSHUB_GEMINI_MODEL", model);
    }
    if let Some(ref base) = gemini.base_url {
        set_if_absent("NSSHUB_GEMINI_BASE_URL", base);
    }
    if let Some(ms) = gemini.timeout_ms {
        set_if_absent("NSSHUB_GEMINI_TIMEOUT_MS", &ms.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsshub_test_utils::{set_env_var, TempHome};
    use serial_test::serial;

    #[test]
    fn parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.engine.blur_threshold.is_none());
        assert!(config.gemini.api_key.is_none());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [engine]
            high_overlap_threshold = 0.65
            blur_threshold = 80.0
            plan_timeout_ms = 2500
            offline = true

            [gemini]
            api_key = "secret"
            model = "gemini-pro"
            base_url = "http://localhost:8080/"
            timeout_ms = 1000
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.engine.high_overlap_threshold, Some(0.65));
        assert_eq!(config.engine.blur_threshold, Some(80.0));
        assert_eq!(config.engine.plan_timeout_ms, Some(2500));
        assert_eq!(config.engine.offline, Some(true));
        assert_eq!(config.gemini.api_key.as_deref(), Some("secret"));
        assert_eq!(config.gemini.model.as_deref(), Some("gemini-pro"));
        assert_eq!(config.gemini.timeout_ms, Some(1000));
    }

    #[test]
    fn debug_redacts_api_key() {
        let config: Config = toml::from_str("[gemini]\napi_key = \"secret\"").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn load_missing_file_returns_none() {
        let home = TempHome::new().unwrap();
        let result = load_config_from(&home.path().join("nope.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn load_invalid_file_is_error() {
        let home = TempHome::new().unwrap();
        let path = home.write_config("[engine\nblur").unwrap();
        assert!(load_config_from(&path).is_err());
    }

    #[test]
    #[serial]
    fn apply_config_respects_existing_env_vars() {
        let _blur = set_env_var(nsshub_state::BLUR_THRESHOLD_VAR, Some("55"));
        let _model = set_env_var("NSSHUB_GEMINI_MODEL", None);

        let config: Config = toml::from_str(
            r#"
            [engine]
            blur_threshold = 120.0
            [gemini]
            model = "from-file"
        "#,
        )
        .unwrap();
        apply_to_env(&config);

        assert_eq!(
            std::env::var(nsshub_state::BLUR_THRESHOLD_VAR).unwrap(),
            "55",
            "Config should not override existing env var"
        );
        assert_eq!(std::env::var("NSSHUB_GEMINI_MODEL").unwrap(), "from-file");
    }

    #[test]
    #[serial]
    fn apply_config_to_env_reads_nsshub_config() {
        let home = TempHome::new().unwrap();
        let path = home
            .write_config("[engine]\nplan_timeout_ms = 4321\n")
            .unwrap();
        let _cfg = set_env_var("NSSHUB_CONFIG", Some(path.to_str().unwrap()));
        let _timeout = set_env_var(nsshub_state::PLAN_TIMEOUT_VAR, None);

        apply_config_to_env();

        assert_eq!(
            std::env::var(nsshub_state::PLAN_TIMEOUT_VAR).unwrap(),
            "4321"
        );
    }
}
