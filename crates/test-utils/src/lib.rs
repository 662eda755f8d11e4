//! Shared test utilities for nsshub crates.
//!
//! This crate provides env-var guards, temporary home directories, and
//! in-memory image fixtures used across the workspace's tests.

pub mod images;

use std::path::PathBuf;
use std::sync::{LazyLock, Mutex, MutexGuard};

/// Serialize tests that mutate process-global state (env vars, cwd, etc).
///
/// Acquire this guard at the start of any test that modifies environment
/// variables to prevent race conditions between parallel tests.
pub fn env_guard() -> MutexGuard<'static, ()> {
    static TEST_SERIAL: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// RAII guard for environment variables - restores original value on drop.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        if let Some(v) = &self.previous {
            std::env::set_var(self.key, v);
        } else {
            std::env::remove_var(self.key);
        }
    }
}

/// Set an environment variable and return a guard that restores the original on drop.
///
/// # Example
/// ```
/// let _guard = nsshub_test_utils::set_env_var("MY_VAR", Some("value"));
/// // MY_VAR is "value" until _guard drops
/// ```
pub fn set_env_var(key: &'static str, value: Option<&str>) -> EnvVarGuard {
    let previous = std::env::var(key).ok();
    if let Some(val) = value {
        std::env::set_var(key, val);
    } else {
        std::env::remove_var(key);
    }
    EnvVarGuard { key, previous }
}

/// A temporary home directory with `~/.nsshub` already created.
///
/// Does NOT set HOME; pair with [`set_env_var`] when code reads it.
pub struct TempHome {
    pub tempdir: tempfile::TempDir,
    /// Path to `~/.nsshub` inside the temp home.
    pub config_dir: PathBuf,
}

impl TempHome {
    pub fn new() -> std::io::Result<Self> {
        let tempdir = tempfile::tempdir()?;
        let config_dir = tempdir.path().join(".nsshub");
        std::fs::create_dir_all(&config_dir)?;
        Ok(Self {
            tempdir,
            config_dir,
        })
    }

    /// Write `~/.nsshub/config.toml` and return its path.
    pub fn write_config(&self, content: &str) -> std::io::Result<PathBuf> {
        let path = self.config_dir.join("config.toml");
        std::fs::write(&path, content)?;
        Ok(path)
    }

    pub fn path(&self) -> &std::path::Path {
        self.tempdir.path()
    }
}
