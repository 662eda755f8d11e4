//! Manages application state and configuration.
//!
//! This crate provides utilities for:
//! - Reading engine settings from environment variables.
//! - The owned, in-memory service store (volunteers, activities, hours).
//! - Persisting accepted proof fingerprints between CLI runs.

pub mod env;
pub mod persistence;
pub mod store;

pub use env::{
    config_dir, config_file, env_offline, home_dir, EngineSettings, BLUR_THRESHOLD_VAR,
    HIGH_OVERLAP_THRESHOLD_VAR, PLAN_TIMEOUT_VAR,
};
pub use persistence::{fingerprint_ledger_file, load_fingerprints, save_fingerprints};
pub use store::{
    ActivityRecord, ActivityStatus, NewActivity, NewVolunteer, ServiceStats, ServiceStore,
    StoreError, VolunteerRecord,
};
