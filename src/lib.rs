//! Settings and profile system for the par-logview log viewer.
//!
//! This crate provides persistent user settings for the log viewer. It
//! includes:
//!
//! - Typed configuration keys and values with schema validation
//! - Named profiles overriding the decoder-related subset of keys
//! - A server-supplied preset catalog fetched once at startup
//! - Reconciliation of locally edited profiles against newer server presets
//! - Regex-based profile auto-selection from a log file path
//! - Change notification for UI observers
//!
//! The usual construction sequence is one call:
//!
//! ```rust,no_run
//! use par_logview_config::{PresetSource, SettingsManager, SettingsStore};
//!
//! # fn main() -> Result<(), par_logview_config::SettingsError> {
//! let store = SettingsStore::for_app("par-logview");
//! let source = PresetSource::new("https://example.com/profile-presets.json");
//! let manager = SettingsManager::create(store, &source)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod preset;
pub mod profile;
pub mod settings;
pub mod types;

// Re-export main types for convenience
pub use error::{PresetFetchError, SettingsError};
pub use preset::{fetch_presets, parse_preset_catalog, PresetSource};
pub use profile::{
    now_millis, reconcile_profiles, FileSource, Profile, ProfileCatalog, ProfileName,
    DEFAULT_PROFILE_NAME,
};
pub use settings::{ListenerId, PersistedSettings, SettingsManager, SettingsStore};
pub use types::{
    ConfigKey, ConfigMap, ConfigUpdate, ConfigValue, TabName, ThemeName, EXPORT_LOGS_CHUNK_SIZE,
    MAX_PAGE_SIZE, QUERY_CHUNK_SIZE,
};
