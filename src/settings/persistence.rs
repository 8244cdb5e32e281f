//! Durable storage for the settings blob.
//!
//! [`SettingsStore`] reads and writes the single serialized
//! [`PersistedSettings`] JSON document. Every mutation rewrites the whole
//! blob; there is no partial write. Corrupt or unreadable state is treated
//! as absent so a bad blob can never prevent startup.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SettingsError;
use crate::profile::{validate_catalog, ProfileCatalog, ProfileName, DEFAULT_PROFILE_NAME};
use crate::types::ConfigUpdate;

/// The single unit of durable settings state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSettings {
    /// Name of the currently active profile.
    pub active_profile_name: ProfileName,

    /// Overrides for the keys that are not profile-managed.
    #[serde(default)]
    pub global_config: ConfigUpdate,

    /// The user's locally edited profiles. Preset profiles are never
    /// stored here.
    #[serde(default)]
    pub profile_configs: ProfileCatalog,

    /// When set, path-based profile auto-resolution is bypassed in favor
    /// of the active profile.
    #[serde(default)]
    pub is_forced: bool,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self {
            active_profile_name: DEFAULT_PROFILE_NAME.to_string(),
            global_config: ConfigUpdate::default(),
            profile_configs: ProfileCatalog::new(),
            is_forced: false,
        }
    }
}

impl PersistedSettings {
    /// Check the blob against the settings schema.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Validation`] describing the first violation.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.active_profile_name.is_empty() {
            return Err(SettingsError::Validation(
                "activeProfileName must be a non-empty string".to_string(),
            ));
        }
        self.global_config.validate()?;
        validate_catalog(&self.profile_configs)
    }
}

/// File-backed store for the settings blob.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// A store at the platform default location for `app_name`.
    pub fn for_app(app_name: &str) -> Self {
        let path = Self::default_path(app_name);
        log::info!("Settings path: {:?}", path);
        Self { path }
    }

    /// A store at an explicit path (tests, embedders).
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Settings file location for `app_name` (XDG convention).
    fn default_path(app_name: &str) -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join(app_name).join("settings.json")
            } else {
                PathBuf::from("settings.json")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // Use XDG convention on all platforms: ~/.config/<app>/settings.json
            if let Some(home_dir) = dirs::home_dir() {
                home_dir
                    .join(".config")
                    .join(app_name)
                    .join("settings.json")
            } else {
                // Fallback if home directory cannot be determined
                PathBuf::from("settings.json")
            }
        }
    }

    /// Load the stored blob, or `None` when it is absent or unusable.
    ///
    /// A missing file, an unreadable file, malformed JSON, and a blob that
    /// fails validation all degrade to `None` with a warning; the caller
    /// synthesizes defaults. Corrupt storage is never fatal.
    pub fn load(&self) -> Option<PersistedSettings> {
        if !self.path.exists() {
            return None;
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                log::warn!("failed to read settings file {:?}: {}", self.path, e);
                return None;
            }
        };

        let settings: PersistedSettings = match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!(
                    "settings file {:?} contains invalid JSON, falling back to defaults: {}",
                    self.path,
                    e
                );
                return None;
            }
        };

        if let Err(e) = settings.validate() {
            log::warn!(
                "settings file {:?} failed validation, falling back to defaults: {}",
                self.path,
                e
            );
            return None;
        }

        Some(settings)
    }

    /// Serialize and overwrite the stored blob.
    ///
    /// Atomic from a reader's point of view: the JSON is written to a temp
    /// file and renamed over the target, so another reader of the same path
    /// observes either the previous blob or the new one, never a torn write.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Io`] on filesystem failures,
    /// [`SettingsError::Serialize`] if the blob cannot be encoded.
    pub fn save(&self, settings: &PersistedSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(settings)?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &json)?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}
