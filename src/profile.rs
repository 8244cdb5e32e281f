//! Profile types, the profile catalog, and catalog reconciliation.
//!
//! A profile is a named bundle of decoder-option overrides plus the
//! file-path patterns used for auto-selection. Two catalogs exist at
//! runtime: the server-authored preset catalog and the user's own local
//! catalog; they are never merged, and [`reconcile_profiles`] prunes local
//! entries superseded by a newer same-named preset.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::SettingsError;
use crate::types::ConfigUpdate;

/// The reserved profile name that always resolves, even absent an entry.
///
/// It cannot be deleted and is the fallback target whenever resolution
/// finds nothing better.
pub const DEFAULT_PROFILE_NAME: &str = "default";

/// A profile's name; unique within a catalog and used purely as a lookup key.
pub type ProfileName = String;

/// A catalog of profiles keyed by name.
///
/// `BTreeMap` makes iteration order explicit (lexicographic by name), so
/// multi-match auto-resolution is deterministic rather than dependent on
/// incidental hash ordering.
pub type ProfileCatalog = BTreeMap<ProfileName, Profile>;

/// A named bundle of configuration overrides with auto-selection patterns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Overrides for the profile-managed subset of keys.
    #[serde(default)]
    pub config: ConfigUpdate,

    /// Regular expressions matched against a file path to auto-select this
    /// profile. Ordered; any single match selects the profile.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_path_patterns: Vec<String>,

    /// Milliseconds since the epoch of the last mutation of `config`.
    /// The sole tie-break input for reconciliation.
    #[serde(default)]
    pub last_modified_at_millis: i64,
}

impl Profile {
    /// Create an empty profile stamped with the current time.
    pub fn new() -> Self {
        Self {
            config: ConfigUpdate::default(),
            file_path_patterns: Vec::new(),
            last_modified_at_millis: now_millis(),
        }
    }

    /// Refresh the modification timestamp to the current time.
    pub fn touch(&mut self) {
        self.last_modified_at_millis = now_millis();
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Check a catalog (from storage or from the preset server) against the
/// profile schema.
///
/// # Errors
///
/// Returns [`SettingsError::Validation`] for an empty profile name or an
/// override map violating a key's constraints.
pub fn validate_catalog(catalog: &ProfileCatalog) -> Result<(), SettingsError> {
    for (name, profile) in catalog {
        if name.is_empty() {
            return Err(SettingsError::Validation(
                "profile name must be a non-empty string".to_string(),
            ));
        }
        profile.config.validate().map_err(|e| {
            SettingsError::Validation(format!("profile '{name}' is invalid: {e}"))
        })?;
    }
    Ok(())
}

/// Prune local profiles that a newer same-named preset supersedes.
///
/// A local profile survives iff no preset of the same name exists, or its
/// own timestamp is strictly greater than the preset's. An equal timestamp
/// discards the local copy: the server's view wins and the user can
/// re-create the profile if still wanted. Profiles absent from the preset
/// catalog are always kept.
pub fn reconcile_profiles(local: ProfileCatalog, presets: &ProfileCatalog) -> ProfileCatalog {
    local
        .into_iter()
        .filter(|(name, profile)| match presets.get(name) {
            Some(preset) if preset.last_modified_at_millis >= profile.last_modified_at_millis => {
                log::info!(
                    "dropping local profile '{}': superseded by a server preset ({} >= {})",
                    name,
                    preset.last_modified_at_millis,
                    profile.last_modified_at_millis
                );
                false
            }
            _ => true,
        })
        .collect()
}

/// Identifies the log input a profile is being resolved for.
///
/// Auto-resolution only applies to path-like sources; an in-memory buffer
/// has no path to match patterns against.
#[derive(Debug, Clone)]
pub enum FileSource {
    /// A path or URL string naming the log file.
    Path(String),
    /// Raw log bytes with no associated path.
    Buffer(Vec<u8>),
}

impl FileSource {
    /// The path string, if this source has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            FileSource::Path(p) => Some(p),
            FileSource::Buffer(_) => None,
        }
    }
}
