//! The settings manager: merged runtime state, the key-resolution chain,
//! profile operations, and change notification.
//!
//! One manager instance owns the persisted settings and the preset catalog
//! for the whole application; construct it once and thread it to every
//! consumer. All mutating operations take `&mut self`, so the borrow
//! checker serializes them — there is no internal locking.

use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;

use crate::error::SettingsError;
use crate::preset::{fetch_presets, PresetSource};
use crate::profile::{
    reconcile_profiles, FileSource, Profile, ProfileCatalog, ProfileName, DEFAULT_PROFILE_NAME,
};
use crate::settings::persistence::{PersistedSettings, SettingsStore};
use crate::types::{ConfigKey, ConfigMap, ConfigValue};

/// Handle returned by [`SettingsManager::subscribe`]; pass it to
/// [`SettingsManager::unsubscribe`] to deregister.
pub type ListenerId = u64;

type Listener = Box<dyn Fn() + Send>;

/// Owns the merged settings state and notifies observers of changes.
///
/// Reads resolve a key through an ordered chain:
/// local profile override (profile-managed keys) or global override
/// (global keys) → preset entry for the resolved profile → preset entry
/// for the default profile → compiled-in default. The chain is total:
/// every key resolves to some value.
pub struct SettingsManager {
    store: SettingsStore,
    settings: PersistedSettings,
    presets: ProfileCatalog,
    defaults: ConfigMap,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: ListenerId,
}

impl SettingsManager {
    /// Construct the manager for `store`, fetching the preset catalog from
    /// `source`.
    ///
    /// Loads the persisted blob (synthesizing defaults when it is absent or
    /// corrupt), fetches and validates the preset catalog, prunes local
    /// profiles superseded by newer presets, and persists the pruned state.
    /// This is the one operation that touches the network.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::PresetFetchError`] (fatal at startup: without a
    /// catalog the preset layers of the resolution chain are undefined) and
    /// store save failures.
    pub fn create(store: SettingsStore, source: &PresetSource) -> Result<Self, SettingsError> {
        let settings = store.load().unwrap_or_default();
        let presets = fetch_presets(source)?;
        Self::with_parts(store, settings, presets)
    }

    /// Construct from an already-fetched preset catalog.
    ///
    /// Runs the same reconciliation and initial save as [`Self::create`];
    /// for callers that fetch the catalog themselves or run without a
    /// preset server (empty catalog).
    ///
    /// # Errors
    ///
    /// Returns an error when the pruned state cannot be persisted.
    pub fn with_parts(
        store: SettingsStore,
        mut settings: PersistedSettings,
        presets: ProfileCatalog,
    ) -> Result<Self, SettingsError> {
        settings.profile_configs =
            reconcile_profiles(std::mem::take(&mut settings.profile_configs), &presets);
        store.save(&settings)?;

        Ok(Self {
            store,
            settings,
            presets,
            defaults: ConfigMap::default(),
            listeners: Vec::new(),
            next_listener_id: 0,
        })
    }

    // ------------------------------------------------------------------
    // Subscription
    // ------------------------------------------------------------------

    /// Register a callback invoked synchronously after every successful
    /// mutating operation, in subscription order.
    pub fn subscribe(&mut self, listener: impl Fn() + Send + 'static) -> ListenerId {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Deregister a listener. Returns `false` when `id` was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Persist the current state and fan out to listeners.
    ///
    /// Every successful mutation funnels through here, so observers see
    /// exactly one notification per operation, after the state is durable.
    fn flush(&mut self) -> Result<(), SettingsError> {
        self.store.save(&self.settings)?;
        for (_, listener) in &self.listeners {
            listener();
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Profiles
    // ------------------------------------------------------------------

    /// Names of every known profile: the union of local and preset
    /// catalogs, plus the reserved default name. Sorted.
    pub fn profile_names(&self) -> Vec<ProfileName> {
        let mut names: BTreeSet<&str> = BTreeSet::new();
        names.insert(DEFAULT_PROFILE_NAME);
        names.extend(self.settings.profile_configs.keys().map(String::as_str));
        names.extend(self.presets.keys().map(String::as_str));
        names.into_iter().map(String::from).collect()
    }

    /// True iff a local (user-edited) entry exists for `name`.
    pub fn is_profile_modified(&self, name: &str) -> bool {
        self.settings.profile_configs.contains_key(name)
    }

    /// The currently active profile name.
    pub fn active_profile_name(&self) -> &str {
        &self.settings.active_profile_name
    }

    /// Switch the active profile.
    ///
    /// Any string is accepted — a name with no catalog entry still resolves
    /// through the default-profile fallbacks on read.
    ///
    /// # Errors
    ///
    /// Returns an error when the new state cannot be persisted.
    pub fn set_active_profile_name(
        &mut self,
        name: impl Into<ProfileName>,
    ) -> Result<(), SettingsError> {
        self.settings.active_profile_name = name.into();
        self.flush()
    }

    /// Create (or reset) a local profile named `name`.
    ///
    /// Inserts a fresh entry with empty overrides and a current timestamp,
    /// overwriting any existing local entry of that name.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Validation`] for an empty name; store errors on
    /// persist.
    pub fn create_profile(&mut self, name: &str) -> Result<(), SettingsError> {
        self.insert_local_profile(name)?;
        self.flush()
    }

    /// Delete the local entry for `name`.
    ///
    /// When `name` was the active profile and no preset of that name
    /// exists, the active profile reverts to the default name. The preset
    /// catalog is untouched: removing a modified preset profile reverts it
    /// to the server's version rather than deleting it.
    ///
    /// # Errors
    ///
    /// Returns an error when the new state cannot be persisted.
    pub fn remove_profile(&mut self, name: &str) -> Result<(), SettingsError> {
        self.settings.profile_configs.remove(name);
        if self.settings.active_profile_name == name && !self.presets.contains_key(name) {
            self.settings.active_profile_name = DEFAULT_PROFILE_NAME.to_string();
        }
        self.flush()
    }

    /// Validate `name` and insert a fresh local profile under it.
    ///
    /// Shared by [`Self::create_profile`] and the auto-create path of
    /// [`Self::set_config`]; does not persist or notify.
    fn insert_local_profile(&mut self, name: &str) -> Result<(), SettingsError> {
        if name.is_empty() {
            return Err(SettingsError::Validation(
                "profile name must be a non-empty string".to_string(),
            ));
        }
        self.settings
            .profile_configs
            .insert(name.to_string(), Profile::new());
        Ok(())
    }

    // ------------------------------------------------------------------
    // Config values
    // ------------------------------------------------------------------

    /// Resolve the value for `key`, using `profile_name` when supplied and
    /// the active profile otherwise.
    ///
    /// Total: always returns a value satisfying the key's schema, falling
    /// back to the compiled-in default when no layer overrides it.
    pub fn get_config(&self, key: ConfigKey, profile_name: Option<&str>) -> ConfigValue {
        let profile = profile_name.unwrap_or(&self.settings.active_profile_name);

        self.local_override(key, profile)
            .or_else(|| self.preset_override(key, profile))
            .or_else(|| self.preset_override(key, DEFAULT_PROFILE_NAME))
            .unwrap_or_else(|| self.defaults.get(key))
    }

    /// First link of the chain: the user's own override for `key`.
    fn local_override(&self, key: ConfigKey, profile: &str) -> Option<ConfigValue> {
        if key.is_profile_managed() {
            self.settings
                .profile_configs
                .get(profile)
                .and_then(|p| p.config.get(key))
        } else {
            self.settings.global_config.get(key)
        }
    }

    /// Preset-catalog override for `key` in `profile`, if any.
    fn preset_override(&self, key: ConfigKey, profile: &str) -> Option<ConfigValue> {
        self.presets.get(profile).and_then(|p| p.config.get(key))
    }

    /// Validate `value` and store it for `key`.
    ///
    /// Profile-managed keys write into the resolved profile's local entry,
    /// auto-creating it (same path as [`Self::create_profile`]) when the
    /// user had not modified that profile yet, and refresh its modification
    /// timestamp. Global keys write the global override map. Persists and
    /// notifies exactly once on success; on validation failure no state is
    /// touched.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Validation`] naming the offending key; store errors
    /// on persist.
    pub fn set_config(
        &mut self,
        key: ConfigKey,
        value: impl Into<ConfigValue>,
        profile_name: Option<&str>,
    ) -> Result<(), SettingsError> {
        let value = key.validate_value(value.into())?;

        if key.is_profile_managed() {
            let name = profile_name
                .unwrap_or(&self.settings.active_profile_name)
                .to_string();
            if !self.settings.profile_configs.contains_key(&name) {
                self.insert_local_profile(&name)?;
            }
            let profile = self
                .settings
                .profile_configs
                .get_mut(&name)
                .expect("local profile exists after insert");
            profile.config.set(key, value);
            profile.touch();
        } else {
            self.settings.global_config.set(key, value);
        }

        self.flush()
    }

    // ------------------------------------------------------------------
    // Forced mode
    // ------------------------------------------------------------------

    /// Whether path-based auto-resolution is bypassed.
    pub fn is_forced(&self) -> bool {
        self.settings.is_forced
    }

    /// Toggle forced mode; persists and notifies.
    ///
    /// # Errors
    ///
    /// Returns an error when the new state cannot be persisted.
    pub fn set_is_forced(&mut self, is_forced: bool) -> Result<(), SettingsError> {
        self.settings.is_forced = is_forced;
        self.flush()
    }

    // ------------------------------------------------------------------
    // Auto-resolution
    // ------------------------------------------------------------------

    /// Determine which profile should handle `file_src`.
    ///
    /// Forced mode short-circuits to the active profile. Non-path sources
    /// resolve to the default profile. Otherwise every preset profile's
    /// patterns are scanned in catalog (lexicographic) order; the first
    /// matching profile wins, with a diagnostic when several match —
    /// catalog authors are not required to keep patterns disjoint. Zero
    /// matches resolve to the default profile.
    ///
    /// A pattern that fails to compile is skipped with a warning: presets
    /// are untrusted input and one bad pattern must not poison resolution.
    pub fn resolve_profile_name(&self, file_src: &FileSource) -> ProfileName {
        if self.is_forced() {
            return self.settings.active_profile_name.clone();
        }
        let Some(path) = file_src.path() else {
            return DEFAULT_PROFILE_NAME.to_string();
        };

        let mut matched: Vec<&str> = Vec::new();
        for (name, profile) in &self.presets {
            for pattern in &profile.file_path_patterns {
                match Regex::new(pattern) {
                    Ok(re) => {
                        if re.is_match(path) {
                            matched.push(name);
                            break;
                        }
                    }
                    Err(e) => {
                        log::warn!(
                            "ignoring invalid file path pattern '{}' in preset profile '{}': {}",
                            pattern,
                            name,
                            e
                        );
                    }
                }
            }
        }

        match matched.as_slice() {
            [] => DEFAULT_PROFILE_NAME.to_string(),
            [only] => (*only).to_string(),
            [first, ..] => {
                log::warn!(
                    "multiple preset profiles match '{}': {:?}; using '{}'",
                    path,
                    matched,
                    first
                );
                (*first).to_string()
            }
        }
    }
}

impl fmt::Debug for SettingsManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsManager")
            .field("store", &self.store)
            .field("settings", &self.settings)
            .field("presets", &self.presets)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
