//! End-to-end tests for the settings manager through the public API:
//! construction against a store and preset catalog, persistence across
//! instances, reconciliation at startup, and corrupt-storage recovery.

use par_logview_config::{
    parse_preset_catalog, ConfigKey, ConfigValue, PersistedSettings, Profile, ProfileCatalog,
    SettingsManager, SettingsStore, DEFAULT_PROFILE_NAME,
};

const PRESET_URL: &str = "https://example.com/profile-presets.json";

/// Build the preset catalog exactly the way the fetcher does, minus the
/// network: parse and validate a JSON document.
fn catalog_from_json(body: &str) -> ProfileCatalog {
    parse_preset_catalog(PRESET_URL, body).expect("test catalog is valid")
}

fn store_in(dir: &tempfile::TempDir) -> SettingsStore {
    SettingsStore::at_path(dir.path().join("settings.json"))
}

/// Offline equivalent of `SettingsManager::create`: load-or-default, then
/// construct with an already-parsed catalog.
fn open_manager(store: SettingsStore, presets: ProfileCatalog) -> SettingsManager {
    let settings = store.load().unwrap_or_default();
    SettingsManager::with_parts(store, settings, presets).expect("construction succeeds")
}

/// Test that a corrupt stored blob falls back to the compiled-in defaults
/// instead of failing construction.
#[test]
fn test_corrupt_storage_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), "}{ not json at all").unwrap();

    let manager = open_manager(store, ProfileCatalog::new());

    assert_eq!(manager.active_profile_name(), DEFAULT_PROFILE_NAME);
    assert!(!manager.is_forced());
    assert_eq!(
        manager.get_config(ConfigKey::PageSize, None),
        ConfigValue::Integer(10_000)
    );
}

/// Test that mutations survive a restart: a second manager over the same
/// store sees the first manager's writes.
#[test]
fn test_state_survives_reconstruction() {
    let dir = tempfile::tempdir().unwrap();
    let presets = catalog_from_json(r#"{"srv": {"lastModifiedAtMillis": 1}}"#);

    {
        let mut manager = open_manager(store_in(&dir), presets.clone());
        manager
            .set_config(ConfigKey::DecoderLogLevelKey, "lvl", Some("mine"))
            .unwrap();
        manager.set_config(ConfigKey::PageSize, 777u64, None).unwrap();
        manager.set_active_profile_name("mine").unwrap();
        manager.set_is_forced(true).unwrap();
    }

    let manager = open_manager(store_in(&dir), presets);
    assert_eq!(manager.active_profile_name(), "mine");
    assert!(manager.is_forced());
    assert!(manager.is_profile_modified("mine"));
    assert_eq!(
        manager.get_config(ConfigKey::DecoderLogLevelKey, None),
        ConfigValue::String("lvl".to_string())
    );
    assert_eq!(
        manager.get_config(ConfigKey::PageSize, None),
        ConfigValue::Integer(777)
    );
}

/// Test that construction prunes a local profile that a newer same-named
/// preset supersedes, and persists the pruned state.
#[test]
fn test_construction_prunes_stale_local_profiles() {
    let dir = tempfile::tempdir().unwrap();

    let mut stale = Profile::default();
    stale.last_modified_at_millis = 100;
    let mut fresh = Profile::default();
    fresh.last_modified_at_millis = 9_000;

    let mut settings = PersistedSettings::default();
    settings.profile_configs.insert("stale".to_string(), stale);
    settings.profile_configs.insert("fresh".to_string(), fresh);
    store_in(&dir).save(&settings).unwrap();

    let presets = catalog_from_json(
        r#"{
            "stale": {"lastModifiedAtMillis": 5000},
            "fresh": {"lastModifiedAtMillis": 5000}
        }"#,
    );
    let manager = open_manager(store_in(&dir), presets);

    assert!(!manager.is_profile_modified("stale"));
    assert!(manager.is_profile_modified("fresh"));

    // The pruning is durable, not just in-memory.
    let reloaded = store_in(&dir).load().unwrap();
    assert!(!reloaded.profile_configs.contains_key("stale"));
    assert!(reloaded.profile_configs.contains_key("fresh"));
}

/// Test that preset values flow through resolution and that user overrides
/// shadow them per key, not wholesale.
#[test]
fn test_preset_values_resolve_and_shadow() {
    let dir = tempfile::tempdir().unwrap();
    let presets = catalog_from_json(
        r#"{
            "default": {
                "config": {"pageSize": 20000},
                "lastModifiedAtMillis": 1
            },
            "apache": {
                "config": {
                    "decoderOptions/timestampKey": "@timestamp",
                    "decoderOptions/logLevelKey": "severity"
                },
                "lastModifiedAtMillis": 1
            }
        }"#,
    );
    let mut manager = open_manager(store_in(&dir), presets);
    manager.set_active_profile_name("apache").unwrap();

    // Profile-managed keys come from the apache preset.
    assert_eq!(
        manager.get_config(ConfigKey::DecoderTimestampKey, None),
        ConfigValue::String("@timestamp".to_string())
    );
    // A global key falls through to the default-profile preset.
    assert_eq!(
        manager.get_config(ConfigKey::PageSize, None),
        ConfigValue::Integer(20_000)
    );

    // Overriding one key leaves the other preset values visible.
    manager
        .set_config(ConfigKey::DecoderTimestampKey, "time", None)
        .unwrap();
    assert_eq!(
        manager.get_config(ConfigKey::DecoderTimestampKey, None),
        ConfigValue::String("time".to_string())
    );
    assert_eq!(
        manager.get_config(ConfigKey::DecoderLogLevelKey, None),
        ConfigValue::String("severity".to_string())
    );
}

/// Test the documented numeric-string coercion at the set_config boundary.
#[test]
fn test_set_config_coerces_numeric_string() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = open_manager(store_in(&dir), ProfileCatalog::new());

    manager.set_config(ConfigKey::PageSize, "123", None).unwrap();
    assert_eq!(
        manager.get_config(ConfigKey::PageSize, None),
        ConfigValue::Integer(123)
    );

    let err = manager
        .set_config(ConfigKey::PageSize, "0", None)
        .unwrap_err();
    assert!(err.to_string().contains("pageSize"));
}

/// Test that the persisted blob uses the documented wire names, so external
/// tooling (and older deployments) can read it.
#[test]
fn test_persisted_blob_wire_format() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = open_manager(store_in(&dir), ProfileCatalog::new());

    manager
        .set_config(ConfigKey::DecoderFormatString, "{msg}", Some("p"))
        .unwrap();
    manager.set_config(ConfigKey::PageSize, 42u64, None).unwrap();

    let raw = std::fs::read_to_string(store_in(&dir).path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(json["activeProfileName"], "default");
    assert_eq!(json["globalConfig"]["pageSize"], 42);
    assert_eq!(
        json["profileConfigs"]["p"]["config"]["decoderOptions/formatString"],
        "{msg}"
    );
    assert!(json["profileConfigs"]["p"]["lastModifiedAtMillis"].is_i64());
}
