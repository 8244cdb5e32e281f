//! Configuration keys, values, and the typed config maps.
//!
//! The key set is closed: every tunable the viewer exposes is a
//! [`ConfigKey`] variant with a fixed wire name. Keys partition into
//! profile-managed (the decoder options, looked up per profile) and
//! global-managed (looked up once, irrespective of profile); the partition
//! is compiled in via [`ConfigKey::is_profile_managed`].

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::SettingsError;

/// Upper bound for the `pageSize` key.
pub const MAX_PAGE_SIZE: u64 = 1_000_000;

/// Number of log events per chunk when exporting logs.
pub const EXPORT_LOGS_CHUNK_SIZE: u64 = 10_000;

/// Number of log events per chunk when running a query.
pub const QUERY_CHUNK_SIZE: u64 = 10_000;

// ============================================================================
// Keys
// ============================================================================

/// Identifier for a single tunable configuration value.
///
/// The set is fixed at compile time; serialized names double as the wire
/// names used in the persisted blob and the server preset catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigKey {
    /// Format string applied by the decoder when rendering log events.
    #[serde(rename = "decoderOptions/formatString")]
    DecoderFormatString,
    /// Field path the decoder reads the log level from.
    #[serde(rename = "decoderOptions/logLevelKey")]
    DecoderLogLevelKey,
    /// Display format for decoded timestamps.
    #[serde(rename = "decoderOptions/timestampFormatString")]
    DecoderTimestampFormatString,
    /// Field path the decoder reads the timestamp from.
    #[serde(rename = "decoderOptions/timestampKey")]
    DecoderTimestampKey,
    /// Sidebar tab opened when a file is loaded.
    #[serde(rename = "initialTabName")]
    InitialTabName,
    /// Color theme.
    #[serde(rename = "theme")]
    Theme,
    /// Number of log events per page.
    #[serde(rename = "pageSize")]
    PageSize,
}

impl ConfigKey {
    /// All keys, in declaration order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::DecoderFormatString,
            ConfigKey::DecoderLogLevelKey,
            ConfigKey::DecoderTimestampFormatString,
            ConfigKey::DecoderTimestampKey,
            ConfigKey::InitialTabName,
            ConfigKey::Theme,
            ConfigKey::PageSize,
        ]
    }

    /// The wire name of this key, as used in persisted and fetched JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::DecoderFormatString => "decoderOptions/formatString",
            ConfigKey::DecoderLogLevelKey => "decoderOptions/logLevelKey",
            ConfigKey::DecoderTimestampFormatString => "decoderOptions/timestampFormatString",
            ConfigKey::DecoderTimestampKey => "decoderOptions/timestampKey",
            ConfigKey::InitialTabName => "initialTabName",
            ConfigKey::Theme => "theme",
            ConfigKey::PageSize => "pageSize",
        }
    }

    /// Whether this key is looked up per profile rather than globally.
    ///
    /// Profile-managed keys live in a profile's override map; writes of all
    /// other keys always target the global override map.
    pub fn is_profile_managed(&self) -> bool {
        matches!(
            self,
            ConfigKey::DecoderFormatString
                | ConfigKey::DecoderLogLevelKey
                | ConfigKey::DecoderTimestampFormatString
                | ConfigKey::DecoderTimestampKey
        )
    }

    /// Validate `value` against this key's schema, coercing where safe.
    ///
    /// Coercions: numeric strings for `PageSize`, wire-name strings for
    /// `InitialTabName` and `Theme` (form inputs arrive as strings).
    /// Everything else must already carry the right variant.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Validation`] naming this key when the value
    /// has the wrong type, is out of range, or is an empty string where a
    /// non-empty one is required.
    pub fn validate_value(&self, value: ConfigValue) -> Result<ConfigValue, SettingsError> {
        match self {
            ConfigKey::DecoderFormatString => match value {
                ConfigValue::String(s) => Ok(ConfigValue::String(s)),
                other => Err(self.type_error("a string", &other)),
            },
            ConfigKey::DecoderLogLevelKey
            | ConfigKey::DecoderTimestampFormatString
            | ConfigKey::DecoderTimestampKey => match value {
                ConfigValue::String(s) if !s.is_empty() => Ok(ConfigValue::String(s)),
                ConfigValue::String(_) => Err(SettingsError::Validation(format!(
                    "config key '{}' requires a non-empty string",
                    self.as_str()
                ))),
                other => Err(self.type_error("a non-empty string", &other)),
            },
            ConfigKey::InitialTabName => match value {
                ConfigValue::Tab(t) => Ok(ConfigValue::Tab(t)),
                ConfigValue::String(s) => TabName::parse(&s).map(ConfigValue::Tab).ok_or_else(|| {
                    SettingsError::Validation(format!(
                        "config key '{}' expects one of {:?}, got '{}'",
                        self.as_str(),
                        TabName::all().iter().map(TabName::as_str).collect::<Vec<_>>(),
                        s
                    ))
                }),
                other => Err(self.type_error("a tab name", &other)),
            },
            ConfigKey::Theme => match value {
                ConfigValue::Theme(t) => Ok(ConfigValue::Theme(t)),
                ConfigValue::String(s) => {
                    ThemeName::parse(&s).map(ConfigValue::Theme).ok_or_else(|| {
                        SettingsError::Validation(format!(
                            "config key '{}' expects one of {:?}, got '{}'",
                            self.as_str(),
                            ThemeName::all().iter().map(ThemeName::as_str).collect::<Vec<_>>(),
                            s
                        ))
                    })
                }
                other => Err(self.type_error("a theme name", &other)),
            },
            ConfigKey::PageSize => {
                let n = match value {
                    ConfigValue::Integer(n) => n,
                    // Form inputs deliver numbers as strings; coerce when safe.
                    ConfigValue::String(s) => s.trim().parse::<u64>().map_err(|_| {
                        SettingsError::Validation(format!(
                            "config key '{}' expects an integer, got '{}'",
                            self.as_str(),
                            s
                        ))
                    })?,
                    other => return Err(self.type_error("an integer", &other)),
                };
                validate_page_size(n)?;
                Ok(ConfigValue::Integer(n))
            }
        }
    }

    fn type_error(&self, expected: &str, got: &ConfigValue) -> SettingsError {
        SettingsError::Validation(format!(
            "config key '{}' expects {expected}, got {} '{}'",
            self.as_str(),
            got.type_name(),
            got
        ))
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn validate_page_size(n: u64) -> Result<(), SettingsError> {
    if n < 1 || n > MAX_PAGE_SIZE {
        return Err(SettingsError::Validation(format!(
            "config key 'pageSize' must be in [1, {MAX_PAGE_SIZE}], got {n}"
        )));
    }
    Ok(())
}

// ============================================================================
// Enum-valued keys
// ============================================================================

/// Sidebar tab identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TabName {
    /// No tab open.
    None,
    /// File metadata panel.
    #[default]
    FileInfo,
    /// Search panel.
    Search,
    /// Settings panel.
    Settings,
}

impl TabName {
    /// All tabs, in display order.
    pub fn all() -> &'static [TabName] {
        &[
            TabName::None,
            TabName::FileInfo,
            TabName::Search,
            TabName::Settings,
        ]
    }

    /// The wire name of this tab.
    pub fn as_str(&self) -> &'static str {
        match self {
            TabName::None => "none",
            TabName::FileInfo => "fileInfo",
            TabName::Search => "search",
            TabName::Settings => "settings",
        }
    }

    /// Parse a wire name back into a tab, if it names one.
    pub fn parse(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.as_str() == name)
    }
}

/// Color theme identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Follow the OS preference.
    #[default]
    System,
    /// Always dark.
    Dark,
    /// Always light.
    Light,
}

impl ThemeName {
    /// All themes.
    pub fn all() -> &'static [ThemeName] {
        &[ThemeName::System, ThemeName::Dark, ThemeName::Light]
    }

    /// The wire name of this theme.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::System => "system",
            ThemeName::Dark => "dark",
            ThemeName::Light => "light",
        }
    }

    /// Parse a wire name back into a theme, if it names one.
    pub fn parse(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.as_str() == name)
    }
}

// ============================================================================
// Values
// ============================================================================

/// A single configuration value, the currency of
/// [`SettingsManager::get_config`](crate::SettingsManager::get_config) and
/// [`SettingsManager::set_config`](crate::SettingsManager::set_config).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    /// A string value (decoder format/key settings).
    String(String),
    /// An integer value (page size).
    Integer(u64),
    /// A sidebar tab.
    Tab(TabName),
    /// A color theme.
    Theme(ThemeName),
}

impl ConfigValue {
    /// Short name of the carried variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::String(_) => "string",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Tab(_) => "tab name",
            ConfigValue::Theme(_) => "theme name",
        }
    }

    /// The string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The integer payload, if this is an integer value.
    pub fn as_integer(&self) -> Option<u64> {
        match self {
            ConfigValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The tab payload, if this is a tab value.
    pub fn as_tab(&self) -> Option<TabName> {
        match self {
            ConfigValue::Tab(t) => Some(*t),
            _ => None,
        }
    }

    /// The theme payload, if this is a theme value.
    pub fn as_theme(&self) -> Option<ThemeName> {
        match self {
            ConfigValue::Theme(t) => Some(*t),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::String(s) => f.write_str(s),
            ConfigValue::Integer(n) => write!(f, "{n}"),
            ConfigValue::Tab(t) => f.write_str(t.as_str()),
            ConfigValue::Theme(t) => f.write_str(t.as_str()),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<u64> for ConfigValue {
    fn from(n: u64) -> Self {
        ConfigValue::Integer(n)
    }
}

impl From<TabName> for ConfigValue {
    fn from(t: TabName) -> Self {
        ConfigValue::Tab(t)
    }
}

impl From<ThemeName> for ConfigValue {
    fn from(t: ThemeName) -> Self {
        ConfigValue::Theme(t)
    }
}

// ============================================================================
// Config maps
// ============================================================================

/// The total configuration map: every key carries a value.
///
/// `Default` is the compiled-in default configuration, the final fallback of
/// the resolution chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigMap {
    /// Decoder format string; empty means the decoder's built-in layout.
    #[serde(rename = "decoderOptions/formatString")]
    pub decoder_format_string: String,
    /// Field path for the log level.
    #[serde(rename = "decoderOptions/logLevelKey")]
    pub decoder_log_level_key: String,
    /// Timestamp display format.
    #[serde(rename = "decoderOptions/timestampFormatString")]
    pub decoder_timestamp_format_string: String,
    /// Field path for the timestamp.
    #[serde(rename = "decoderOptions/timestampKey")]
    pub decoder_timestamp_key: String,
    /// Tab opened on file load.
    #[serde(rename = "initialTabName")]
    pub initial_tab_name: TabName,
    /// Color theme.
    pub theme: ThemeName,
    /// Log events per page.
    #[serde(rename = "pageSize")]
    pub page_size: u64,
}

impl Default for ConfigMap {
    fn default() -> Self {
        Self {
            decoder_format_string: String::new(),
            decoder_log_level_key: "log.level".to_string(),
            decoder_timestamp_format_string: "YYYY-MM-DDTHH:mm:ss.SSSZ".to_string(),
            decoder_timestamp_key: "timestamp".to_string(),
            initial_tab_name: TabName::FileInfo,
            theme: ThemeName::System,
            page_size: 10_000,
        }
    }
}

impl ConfigMap {
    /// Read the value stored for `key`.
    pub fn get(&self, key: ConfigKey) -> ConfigValue {
        match key {
            ConfigKey::DecoderFormatString => {
                ConfigValue::String(self.decoder_format_string.clone())
            }
            ConfigKey::DecoderLogLevelKey => {
                ConfigValue::String(self.decoder_log_level_key.clone())
            }
            ConfigKey::DecoderTimestampFormatString => {
                ConfigValue::String(self.decoder_timestamp_format_string.clone())
            }
            ConfigKey::DecoderTimestampKey => {
                ConfigValue::String(self.decoder_timestamp_key.clone())
            }
            ConfigKey::InitialTabName => ConfigValue::Tab(self.initial_tab_name),
            ConfigKey::Theme => ConfigValue::Theme(self.theme),
            ConfigKey::PageSize => ConfigValue::Integer(self.page_size),
        }
    }
}

/// A partial configuration map: overrides layered on top of defaults.
///
/// Absent fields are omitted from the serialized form entirely, so a stored
/// override map only names the keys it actually overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigUpdate {
    /// Decoder format string override.
    #[serde(
        rename = "decoderOptions/formatString",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub decoder_format_string: Option<String>,
    /// Log-level field path override.
    #[serde(
        rename = "decoderOptions/logLevelKey",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub decoder_log_level_key: Option<String>,
    /// Timestamp format override.
    #[serde(
        rename = "decoderOptions/timestampFormatString",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub decoder_timestamp_format_string: Option<String>,
    /// Timestamp field path override.
    #[serde(
        rename = "decoderOptions/timestampKey",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub decoder_timestamp_key: Option<String>,
    /// Initial tab override.
    #[serde(
        rename = "initialTabName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub initial_tab_name: Option<TabName>,
    /// Theme override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeName>,
    /// Page-size override. Accepts an integer or a numeric string on input.
    #[serde(
        rename = "pageSize",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_opt_page_size"
    )]
    pub page_size: Option<u64>,
}

impl ConfigUpdate {
    /// Read the override stored for `key`, if any.
    pub fn get(&self, key: ConfigKey) -> Option<ConfigValue> {
        match key {
            ConfigKey::DecoderFormatString => {
                self.decoder_format_string.clone().map(ConfigValue::String)
            }
            ConfigKey::DecoderLogLevelKey => {
                self.decoder_log_level_key.clone().map(ConfigValue::String)
            }
            ConfigKey::DecoderTimestampFormatString => self
                .decoder_timestamp_format_string
                .clone()
                .map(ConfigValue::String),
            ConfigKey::DecoderTimestampKey => {
                self.decoder_timestamp_key.clone().map(ConfigValue::String)
            }
            ConfigKey::InitialTabName => self.initial_tab_name.map(ConfigValue::Tab),
            ConfigKey::Theme => self.theme.map(ConfigValue::Theme),
            ConfigKey::PageSize => self.page_size.map(ConfigValue::Integer),
        }
    }

    /// Store `value` for `key`.
    ///
    /// `value` must already satisfy the key's schema (see
    /// [`ConfigKey::validate_value`]); the manager validates before calling.
    pub(crate) fn set(&mut self, key: ConfigKey, value: ConfigValue) {
        match (key, value) {
            (ConfigKey::DecoderFormatString, ConfigValue::String(s)) => {
                self.decoder_format_string = Some(s);
            }
            (ConfigKey::DecoderLogLevelKey, ConfigValue::String(s)) => {
                self.decoder_log_level_key = Some(s);
            }
            (ConfigKey::DecoderTimestampFormatString, ConfigValue::String(s)) => {
                self.decoder_timestamp_format_string = Some(s);
            }
            (ConfigKey::DecoderTimestampKey, ConfigValue::String(s)) => {
                self.decoder_timestamp_key = Some(s);
            }
            (ConfigKey::InitialTabName, ConfigValue::Tab(t)) => {
                self.initial_tab_name = Some(t);
            }
            (ConfigKey::Theme, ConfigValue::Theme(t)) => {
                self.theme = Some(t);
            }
            (ConfigKey::PageSize, ConfigValue::Integer(n)) => {
                self.page_size = Some(n);
            }
            (key, value) => unreachable!(
                "validated value '{value}' does not match key '{key}'; \
                 ConfigKey::validate_value must run first"
            ),
        }
    }

    /// True when no key is overridden.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check every present override against its key's schema.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Validation`] describing the first violation.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(s) = &self.decoder_log_level_key
            && s.is_empty()
        {
            return Err(SettingsError::Validation(
                "config key 'decoderOptions/logLevelKey' requires a non-empty string".to_string(),
            ));
        }
        if let Some(s) = &self.decoder_timestamp_format_string
            && s.is_empty()
        {
            return Err(SettingsError::Validation(
                "config key 'decoderOptions/timestampFormatString' requires a non-empty string"
                    .to_string(),
            ));
        }
        if let Some(s) = &self.decoder_timestamp_key
            && s.is_empty()
        {
            return Err(SettingsError::Validation(
                "config key 'decoderOptions/timestampKey' requires a non-empty string".to_string(),
            ));
        }
        if let Some(n) = self.page_size {
            validate_page_size(n)?;
        }
        Ok(())
    }
}

/// Accept `"pageSize": 500` and `"pageSize": "500"` alike; form inputs and
/// hand-edited blobs deliver numbers as strings.
fn de_opt_page_size<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrString {
        Int(u64),
        Str(String),
    }

    match Option::<IntOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IntOrString::Int(n)) => Ok(Some(n)),
        Some(IntOrString::Str(s)) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("pageSize is not an integer: '{s}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiled_in_defaults() {
        let defaults = ConfigMap::default();

        assert_eq!(defaults.decoder_format_string, "");
        assert_eq!(defaults.decoder_log_level_key, "log.level");
        assert_eq!(
            defaults.decoder_timestamp_format_string,
            "YYYY-MM-DDTHH:mm:ss.SSSZ"
        );
        assert_eq!(defaults.decoder_timestamp_key, "timestamp");
        assert_eq!(defaults.initial_tab_name, TabName::FileInfo);
        assert_eq!(defaults.theme, ThemeName::System);
        assert_eq!(defaults.page_size, 10_000);
    }

    #[test]
    fn test_key_partition() {
        let profile_managed: Vec<_> = ConfigKey::all()
            .iter()
            .filter(|k| k.is_profile_managed())
            .collect();
        assert_eq!(
            profile_managed,
            vec![
                &ConfigKey::DecoderFormatString,
                &ConfigKey::DecoderLogLevelKey,
                &ConfigKey::DecoderTimestampFormatString,
                &ConfigKey::DecoderTimestampKey,
            ]
        );
        assert!(!ConfigKey::InitialTabName.is_profile_managed());
        assert!(!ConfigKey::Theme.is_profile_managed());
        assert!(!ConfigKey::PageSize.is_profile_managed());
    }

    #[test]
    fn test_config_update_wire_names() {
        let update = ConfigUpdate {
            decoder_format_string: Some("{message}".to_string()),
            page_size: Some(500),
            theme: Some(ThemeName::Dark),
            ..Default::default()
        };

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["decoderOptions/formatString"], "{message}");
        assert_eq!(json["pageSize"], 500);
        assert_eq!(json["theme"], "dark");
        // Absent overrides are omitted entirely.
        assert!(json.get("decoderOptions/logLevelKey").is_none());
    }

    #[test]
    fn test_page_size_accepts_numeric_string() {
        let update: ConfigUpdate = serde_json::from_str(r#"{"pageSize": "2500"}"#).unwrap();
        assert_eq!(update.page_size, Some(2500));

        let update: ConfigUpdate = serde_json::from_str(r#"{"pageSize": 2500}"#).unwrap();
        assert_eq!(update.page_size, Some(2500));

        assert!(serde_json::from_str::<ConfigUpdate>(r#"{"pageSize": "lots"}"#).is_err());
    }

    #[test]
    fn test_validate_value_bounds_and_coercion() {
        let key = ConfigKey::PageSize;
        assert_eq!(
            key.validate_value(ConfigValue::Integer(1)).unwrap(),
            ConfigValue::Integer(1)
        );
        assert_eq!(
            key.validate_value(ConfigValue::String("42".to_string()))
                .unwrap(),
            ConfigValue::Integer(42)
        );
        assert!(key.validate_value(ConfigValue::Integer(0)).is_err());
        assert!(
            key.validate_value(ConfigValue::Integer(MAX_PAGE_SIZE + 1))
                .is_err()
        );
        assert!(
            key.validate_value(ConfigValue::String("ten".to_string()))
                .is_err()
        );
    }

    #[test]
    fn test_validate_value_non_empty_strings() {
        assert!(
            ConfigKey::DecoderLogLevelKey
                .validate_value(ConfigValue::String(String::new()))
                .is_err()
        );
        // The format string is the one decoder key that may be empty.
        assert!(
            ConfigKey::DecoderFormatString
                .validate_value(ConfigValue::String(String::new()))
                .is_ok()
        );
    }

    #[test]
    fn test_validate_value_enum_coercion() {
        assert_eq!(
            ConfigKey::Theme
                .validate_value(ConfigValue::String("dark".to_string()))
                .unwrap(),
            ConfigValue::Theme(ThemeName::Dark)
        );
        assert!(
            ConfigKey::Theme
                .validate_value(ConfigValue::String("solarized".to_string()))
                .is_err()
        );
        assert_eq!(
            ConfigKey::InitialTabName
                .validate_value(ConfigValue::String("search".to_string()))
                .unwrap(),
            ConfigValue::Tab(TabName::Search)
        );
    }

    #[test]
    fn test_enum_wire_names_roundtrip() {
        for tab in TabName::all() {
            let json = serde_json::to_string(tab).unwrap();
            assert_eq!(json, format!("\"{}\"", tab.as_str()));
            assert_eq!(TabName::parse(tab.as_str()), Some(*tab));
        }
        for theme in ThemeName::all() {
            let json = serde_json::to_string(theme).unwrap();
            assert_eq!(json, format!("\"{}\"", theme.as_str()));
            assert_eq!(ThemeName::parse(theme.as_str()), Some(*theme));
        }
    }

    #[test]
    fn test_config_update_get_set_roundtrip() {
        let mut update = ConfigUpdate::default();
        assert!(update.is_empty());
        assert_eq!(update.get(ConfigKey::PageSize), None);

        update.set(ConfigKey::PageSize, ConfigValue::Integer(100));
        update.set(
            ConfigKey::DecoderTimestampKey,
            ConfigValue::String("ts".to_string()),
        );

        assert!(!update.is_empty());
        assert_eq!(
            update.get(ConfigKey::PageSize),
            Some(ConfigValue::Integer(100))
        );
        assert_eq!(
            update.get(ConfigKey::DecoderTimestampKey),
            Some(ConfigValue::String("ts".to_string()))
        );
    }
}
