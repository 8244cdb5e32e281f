//! Fetching the server preset catalog.
//!
//! One GET of a JSON profile-catalog document at startup, with:
//! - HTTPS-only policy (HTTP requires explicit opt-in)
//! - Configurable timeout and response size limit
//! - Schema validation of the decoded catalog
//!
//! No retry is performed here; a caller wanting resilience wraps
//! [`fetch_presets`] itself.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::PresetFetchError;
use crate::profile::{validate_catalog, ProfileCatalog};

// ── Serde default helpers ──────────────────────────────────────────────

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_max_size_bytes() -> u64 {
    1_048_576
}

/// Where and how to fetch the preset catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PresetSource {
    /// URL of the JSON profile-catalog document.
    pub url: String,

    /// Timeout for the HTTP fetch request, in seconds (default: 10).
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Maximum allowed response size in bytes (default: 1 MB).
    #[serde(default = "default_max_size_bytes")]
    pub max_size_bytes: u64,

    /// Allow fetching over plain HTTP. Off by default: preset data decides
    /// decoder behavior and page sizes, and an unauthenticated channel lets
    /// a network attacker rewrite it.
    #[serde(default)]
    pub allow_http: bool,
}

impl PresetSource {
    /// A source for `url` with default timeout and size limit.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            max_size_bytes: default_max_size_bytes(),
            allow_http: false,
        }
    }
}

impl Default for PresetSource {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// Fetch and validate the preset catalog from `source`.
///
/// # Errors
///
/// [`PresetFetchError`] distinguishing URL policy violations, transport
/// failures, JSON parse failures, and schema validation failures.
pub fn fetch_presets(source: &PresetSource) -> Result<ProfileCatalog, PresetFetchError> {
    use ureq::tls::{RootCerts, TlsConfig, TlsProvider};

    validate_preset_url(source)?;

    let tls_config = TlsConfig::builder()
        .provider(TlsProvider::NativeTls)
        .root_certs(RootCerts::PlatformVerifier)
        .build();

    let agent: ureq::Agent = ureq::Agent::config_builder()
        .tls_config(tls_config)
        .timeout_global(Some(Duration::from_secs(source.fetch_timeout_secs)))
        .build()
        .into();

    let mut response = agent
        .get(&source.url)
        .call()
        .map_err(|e| PresetFetchError::Http {
            url: source.url.clone(),
            source: Box::new(e),
        })?;

    let body = response
        .body_mut()
        .with_config()
        .limit(source.max_size_bytes)
        .read_to_string()
        .map_err(|e| PresetFetchError::Body {
            url: source.url.clone(),
            source: Box::new(e),
        })?;

    let catalog = parse_preset_catalog(&source.url, &body)?;
    log::info!(
        "fetched {} preset profiles from {}",
        catalog.len(),
        source.url
    );
    Ok(catalog)
}

/// Decode and validate a preset catalog document.
///
/// The fetch-free half of [`fetch_presets`]; `url` is only used in error
/// messages.
///
/// # Errors
///
/// [`PresetFetchError::Parse`] for malformed JSON,
/// [`PresetFetchError::Validation`] for a catalog violating the profile
/// schema.
pub fn parse_preset_catalog(url: &str, body: &str) -> Result<ProfileCatalog, PresetFetchError> {
    let catalog: ProfileCatalog =
        serde_json::from_str(body).map_err(|e| PresetFetchError::Parse {
            url: url.to_string(),
            source: e,
        })?;

    validate_catalog(&catalog).map_err(|e| PresetFetchError::Validation {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    Ok(catalog)
}

/// Enforce the URL policy: must parse, and must be HTTPS unless the source
/// explicitly allows HTTP.
fn validate_preset_url(source: &PresetSource) -> Result<(), PresetFetchError> {
    let parsed = url::Url::parse(&source.url).map_err(|e| PresetFetchError::InvalidUrl {
        url: source.url.clone(),
        message: e.to_string(),
    })?;

    match parsed.scheme() {
        "https" => Ok(()),
        "http" if source.allow_http => {
            log::warn!(
                "fetching preset catalog from '{}' over insecure HTTP; \
                 a network attacker could rewrite profiles. Use HTTPS when possible.",
                source.url
            );
            Ok(())
        }
        _ => Err(PresetFetchError::InsecureUrl(source.url.clone())),
    }
}
