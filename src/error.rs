//! Typed error variants for the par-logview-config crate.
//!
//! Provides structured error types so callers at the crate boundary can match
//! on specific failure modes instead of opaque strings. All variants implement
//! `std::error::Error`, so callers using `anyhow` coerce automatically.

use thiserror::Error;

/// Errors produced by the settings store and the settings manager.
///
/// Validation failures carry a human-readable description of the first
/// violation, naming the offending key where one exists. A failed operation
/// never leaves the persisted settings partially written.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred reading or writing the settings file.
    #[error("I/O error accessing the settings store: {0}")]
    Io(#[from] std::io::Error),

    /// The in-memory settings could not be serialized for persistence.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A value failed semantic validation.
    ///
    /// The inner string describes which field or key is invalid and why.
    #[error("settings validation error: {0}")]
    Validation(String),

    /// The server preset catalog could not be fetched at construction time.
    #[error(transparent)]
    Preset(#[from] PresetFetchError),
}

/// Errors produced while fetching the server preset catalog.
///
/// Transport failures (`Http`, `Body`) are distinguished from schema
/// failures (`Parse`, `Validation`) so callers can tell a flaky network from
/// a misauthored catalog. No retry is performed here; retry policy belongs
/// to the caller.
#[derive(Debug, Error)]
pub enum PresetFetchError {
    /// The configured preset URL could not be parsed at all.
    #[error("invalid preset URL '{url}': {message}")]
    InvalidUrl {
        /// The offending URL string.
        url: String,
        /// Parse failure description.
        message: String,
    },

    /// The preset URL uses plain HTTP without the explicit opt-in.
    #[error("preset URL '{0}' uses an insecure scheme; use HTTPS or set allow_http")]
    InsecureUrl(String),

    /// The HTTP request itself failed (DNS, TLS, connect, non-2xx status).
    #[error("HTTP request failed for {url}: {source}")]
    Http {
        /// The URL that was fetched.
        url: String,
        /// Underlying transport error.
        #[source]
        source: Box<ureq::Error>,
    },

    /// The response body could not be read within the configured size limit.
    #[error("failed to read preset response body from {url}: {source}")]
    Body {
        /// The URL that was fetched.
        url: String,
        /// Underlying transport error.
        #[source]
        source: Box<ureq::Error>,
    },

    /// The response body was not valid JSON for a profile catalog.
    #[error("preset catalog from {url} is not valid JSON: {source}")]
    Parse {
        /// The URL that was fetched.
        url: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The decoded catalog violated a schema constraint.
    #[error("preset catalog from {url} failed validation: {message}")]
    Validation {
        /// The URL that was fetched.
        url: String,
        /// First violation, human-readable.
        message: String,
    },
}
