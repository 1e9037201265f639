//! Error types for sw-core

use thiserror::Error;

/// Core error type for Stepwise
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Malformed version string
    #[error("[E001] Invalid version string '{input}': {reason}")]
    InvalidVersion { input: String, reason: String },

    /// E002: Key missing from the configuration or version file
    #[error("[E002] Key '{key}' not found in '{parent}'")]
    KeyNotFound { key: String, parent: String },

    /// E003: Configuration file not found
    #[error("[E003] Config file not found: {path} (absolute path: {absolute})")]
    ConfigNotFound { path: String, absolute: String },

    /// E004: Failed to parse configuration file
    #[error("[E004] Failed to parse config {path}: {message}")]
    ConfigParseError { path: String, message: String },

    /// E005: Unterminated `%key%` placeholder
    #[error("[E005] Invalid placeholder in '{value}' (key '{key}'): missing closing '%'")]
    InvalidPlaceholder { key: String, value: String },

    /// E006: Placeholders that reference each other
    #[error("[E006] Placeholder cycle while resolving '{key}': {chain}")]
    PlaceholderCycle { key: String, chain: String },

    /// E007: Invalid configuration value
    #[error("[E007] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E008: IO error with file path context
    #[error("[E008] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E009: JSON serialization/deserialization error
    #[error("[E009] JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
