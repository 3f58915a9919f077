//! Error types for settings loading and validation.

/// Errors that can occur when loading or validating an `agplan.toml` file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading the settings file.
    #[error("failed to read settings: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse settings: {0}")]
    ParseError(String),

    /// A settings value failed validation.
    #[error("invalid setting `{key}`: {reason}")]
    ValidationError {
        /// Dotted key of the offending value (e.g. `area.slack_factor`).
        key: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl SettingsError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
