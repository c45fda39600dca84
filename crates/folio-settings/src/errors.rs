//! Settings error types.

/// Convenience alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Errors raised while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    #[error("failed to read settings file {path}: {source}")]
    Read {
        /// Path that failed.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON or has the wrong shape.
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        /// Path that failed.
        path: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}
