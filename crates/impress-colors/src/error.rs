//! Error types for impress-colors

use thiserror::Error;

/// Main error type for color table operations
#[derive(Error, Debug)]
#[cfg_attr(feature = "native", derive(uniffi::Error), uniffi(flat_error))]
pub enum ColorError {
    /// A persisted color map entry could not be read
    #[error("Malformed color map entry '{entry}': {message}")]
    Parse { entry: String, message: String },

    /// A color string matched none of the accepted encodings
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// No built-in palette carries this name
    #[error("Unknown palette: {0}")]
    UnknownPalette(String),

    /// Configuration values contradict each other
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML configuration errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON configuration errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ColorError {
    pub(crate) fn parse(entry: &str, message: impl Into<String>) -> Self {
        Self::Parse {
            entry: entry.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for color table operations
pub type ColorResult<T> = Result<T, ColorError>;
