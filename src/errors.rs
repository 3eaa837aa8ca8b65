//! Error types shared by the note store, settings and palette

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum NoteError {
    /// Reading or writing a file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The note document could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// settings.toml is malformed
    #[error("Settings error: {0}")]
    Settings(#[from] toml::de::Error),

    /// A palette override is not a valid hex colour
    #[error("Invalid hex color: {0}")]
    Color(String),

    /// The platform has no user data directory
    #[error("Could not determine the user data directory")]
    NoDataDir,
}
