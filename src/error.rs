/// Error types shared by the slot widget and its collaborators
///
/// Errors travel inside iced messages, so every variant carries owned,
/// cloneable data instead of the underlying error value.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    /// The selected file could not be read from disk
    #[error("failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    /// The file was read but is not an image we can decode
    #[error("not a decodable image: {0}")]
    Decode(String),

    /// Upload or delete attempted without a usable access token
    #[error("missing or empty access token")]
    Unauthorized,

    /// Persisting the file failed
    #[error("upload failed: {0}")]
    Upload(String),

    /// The profile catalog rejected a query
    #[error("profile store error: {0}")]
    Store(String),

    /// The configuration file exists but could not be used
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A blocking background task panicked or was cancelled
    #[error("background task failed: {0}")]
    Join(String),
}

impl From<rusqlite::Error> for SlotError {
    fn from(err: rusqlite::Error) -> Self {
        SlotError::Store(err.to_string())
    }
}

impl From<image::ImageError> for SlotError {
    fn from(err: image::ImageError) -> Self {
        SlotError::Decode(err.to_string())
    }
}

impl From<tokio::task::JoinError> for SlotError {
    fn from(err: tokio::task::JoinError) -> Self {
        SlotError::Join(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SlotError>;
