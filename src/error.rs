//! Library error types

use thiserror::Error;

/// Failures raised by the library core. All of them are local to one
/// request or one ingested item.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    #[error("Artist not found: {0}")]
    ArtistNotFound(String),
    #[error("no cache entry for artist {0}")]
    MissingCacheEntry(String),
    #[error("album {0} has not been type checked")]
    UnclassifiedAlbum(String),
    #[error("malformed track {filepath:?}: {reason}")]
    MalformedTrack { filepath: String, reason: String },
    #[error("malformed album {title:?}: {reason}")]
    MalformedAlbum { title: String, reason: String },
}

impl LibraryError {
    pub fn malformed_track(filepath: &str, reason: impl Into<String>) -> Self {
        LibraryError::MalformedTrack {
            filepath: filepath.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LibraryError>;
