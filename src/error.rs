//! Error types for plex-organize

use crate::core::sorting::SortKey;
use crate::models::MediaType;

/// Errors raised while organizing playlists
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Sort key {key} is not available for {media_type} items")]
    InvalidKey { key: SortKey, media_type: MediaType },

    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("Item \"{title}\" has no value for {key} nor for its fallback {fallback}")]
    MissingValue {
        title: String,
        key: SortKey,
        fallback: SortKey,
    },

    #[error("Choice {index} is not one of the {options} offered options")]
    AmbiguousChoice { index: usize, options: usize },

    #[error("An answer is required, none of the {options} offered options was chosen")]
    ChoiceRequired { options: usize },

    #[error("Aborted by user")]
    Aborted,

    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),

    #[error("Library error: {0}")]
    Library(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type for plex-organize operations
pub type Result<T> = std::result::Result<T, Error>;
