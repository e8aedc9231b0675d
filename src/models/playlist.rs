//! Playlist model

use serde::{Deserialize, Serialize};

use super::{MediaItem, MediaType};

/// A playlist stored in the library
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Library ID
    pub id: String,
    /// Playlist title
    pub title: String,
    /// Playlist summary
    #[serde(default)]
    pub summary: String,
    /// Type of media in the playlist
    pub playlist_type: MediaType,
    /// Smart playlists are rule based and must not be altered
    #[serde(default)]
    pub smart: bool,
    /// Ordered playlist items
    #[serde(default)]
    pub items: Vec<MediaItem>,
}

impl Playlist {
    /// Create a new, empty, non-smart playlist
    pub fn new(id: impl Into<String>, title: impl Into<String>, playlist_type: MediaType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: String::new(),
            playlist_type,
            smart: false,
            items: Vec::new(),
        }
    }

    /// Title used when a playlist is duplicated before organizing
    pub fn copy_title(&self) -> String {
        format!("Copy of {}", self.title)
    }
}
