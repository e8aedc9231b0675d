//! Album model

use serde::{Deserialize, Serialize};

use super::MediaItem;

/// An album of a music library section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    /// Album title
    pub title: String,
    /// Album artist
    #[serde(default)]
    pub artist: String,
    /// Release year
    #[serde(default)]
    pub year: Option<i32>,
    /// Album tracks
    #[serde(default)]
    pub tracks: Vec<MediaItem>,
}

impl Album {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            year: None,
            tracks: Vec::new(),
        }
    }
}
