//! Media item model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::dates::duration_to_str;

/// A single playlist entry as fetched from the library.
///
/// Not every field applies to every media type: video items carry no codec
/// or bitrate, audio items usually have no release date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    /// Library identity of the item
    pub rating_key: String,
    /// Display title
    pub title: String,
    /// Title used by the library for sorting
    #[serde(default)]
    pub sort_title: Option<String>,
    /// Track artist
    #[serde(default)]
    pub primary_artist_name: Option<String>,
    /// Album artist, used when the track artist is absent
    #[serde(default)]
    pub fallback_artist_name: Option<String>,
    /// Album title
    #[serde(default)]
    pub album_title: Option<String>,
    /// Originally available at
    #[serde(default)]
    pub release_date: Option<NaiveDateTime>,
    /// Release year
    #[serde(default)]
    pub year: Option<i32>,
    /// Duration in milliseconds
    #[serde(default)]
    pub duration_ms: Option<u64>,
    /// Codec of the first media representation
    #[serde(default)]
    pub audio_codec: Option<String>,
    /// Bitrate in kbps of the first media representation
    #[serde(default)]
    pub bitrate_kbps: Option<u32>,
}

impl MediaItem {
    /// Create an item with only identity and title set
    pub fn new(rating_key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            rating_key: rating_key.into(),
            title: title.into(),
            sort_title: None,
            primary_artist_name: None,
            fallback_artist_name: None,
            album_title: None,
            release_date: None,
            year: None,
            duration_ms: None,
            audio_codec: None,
            bitrate_kbps: None,
        }
    }

    /// Track artist, or the album artist when the track has none
    pub fn artist(&self) -> Option<&str> {
        self.primary_artist_name
            .as_deref()
            .or(self.fallback_artist_name.as_deref())
    }

    /// Lower-cased codec name, if any
    pub fn codec(&self) -> Option<String> {
        self.audio_codec.as_ref().map(|c| c.to_lowercase())
    }
}

impl PartialEq for MediaItem {
    fn eq(&self, other: &Self) -> bool {
        self.rating_key == other.rating_key
    }
}

impl Eq for MediaItem {}

impl std::hash::Hash for MediaItem {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.rating_key.hash(state);
    }
}

impl fmt::Display for MediaItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({}) [{}][{}][{}]",
            self.artist().unwrap_or("Unknown artist"),
            self.title,
            self.album_title.as_deref().unwrap_or(""),
            duration_to_str(self.duration_ms.unwrap_or(0)),
            self.audio_codec.as_deref().unwrap_or("-"),
            self.bitrate_kbps
                .map(|b| b.to_string())
                .unwrap_or_else(|| "-".to_string()),
        )
    }
}
