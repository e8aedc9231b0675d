//! Library collaborator
//!
//! The organizer never talks to the media service itself. Everything it needs
//! from the library (reading playlists, searching tracks, writing changes back)
//! goes through the [`Library`] trait.

mod json;

pub use json::{JsonLibrary, LibraryData};

use crate::error::{Error, Result};
use crate::models::{Album, MediaItem, MediaType, Playlist};

/// Access to a media library and its playlists
pub trait Library {
    /// All playlists, including their items
    fn playlists(&self) -> Result<Vec<Playlist>>;

    /// Ordered items of a playlist
    fn fetch_playlist_items(&self, playlist_id: &str) -> Result<Vec<MediaItem>>;

    /// Tracks matching a title and an artist
    fn search_candidates(&self, title: &str, artist: &str) -> Result<Vec<MediaItem>>;

    /// Put the playlist items in the given order
    fn apply_reorder(&mut self, playlist_id: &str, items: &[MediaItem]) -> Result<()>;

    fn remove_items(&mut self, playlist_id: &str, items: &[MediaItem]) -> Result<()>;

    fn add_items(&mut self, playlist_id: &str, items: &[MediaItem]) -> Result<()>;

    /// Create a playlist and return its id
    fn create_playlist(
        &mut self,
        title: &str,
        summary: &str,
        items: &[MediaItem],
        playlist_type: MediaType,
    ) -> Result<String>;

    /// Albums of the music sections
    fn albums(&self) -> Result<Vec<Album>>;

    /// Find a playlist by id or by case-insensitive title
    fn find_playlist(&self, name: &str) -> Result<Playlist> {
        let title = name.to_lowercase();
        self.playlists()?
            .into_iter()
            .find(|p| p.id == name || p.title.to_lowercase() == title)
            .ok_or_else(|| Error::PlaylistNotFound(name.to_string()))
    }
}
