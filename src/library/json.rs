//! Library stored in a JSON document

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::Library;
use crate::error::{Error, Result};
use crate::models::{Album, MediaItem, MediaType, Playlist};
use crate::utils::tracks::search_term;

/// Contents of a library file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryData {
    #[serde(default)]
    pub playlists: Vec<Playlist>,
    /// Tracks not attached to an album
    #[serde(default)]
    pub tracks: Vec<MediaItem>,
    #[serde(default)]
    pub albums: Vec<Album>,
}

/// A library exported to a JSON file; every change is written back
pub struct JsonLibrary {
    path: Option<PathBuf>,
    data: LibraryData,
}

impl JsonLibrary {
    /// Load a library file
    pub fn open(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let data: LibraryData = serde_json::from_str(&content)?;
        debug!(
            "Loaded {} playlists and {} albums from {:?}",
            data.playlists.len(),
            data.albums.len(),
            path
        );

        Ok(Self {
            path: Some(path.to_path_buf()),
            data,
        })
    }

    /// Library that is never written to disk
    pub fn in_memory(data: LibraryData) -> Self {
        Self { path: None, data }
    }

    pub fn data(&self) -> &LibraryData {
        &self.data
    }

    fn save(&self) -> Result<()> {
        if let Some(path) = &self.path {
            let content = serde_json::to_string_pretty(&self.data)?;
            std::fs::write(path, content)?;
        }
        Ok(())
    }

    fn playlist_mut(&mut self, playlist_id: &str) -> Result<&mut Playlist> {
        self.data
            .playlists
            .iter_mut()
            .find(|p| p.id == playlist_id)
            .ok_or_else(|| Error::PlaylistNotFound(playlist_id.to_string()))
    }

    fn catalog(&self) -> impl Iterator<Item = &MediaItem> {
        self.data
            .tracks
            .iter()
            .chain(self.data.albums.iter().flat_map(|a| a.tracks.iter()))
    }

    fn next_id(&self) -> String {
        let max = self
            .data
            .playlists
            .iter()
            .filter_map(|p| p.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        (max + 1).to_string()
    }
}

fn contains_term(value: Option<&str>, query: &str) -> bool {
    value.is_some_and(|v| search_term(v).to_lowercase().contains(query))
}

impl Library for JsonLibrary {
    fn playlists(&self) -> Result<Vec<Playlist>> {
        Ok(self.data.playlists.clone())
    }

    fn fetch_playlist_items(&self, playlist_id: &str) -> Result<Vec<MediaItem>> {
        self.data
            .playlists
            .iter()
            .find(|p| p.id == playlist_id)
            .map(|p| p.items.clone())
            .ok_or_else(|| Error::PlaylistNotFound(playlist_id.to_string()))
    }

    fn search_candidates(&self, title: &str, artist: &str) -> Result<Vec<MediaItem>> {
        let title = title.to_lowercase();
        let artist = artist.to_lowercase();
        let mut seen = HashSet::new();

        Ok(self
            .catalog()
            .filter(|t| {
                contains_term(Some(&t.title), &title) && contains_term(t.artist(), &artist)
            })
            .filter(|t| seen.insert(t.rating_key.clone()))
            .cloned()
            .collect())
    }

    fn apply_reorder(&mut self, playlist_id: &str, items: &[MediaItem]) -> Result<()> {
        let playlist = self.playlist_mut(playlist_id)?;

        let mut current: Vec<&str> = playlist.items.iter().map(|i| i.rating_key.as_str()).collect();
        let mut wanted: Vec<&str> = items.iter().map(|i| i.rating_key.as_str()).collect();
        current.sort_unstable();
        wanted.sort_unstable();
        if current != wanted {
            return Err(Error::Library(format!(
                "reorder of playlist {} does not match its items",
                playlist_id
            )));
        }

        playlist.items = items.to_vec();
        self.save()
    }

    fn remove_items(&mut self, playlist_id: &str, items: &[MediaItem]) -> Result<()> {
        let keys: HashSet<&str> = items.iter().map(|i| i.rating_key.as_str()).collect();
        let playlist = self.playlist_mut(playlist_id)?;
        playlist.items.retain(|i| !keys.contains(i.rating_key.as_str()));
        self.save()
    }

    fn add_items(&mut self, playlist_id: &str, items: &[MediaItem]) -> Result<()> {
        let playlist = self.playlist_mut(playlist_id)?;
        playlist.items.extend_from_slice(items);
        self.save()
    }

    fn create_playlist(
        &mut self,
        title: &str,
        summary: &str,
        items: &[MediaItem],
        playlist_type: MediaType,
    ) -> Result<String> {
        let mut playlist = Playlist::new(self.next_id(), title, playlist_type);
        playlist.summary = summary.to_string();
        playlist.items = items.to_vec();

        let id = playlist.id.clone();
        self.data.playlists.push(playlist);
        self.save()?;
        Ok(id)
    }

    fn albums(&self) -> Result<Vec<Album>> {
        Ok(self.data.albums.clone())
    }
}
