//! Playlist library functions

use tracing::info;

use super::sorting::{KeySpec, SortLib};
use crate::error::Result;
use crate::library::Library;
use crate::models::{MediaType, Playlist};

/// Playlist library functions
pub struct PlaylistLib;

impl PlaylistLib {
    /// Playlists that may be organized: smart playlists are rule based and
    /// are left alone
    pub fn organizable(playlists: Vec<Playlist>, types: &[MediaType]) -> Vec<Playlist> {
        playlists
            .into_iter()
            .filter(|p| !p.smart && types.contains(&p.playlist_type))
            .collect()
    }

    /// Sort a playlist and write the new order back.
    ///
    /// With `duplicate` set the playlist is left untouched and the sorted
    /// items go into a new "Copy of" playlist. Returns the id of the playlist
    /// holding the sorted items.
    pub fn sort_playlist(
        library: &mut dyn Library,
        playlist: &Playlist,
        spec: &KeySpec,
        duplicate: bool,
    ) -> Result<String> {
        info!("Preparing items of playlist \"{}\"...", playlist.title);
        let items = library.fetch_playlist_items(&playlist.id)?;
        let sorted = SortLib::sort(&items, spec, playlist.playlist_type)?;

        if duplicate {
            let title = playlist.copy_title();
            info!("Creating new playlist \"{}\"...", title);
            let id = library.create_playlist(
                &title,
                &playlist.summary,
                &sorted,
                playlist.playlist_type,
            )?;
            info!("Successfully created and sorted playlist \"{}\"", title);
            return Ok(id);
        }

        library.apply_reorder(&playlist.id, &sorted)?;
        info!("Successfully sorted playlist \"{}\"", playlist.title);
        Ok(playlist.id.clone())
    }
}
