//! Data models for plex-organize
//!
//! This module contains the in-memory views of library objects the organizer works on.

mod album;
mod enums;
mod media_item;
mod playlist;

pub use album::Album;
pub use enums::MediaType;
pub use media_item::MediaItem;
pub use playlist::Playlist;
