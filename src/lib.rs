//! plex-organize - sort and upgrade the items of your media playlists
//!
//! The crate works on playlists already fetched from a media library. It
//! decides a new order for their items, or which better version of a track
//! should replace a low quality one, and hands the result back to a
//! [`library::Library`] to apply.

pub mod config;
pub mod core;
pub mod error;
pub mod library;
pub mod models;
pub mod prompt;
pub mod utils;

pub use error::{Error, Result};
