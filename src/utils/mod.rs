//! Utility modules for plex-organize

pub mod dates;
pub mod tracks;
