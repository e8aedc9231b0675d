//! Core library functions for plex-organize

pub mod albums;
pub mod normalize;
pub mod playlistlib;
pub mod quality;
pub mod replacement;
pub mod sorting;
pub mod upgrade;

pub use albums::AlbumLib;
pub use playlistlib::PlaylistLib;
pub use quality::QualityPolicy;
pub use sorting::SortLib;
pub use upgrade::UpgradeLib;
