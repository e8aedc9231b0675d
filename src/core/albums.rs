//! Album library functions

use std::fmt;

use super::quality::QualityPolicy;
use crate::models::{Album, MediaItem};

/// An album holding at least one track below the quality policy
#[derive(Debug, Clone)]
pub struct LowQualityAlbum {
    pub artist: String,
    pub title: String,
    pub year: Option<i32>,
    /// First track of the album failing the policy
    pub track: MediaItem,
}

impl fmt::Display for LowQualityAlbum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.title)?;
        if let Some(year) = self.year {
            write!(f, " ({})", year)?;
        }
        write!(
            f,
            " [{}][{}]",
            self.track.audio_codec.as_deref().unwrap_or("-"),
            self.track
                .bitrate_kbps
                .map(|b| b.to_string())
                .unwrap_or_else(|| "-".to_string())
        )
    }
}

/// Album library functions
pub struct AlbumLib;

impl AlbumLib {
    /// Albums with a track failing `policy`, in library order
    pub fn find_low_quality(albums: &[Album], policy: &QualityPolicy) -> Vec<LowQualityAlbum> {
        albums
            .iter()
            .filter_map(|album| {
                let track = album.tracks.iter().find(|t| !policy.meets_quality(t))?;
                Some(LowQualityAlbum {
                    artist: album.artist.clone(),
                    title: album.title.clone(),
                    year: album.year,
                    track: track.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(key: &str, codec: &str, bitrate: u32) -> MediaItem {
        let mut item = MediaItem::new(key, "Track");
        item.audio_codec = Some(codec.to_string());
        item.bitrate_kbps = Some(bitrate);
        item
    }

    #[test]
    fn test_find_low_quality() {
        let mut lossless = Album::new("Kind of Blue", "Miles Davis");
        lossless.tracks = vec![track("1", "flac", 900), track("2", "flac", 950)];

        let mut mixed = Album::new("Parklife", "Blur");
        mixed.year = Some(1994);
        mixed.tracks = vec![
            track("3", "mp3", 320),
            track("4", "mp3", 192),
            track("5", "aac", 128),
        ];

        let found = AlbumLib::find_low_quality(&[lossless, mixed], &QualityPolicy::default());

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].track.rating_key, "4");
        assert_eq!(found[0].to_string(), "Blur - Parklife (1994) [mp3][192]");
    }

    #[test]
    fn test_lossless_policy_flags_everything_lossy() {
        let mut album = Album::new("Album", "Artist");
        album.tracks = vec![track("1", "mp3", 320)];
        let policy = QualityPolicy {
            force_lossless_only: true,
            ..Default::default()
        };

        let found = AlbumLib::find_low_quality(&[album], &policy);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].to_string(), "Artist - Album [mp3][320]");
    }
}
