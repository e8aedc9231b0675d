//! Sorting utilities for playlist items

use rand::seq::SliceRandom;
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

use super::normalize::{normalize, Term};
use crate::error::{Error, Result};
use crate::models::{MediaItem, MediaType};

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    fn apply(self, cmp: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => cmp,
            SortOrder::Descending => cmp.reverse(),
        }
    }
}

/// Whether items are ordered by key or randomly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Normal,
    Shuffle,
}

/// Field of a media item that can be sorted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Title,
    SortTitle,
    Artist,
    AlbumArtist,
    Album,
    Year,
    ReleaseDate,
    Duration,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::SortTitle => "sort-title",
            SortKey::Artist => "artist",
            SortKey::AlbumArtist => "album-artist",
            SortKey::Album => "album",
            SortKey::Year => "year",
            SortKey::ReleaseDate => "release-date",
            SortKey::Duration => "duration",
        }
    }

    /// Parse a key name as typed on the command line
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "title" => Some(SortKey::Title),
            "sort-title" | "titlesort" => Some(SortKey::SortTitle),
            "artist" => Some(SortKey::Artist),
            "album-artist" | "albumartist" => Some(SortKey::AlbumArtist),
            "album" => Some(SortKey::Album),
            "year" => Some(SortKey::Year),
            "release-date" | "date" => Some(SortKey::ReleaseDate),
            "duration" => Some(SortKey::Duration),
            _ => None,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

type Accessor = for<'a> fn(&'a MediaItem) -> Option<Term<'a>>;

fn title(item: &MediaItem) -> Option<Term<'_>> {
    Some(Term::Text(&item.title))
}

// The library reports the plain title when no sort title is set
fn sort_title(item: &MediaItem) -> Option<Term<'_>> {
    Some(Term::Text(item.sort_title.as_deref().unwrap_or(&item.title)))
}

fn artist(item: &MediaItem) -> Option<Term<'_>> {
    item.primary_artist_name.as_deref().map(Term::Text)
}

fn album_artist(item: &MediaItem) -> Option<Term<'_>> {
    item.fallback_artist_name.as_deref().map(Term::Text)
}

fn album(item: &MediaItem) -> Option<Term<'_>> {
    item.album_title.as_deref().map(Term::Text)
}

fn year(item: &MediaItem) -> Option<Term<'_>> {
    item.year.map(|y| Term::Number(i64::from(y)))
}

fn release_date(item: &MediaItem) -> Option<Term<'_>> {
    item.release_date.map(Term::Timestamp)
}

fn duration(item: &MediaItem) -> Option<Term<'_>> {
    item
        .duration_ms
        .map(|d| Term::Number(i64::try_from(d).unwrap_or(i64::MAX)))
}

static AUDIO_KEYS: &[(SortKey, Accessor)] = &[
    (SortKey::Title, title),
    (SortKey::SortTitle, sort_title),
    (SortKey::Artist, artist),
    (SortKey::AlbumArtist, album_artist),
    (SortKey::Album, album),
    (SortKey::Duration, duration),
];

static VIDEO_KEYS: &[(SortKey, Accessor)] = &[
    (SortKey::Title, title),
    (SortKey::SortTitle, sort_title),
    (SortKey::Year, year),
    (SortKey::ReleaseDate, release_date),
    (SortKey::Duration, duration),
];

fn accessor(key: SortKey, media_type: MediaType) -> Result<Accessor> {
    let table = match media_type {
        MediaType::Audio => AUDIO_KEYS,
        MediaType::Video => VIDEO_KEYS,
    };

    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, get)| *get)
        .ok_or(Error::InvalidKey { key, media_type })
}

/// Which keys to sort on and how
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySpec {
    pub primary: SortKey,
    pub primary_fallback: SortKey,
    pub secondary: Option<SortKey>,
    pub secondary_fallback: Option<SortKey>,
    pub order: SortOrder,
    pub mode: SortMode,
}

impl KeySpec {
    /// Sort ascending on a single key that is its own fallback
    pub fn by(primary: SortKey) -> Self {
        Self {
            primary,
            primary_fallback: primary,
            secondary: None,
            secondary_fallback: None,
            order: SortOrder::Ascending,
            mode: SortMode::Normal,
        }
    }

    /// Random order, keys are ignored
    pub fn shuffle() -> Self {
        Self {
            mode: SortMode::Shuffle,
            ..Self::by(SortKey::Title)
        }
    }

    pub fn with_fallback(mut self, fallback: SortKey) -> Self {
        self.primary_fallback = fallback;
        self
    }

    pub fn then_by(mut self, secondary: SortKey, fallback: SortKey) -> Self {
        self.secondary = Some(secondary);
        self.secondary_fallback = Some(fallback);
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn descending(self) -> Self {
        self.with_order(SortOrder::Descending)
    }
}

/// A named sorting choice offered to the user
#[derive(Debug, Clone, Copy)]
pub struct SortPreset {
    pub name: &'static str,
    pub spec: KeySpec,
}

/// Sorting library
pub struct SortLib;

impl SortLib {
    /// Return the items ordered by `spec`, leaving the input untouched.
    ///
    /// With a secondary key on an audio playlist the items are first sorted on
    /// the secondary key, then stable-sorted on the primary key, so the
    /// secondary key only decides the order inside groups of equal primary
    /// values.
    pub fn sort(
        items: &[MediaItem],
        spec: &KeySpec,
        media_type: MediaType,
    ) -> Result<Vec<MediaItem>> {
        let mut sorted = items.to_vec();

        if spec.mode == SortMode::Shuffle {
            sorted.shuffle(&mut rand::thread_rng());
            return Ok(sorted);
        }

        if let (Some(secondary), MediaType::Audio) = (spec.secondary, media_type) {
            let fallback = spec.secondary_fallback.unwrap_or(secondary);
            debug!("Secondary pass on {} (fallback {})", secondary, fallback);
            sorted = Self::sort_pass(sorted, secondary, fallback, media_type, spec.order)?;
        }

        debug!(
            "Primary pass on {} (fallback {})",
            spec.primary, spec.primary_fallback
        );
        Self::sort_pass(
            sorted,
            spec.primary,
            spec.primary_fallback,
            media_type,
            spec.order,
        )
    }

    /// Normalized comparison value of an item for a key and its fallback
    pub fn sort_value(
        item: &MediaItem,
        key: SortKey,
        fallback: SortKey,
        media_type: MediaType,
    ) -> Result<String> {
        let get = accessor(key, media_type)?;
        let get_fallback = accessor(fallback, media_type)?;

        get(item)
            .or_else(|| get_fallback(item))
            .map(normalize)
            .ok_or_else(|| Error::MissingValue {
                title: item.title.clone(),
                key,
                fallback,
            })
    }

    fn sort_pass(
        items: Vec<MediaItem>,
        key: SortKey,
        fallback: SortKey,
        media_type: MediaType,
        order: SortOrder,
    ) -> Result<Vec<MediaItem>> {
        let mut keyed = items
            .into_iter()
            .map(|item| Ok((Self::sort_value(&item, key, fallback, media_type)?, item)))
            .collect::<Result<Vec<_>>>()?;

        // stable, equal values keep their current order in both directions
        keyed.sort_by(|(a, _), (b, _)| order.apply(a.cmp(b)));

        Ok(keyed.into_iter().map(|(_, item)| item).collect())
    }

    /// Sorting choices available for a playlist type, in menu order
    pub fn presets(media_type: MediaType) -> Vec<SortPreset> {
        let mut presets = vec![
            SortPreset {
                name: "Title",
                spec: KeySpec::by(SortKey::Title).then_by(SortKey::Artist, SortKey::AlbumArtist),
            },
            SortPreset {
                name: "Sorting title",
                spec: KeySpec::by(SortKey::SortTitle)
                    .then_by(SortKey::Artist, SortKey::AlbumArtist),
            },
        ];

        match media_type {
            MediaType::Audio => presets.extend([
                SortPreset {
                    name: "Artist name",
                    spec: KeySpec::by(SortKey::Artist)
                        .with_fallback(SortKey::AlbumArtist)
                        .then_by(SortKey::Title, SortKey::Title),
                },
                SortPreset {
                    name: "Album artist name",
                    spec: KeySpec::by(SortKey::AlbumArtist).then_by(SortKey::Title, SortKey::Title),
                },
                SortPreset {
                    name: "Album name",
                    spec: KeySpec::by(SortKey::Album)
                        .then_by(SortKey::Artist, SortKey::AlbumArtist),
                },
            ]),
            MediaType::Video => presets.extend([
                SortPreset {
                    name: "Release year",
                    spec: KeySpec::by(SortKey::Year).then_by(SortKey::Title, SortKey::Title),
                },
                SortPreset {
                    name: "Originally available at",
                    spec: KeySpec::by(SortKey::ReleaseDate)
                        .then_by(SortKey::Title, SortKey::Title),
                },
            ]),
        }

        presets.extend([
            SortPreset {
                name: "Duration",
                spec: KeySpec::by(SortKey::Duration).then_by(SortKey::Title, SortKey::Title),
            },
            SortPreset {
                name: "Shuffle randomly",
                spec: KeySpec::shuffle(),
            },
        ]);

        presets
    }

    /// Parse sort parameter string (e.g., "album", "artist:desc", "shuffle")
    /// into the matching preset for the playlist type
    pub fn parse_sort(sort: &str, media_type: MediaType) -> Result<KeySpec> {
        let (name, direction) = sort.split_once(':').unwrap_or((sort, "asc"));

        let order = match direction {
            "desc" => SortOrder::Descending,
            _ => SortOrder::Ascending,
        };

        if name.eq_ignore_ascii_case("shuffle") {
            return Ok(KeySpec::shuffle());
        }

        let key = SortKey::from_name(name).ok_or_else(|| Error::UnknownSortKey(name.to_string()))?;

        Self::presets(media_type)
            .into_iter()
            .find(|p| p.spec.mode == SortMode::Normal && p.spec.primary == key)
            .map(|p| p.spec.with_order(order))
            .ok_or(Error::InvalidKey { key, media_type })
    }
}
