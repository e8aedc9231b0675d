//! Replacement selection for tracks failing the quality policy

use std::fmt;
use tracing::debug;

use super::normalize::normalize_text;
use crate::error::{Error, Result};
use crate::models::MediaItem;
use crate::prompt::Chooser;

/// Why a replacement decision came out the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    /// A better version was selected
    Replaced,
    /// No candidate had a higher bitrate by the same artist
    NoCandidates,
    /// The item has no artist to match candidates against
    NoMatch,
    /// The chooser declined every candidate
    Deferred,
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DecisionReason::Replaced => "replaced",
            DecisionReason::NoCandidates => "no candidates",
            DecisionReason::NoMatch => "no match",
            DecisionReason::Deferred => "deferred",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of matching one item against its candidates
#[derive(Debug, Clone)]
pub struct ReplacementDecision {
    pub original: MediaItem,
    pub replacement: Option<MediaItem>,
    pub reason: DecisionReason,
}

impl ReplacementDecision {
    fn without(original: &MediaItem, reason: DecisionReason) -> Self {
        Self {
            original: original.clone(),
            replacement: None,
            reason,
        }
    }
}

/// How a replacement is picked among ranked candidates
pub enum Selection<'a> {
    /// Take the top-ranked candidate
    Simple,
    /// Ask the chooser for every item
    Manual(&'a mut dyn Chooser),
}

/// Keep the candidates that are a plausible better version of `item`, best first.
///
/// Candidates need a known bitrate above the item's and an artist that
/// contains the item's artist. Ranking is by bitrate descending, with equal
/// bitrates ordered by normalized artist name.
pub fn rank_candidates(item: &MediaItem, artist: &str, candidates: &[MediaItem]) -> Vec<MediaItem> {
    let bitrate = item.bitrate_kbps.unwrap_or(0);
    let artist = artist.to_lowercase();

    let mut ranked: Vec<(String, u32, &MediaItem)> = candidates
        .iter()
        .filter_map(|c| c.bitrate_kbps.filter(|b| *b > bitrate).map(|b| (b, c)))
        .filter_map(|(b, c)| {
            let name = c.artist()?;
            name.to_lowercase()
                .contains(&artist)
                .then(|| (normalize_text(name), b, c))
        })
        .collect();

    ranked.sort_by(|a, b| a.0.cmp(&b.0));
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked.into_iter().map(|(_, _, c)| c.clone()).collect()
}

/// Decide which candidate, if any, replaces `item`
pub fn find_replacement(
    item: &MediaItem,
    candidates: &[MediaItem],
    selection: Selection<'_>,
) -> Result<ReplacementDecision> {
    let Some(artist) = item.artist() else {
        return Ok(ReplacementDecision::without(item, DecisionReason::NoMatch));
    };

    let ranked = rank_candidates(item, artist, candidates);
    debug!(
        "{} of {} candidates for \"{}\" qualify",
        ranked.len(),
        candidates.len(),
        item.title
    );

    if ranked.is_empty() {
        return Ok(ReplacementDecision::without(item, DecisionReason::NoCandidates));
    }

    let index = match selection {
        Selection::Simple => 0,
        Selection::Manual(chooser) => {
            let options: Vec<String> = ranked.iter().map(|c| c.to_string()).collect();
            let prompt = format!("Select a replacement track for \"{}\"", item);

            match chooser.choose(&prompt, &options, true)? {
                None => return Ok(ReplacementDecision::without(item, DecisionReason::Deferred)),
                Some(i) if i < ranked.len() => i,
                Some(i) => {
                    return Err(Error::AmbiguousChoice {
                        index: i,
                        options: ranked.len(),
                    })
                }
            }
        }
    };

    Ok(ReplacementDecision {
        original: item.clone(),
        replacement: ranked.into_iter().nth(index),
        reason: DecisionReason::Replaced,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedChooser;

    fn track(key: &str, artist: Option<&str>, codec: &str, bitrate: Option<u32>) -> MediaItem {
        let mut item = MediaItem::new(key, "Song");
        item.primary_artist_name = artist.map(str::to_string);
        item.audio_codec = Some(codec.to_string());
        item.bitrate_kbps = bitrate;
        item
    }

    fn keys(items: &[MediaItem]) -> Vec<&str> {
        items.iter().map(|i| i.rating_key.as_str()).collect()
    }

    #[test]
    fn test_ranking_bitrate_then_artist() {
        let item = track("x", Some("Artist"), "mp3", Some(192));
        let candidates = vec![
            track("c256", Some("Artist C"), "aac", Some(256)),
            track("b320", Some("Artist B"), "mp3", Some(320)),
            track("a320", Some("Artist A"), "mp3", Some(320)),
            track("d192", Some("Artist D"), "mp3", Some(192)),
        ];

        let ranked = rank_candidates(&item, "Artist", &candidates);
        assert_eq!(keys(&ranked), vec!["a320", "b320", "c256"]);
    }

    #[test]
    fn test_filters_unknown_bitrate_and_other_artists() {
        let item = track("x", Some("Queen"), "mp3", Some(128));
        let candidates = vec![
            track("unknown", Some("Queen"), "flac", None),
            track("other", Some("Elton John"), "flac", Some(1000)),
            track("feat", Some("Queen & David Bowie"), "mp3", Some(320)),
        ];

        let ranked = rank_candidates(&item, "Queen", &candidates);
        assert_eq!(keys(&ranked), vec!["feat"]);
    }

    #[test]
    fn test_candidate_album_artist_fallback() {
        let item = track("x", Some("Daft Punk"), "mp3", Some(128));
        let mut candidate = track("c", None, "flac", Some(900));
        candidate.fallback_artist_name = Some("DAFT PUNK".to_string());

        let decision = find_replacement(&item, &[candidate], Selection::Simple).unwrap();
        assert_eq!(decision.reason, DecisionReason::Replaced);
    }

    #[test]
    fn test_simple_mode_picks_best() {
        let item = track("x", Some("Same Artist"), "mp3", Some(256));
        let candidates = vec![
            track("mp3", Some("Same Artist"), "mp3", Some(320)),
            track("flac", Some("Same Artist"), "flac", Some(1000)),
        ];

        let decision = find_replacement(&item, &candidates, Selection::Simple).unwrap();
        assert_eq!(decision.reason, DecisionReason::Replaced);
        assert_eq!(decision.original.rating_key, "x");
        assert_eq!(decision.replacement.unwrap().rating_key, "flac");
        assert_eq!(candidates[0].rating_key, "mp3");
    }

    #[test]
    fn test_no_candidates() {
        let item = track("x", Some("Artist"), "mp3", Some(256));

        let decision = find_replacement(&item, &[], Selection::Simple).unwrap();
        assert_eq!(decision.reason, DecisionReason::NoCandidates);

        let worse = vec![track("c", Some("Artist"), "mp3", Some(256))];
        let decision = find_replacement(&item, &worse, Selection::Simple).unwrap();
        assert_eq!(decision.reason, DecisionReason::NoCandidates);

        let stranger = vec![track("c", Some("Someone Else"), "flac", Some(900))];
        let decision = find_replacement(&item, &stranger, Selection::Simple).unwrap();
        assert_eq!(decision.reason, DecisionReason::NoCandidates);
        assert!(decision.replacement.is_none());
    }

    #[test]
    fn test_item_without_artist() {
        let item = track("x", None, "mp3", Some(128));
        let candidates = vec![track("c", Some("Anyone"), "flac", Some(900))];

        let decision = find_replacement(&item, &candidates, Selection::Simple).unwrap();
        assert_eq!(decision.reason, DecisionReason::NoMatch);
    }

    #[test]
    fn test_manual_mode() {
        let item = track("x", Some("Artist"), "mp3", Some(128));
        let candidates = vec![
            track("low", Some("Artist"), "mp3", Some(256)),
            track("high", Some("Artist"), "flac", Some(900)),
        ];

        let mut chooser = ScriptedChooser::new([Some(1), None]);

        let decision =
            find_replacement(&item, &candidates, Selection::Manual(&mut chooser)).unwrap();
        assert_eq!(decision.reason, DecisionReason::Replaced);
        assert_eq!(decision.replacement.unwrap().rating_key, "low");

        let decision =
            find_replacement(&item, &candidates, Selection::Manual(&mut chooser)).unwrap();
        assert_eq!(decision.reason, DecisionReason::Deferred);
        assert!(decision.replacement.is_none());

        // options are offered in ranked order
        assert!(chooser.asked[0].1[0].contains("[flac][900]"));
    }

    #[test]
    fn test_manual_mode_invalid_choice() {
        let item = track("x", Some("Artist"), "mp3", Some(128));
        let candidates = vec![track("c", Some("Artist"), "flac", Some(900))];
        let mut chooser = ScriptedChooser::new([Some(5)]);

        let err = find_replacement(&item, &candidates, Selection::Manual(&mut chooser)).unwrap_err();
        assert!(matches!(err, Error::AmbiguousChoice { index: 5, options: 1 }));
    }

    #[test]
    fn test_manual_mode_abort() {
        let item = track("x", Some("Artist"), "mp3", Some(128));
        let candidates = vec![track("c", Some("Artist"), "flac", Some(900))];
        let mut chooser = ScriptedChooser::default();

        let err = find_replacement(&item, &candidates, Selection::Manual(&mut chooser)).unwrap_err();
        assert!(matches!(err, Error::Aborted));
    }

    #[test]
    fn test_manual_mode_skipped_without_candidates() {
        let item = track("x", Some("Artist"), "mp3", Some(128));
        let mut chooser = ScriptedChooser::default();

        let decision = find_replacement(&item, &[], Selection::Manual(&mut chooser)).unwrap();
        assert_eq!(decision.reason, DecisionReason::NoCandidates);
        assert!(chooser.asked.is_empty());
    }
}
