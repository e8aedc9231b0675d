//! Audio quality policy

use std::collections::BTreeMap;

use crate::models::MediaItem;

/// Codecs that pass a lossless-only policy
pub const LOSSLESS_CODECS: &[&str] = &["alac", "flac"];

/// Rules deciding whether an audio item is good enough to keep
///
/// Built from the upgrade settings, see `UserConfig::quality_policy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityPolicy {
    /// Flag every item for an upgrade
    pub force_all: bool,
    /// Only lossless codecs pass
    pub force_lossless_only: bool,
    /// Minimum bitrate in kbps per codec; codecs not listed always pass
    pub per_codec_minimum_bitrate: BTreeMap<String, u32>,
}

impl Default for QualityPolicy {
    fn default() -> Self {
        Self {
            force_all: false,
            force_lossless_only: false,
            per_codec_minimum_bitrate: default_codec_min_bitrates(),
        }
    }
}

/// Thresholds used when the settings name none
pub fn default_codec_min_bitrates() -> BTreeMap<String, u32> {
    [("mp3".to_string(), 320), ("aac".to_string(), 256)]
        .into_iter()
        .collect()
}

impl QualityPolicy {
    /// Check if an audio item meets the policy.
    ///
    /// Only the first media representation of an item is considered. An item
    /// without a known bitrate fails any bitrate threshold of its codec.
    pub fn meets_quality(&self, item: &MediaItem) -> bool {
        if self.force_all {
            return false;
        }

        let codec = item.codec();

        if self.force_lossless_only {
            return codec.is_some_and(|c| LOSSLESS_CODECS.contains(&c.as_str()));
        }

        match codec.and_then(|c| self.per_codec_minimum_bitrate.get(&c)) {
            Some(minimum) => item.bitrate_kbps.is_some_and(|b| b >= *minimum),
            None => true,
        }
    }
}
