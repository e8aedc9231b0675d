//! Playlist upgrades
//!
//! Tracks failing the quality policy are looked up again in the library and,
//! when a better version by the same artist exists, swapped for it.

use tracing::{info, warn};

use super::quality::QualityPolicy;
use super::replacement::{find_replacement, DecisionReason, ReplacementDecision, Selection};
use crate::error::Result;
use crate::library::Library;
use crate::models::{MediaItem, Playlist};
use crate::prompt::Chooser;
use crate::utils::tracks::search_term;

/// How an upgrade run behaves
#[derive(Debug, Clone, Copy, Default)]
pub struct UpgradeOptions {
    /// Pick the best candidate automatically
    pub simple: bool,
    /// Only report what would change
    pub dry_run: bool,
    /// Work on a "Copy of" playlist
    pub duplicate: bool,
}

/// Everything an upgrade run decided
#[derive(Debug, Default)]
pub struct UpgradePlan {
    /// Id of the playlist the plan applies to
    pub playlist_id: String,
    /// Items meeting the policy
    pub passed: Vec<MediaItem>,
    /// One decision per item failing the policy, in playlist order
    pub decisions: Vec<ReplacementDecision>,
    pub to_remove: Vec<MediaItem>,
    pub to_add: Vec<MediaItem>,
    /// Failing items that stay as they are
    pub omitted: Vec<MediaItem>,
}

impl UpgradePlan {
    pub fn has_changes(&self) -> bool {
        !self.to_remove.is_empty() || !self.to_add.is_empty()
    }
}

/// Upgrade library functions
pub struct UpgradeLib;

impl UpgradeLib {
    /// Decide the replacement of every item failing `policy`
    pub fn plan(
        library: &dyn Library,
        playlist_id: &str,
        items: &[MediaItem],
        policy: &QualityPolicy,
        mut chooser: Option<&mut dyn Chooser>,
    ) -> Result<UpgradePlan> {
        let mut plan = UpgradePlan {
            playlist_id: playlist_id.to_string(),
            ..Default::default()
        };

        for item in items {
            if policy.meets_quality(item) {
                info!("✅ {}", item);
                plan.passed.push(item.clone());
                continue;
            }

            info!("❌ {} must be upgraded", item);
            // without an artist nothing can match, so the library is not asked
            let candidates = match item.artist() {
                Some(artist) => {
                    library.search_candidates(&search_term(&item.title), &search_term(artist))?
                }
                None => Vec::new(),
            };

            let selection = match chooser.as_deref_mut() {
                Some(chooser) => Selection::Manual(chooser),
                None => Selection::Simple,
            };
            let decision = find_replacement(item, &candidates, selection)?;

            match (&decision.reason, &decision.replacement) {
                (DecisionReason::Replaced, Some(replacement)) => {
                    info!("🆕 {} will be used instead", replacement);
                    plan.to_remove.push(item.clone());
                    plan.to_add.push(replacement.clone());
                }
                (reason, _) => {
                    info!("❔ No replacement ({}), the track stays as it is", reason);
                    plan.omitted.push(item.clone());
                }
            }

            plan.decisions.push(decision);
        }

        Ok(plan)
    }

    /// Remove all upgraded items, then add all their replacements
    pub fn apply(library: &mut dyn Library, plan: &UpgradePlan) -> Result<()> {
        if !plan.to_remove.is_empty() {
            library.remove_items(&plan.playlist_id, &plan.to_remove)?;
        }
        if !plan.to_add.is_empty() {
            library.add_items(&plan.playlist_id, &plan.to_add)?;
        }
        Ok(())
    }

    /// Full upgrade of a playlist.
    ///
    /// A dry run always selects automatically and never duplicates or writes.
    pub fn run(
        library: &mut dyn Library,
        playlist: &Playlist,
        policy: &QualityPolicy,
        options: UpgradeOptions,
        chooser: &mut dyn Chooser,
    ) -> Result<UpgradePlan> {
        let simple = options.simple || options.dry_run;
        let duplicate = options.duplicate && !options.dry_run;

        info!("Preparing items of playlist \"{}\"...", playlist.title);
        let mut playlist_id = playlist.id.clone();
        let mut items = library.fetch_playlist_items(&playlist_id)?;

        if duplicate {
            let title = playlist.copy_title();
            info!("Creating new playlist \"{}\"...", title);
            playlist_id =
                library.create_playlist(&title, &playlist.summary, &items, playlist.playlist_type)?;
            items = library.fetch_playlist_items(&playlist_id)?;
        }

        let chooser = if simple { None } else { Some(chooser) };
        let plan = Self::plan(library, &playlist_id, &items, policy, chooser)?;

        if options.dry_run {
            info!(
                "Dry run: {} tracks would be replaced, {} cannot be upgraded",
                plan.to_remove.len(),
                plan.omitted.len()
            );
            return Ok(plan);
        }

        Self::apply(library, &plan)?;

        if !plan.omitted.is_empty() {
            warn!("{} tracks couldn't be upgraded", plan.omitted.len());
        }
        info!("Successfully upgraded playlist \"{}\"", playlist.title);

        Ok(plan)
    }
}
