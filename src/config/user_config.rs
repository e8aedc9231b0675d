//! User configuration for plex-organize
//!
//! This module handles user-configurable settings stored in settings.json.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::Paths;
use crate::core::quality::{default_codec_min_bitrates, QualityPolicy};

/// User configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    /// Library export to organize, relative paths are resolved against the config directory
    #[serde(default)]
    pub library_path: Option<PathBuf>,

    /// Rules for playlist upgrades
    #[serde(default)]
    pub upgrade: UpgradeConfig,
}

/// Quality thresholds for playlist upgrades
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeConfig {
    /// Treat every track as upgradable
    #[serde(default)]
    pub force_all: bool,

    /// Only accept lossless codecs
    #[serde(default)]
    pub force_lossless: bool,

    /// Minimum bitrate in kbps per codec
    #[serde(default = "default_codec_min_bitrates")]
    pub codec_min_bitrates: BTreeMap<String, u32>,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            force_all: false,
            force_lossless: false,
            codec_min_bitrates: default_codec_min_bitrates(),
        }
    }
}

impl UserConfig {
    /// Load configuration from file, writing the defaults when there is none
    pub fn load(paths: &Paths) -> Result<Self> {
        let settings_path = paths.settings_path();

        if settings_path.exists() {
            let content =
                std::fs::read_to_string(&settings_path).context("Failed to read settings file")?;
            let config: UserConfig =
                serde_json::from_str(&content).context("Failed to parse settings file")?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save(paths)?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self, paths: &Paths) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(paths.settings_path(), content).context("Failed to write settings file")?;

        Ok(())
    }

    /// Quality policy described by the upgrade settings
    pub fn quality_policy(&self) -> QualityPolicy {
        QualityPolicy {
            force_all: self.upgrade.force_all,
            force_lossless_only: self.upgrade.force_lossless,
            per_codec_minimum_bitrate: self
                .upgrade
                .codec_min_bitrates
                .iter()
                .map(|(codec, bitrate)| (codec.to_lowercase(), *bitrate))
                .collect(),
        }
    }

    /// Library file to use, if one is configured
    pub fn library_path(&self, paths: &Paths) -> PathBuf {
        match &self.library_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => paths.config_dir().join(path),
            None => paths.default_library_path(),
        }
    }
}
