//! Path management for plex-organize

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding the config directory
pub const CONFIG_PATH_ENV: &str = "PLEX_ORGANIZE_CONFIG_PATH";

/// Manages the filesystem paths used by the application
#[derive(Debug, Clone)]
pub struct Paths {
    /// Config directory path
    config_dir: PathBuf,
}

impl Paths {
    /// Resolve the config directory and make sure it exists.
    ///
    /// Order: explicit override, then `PLEX_ORGANIZE_CONFIG_PATH`, then the
    /// platform config directory.
    pub fn init(config_override: Option<PathBuf>) -> Result<Self> {
        let env_override = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::new(config_override.or(env_override))
    }

    fn new(config_override: Option<PathBuf>) -> Result<Self> {
        let config_dir = match config_override {
            Some(path) => path,
            None => directories::ProjectDirs::from("", "", "plex-organize")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".")),
        };

        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory {:?}", config_dir))?;

        Ok(Self { config_dir })
    }

    /// Get the config directory
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Get the settings file path
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    /// Default location of the library export
    pub fn default_library_path(&self) -> PathBuf {
        self.config_dir.join("library.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_creation() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("nested").join("config");

        let paths = Paths::new(Some(config.clone())).unwrap();

        assert!(paths.config_dir().exists());
        assert_eq!(paths.settings_path(), config.join("settings.json"));
        assert_eq!(paths.default_library_path(), config.join("library.json"));
    }
}
