//! Configuration module for plex-organize
//!
//! This module contains the user settings and path management.

mod paths;
mod user_config;

pub use paths::{Paths, CONFIG_PATH_ENV};
pub use user_config::{UpgradeConfig, UserConfig};
