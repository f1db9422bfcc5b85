//! Subcommand handlers

pub mod completions;
pub mod config;
pub mod delete;
pub mod languages;
pub mod parse;
pub mod play;
pub mod search;
pub mod subtitles;
pub mod upload;
pub mod videos;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use subseek::api::HttpBackend;
use subseek::Config;

/// Config file to use: `--config` if given, else the default location.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(Config::config_path()?),
    }
}

pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = config_path(explicit)?;
    Config::load_from(&path).with_context(|| format!("Failed to load {}", path.display()))
}

pub fn backend(config: &Config) -> Result<HttpBackend> {
    HttpBackend::from_config(&config.server).context("Invalid server settings")
}
