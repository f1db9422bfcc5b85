//! Videos subcommand handler

use std::path::Path;

use anyhow::{Context, Result};

use subseek::api::Catalog;
use subseek::render::{terminal_width, video_table};
use subseek::theme::current_theme;

use super::{backend, load_config};

pub async fn handle(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let videos = backend(&config)?
        .list_videos()
        .await
        .context("Failed to list videos")?;

    println!("{}", video_table(&videos, &current_theme(), terminal_width()));
    Ok(())
}
