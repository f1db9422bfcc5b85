//! Subtitles subcommand handler

use std::path::Path;

use anyhow::{Context, Result};

use subseek::api::{Catalog, VideoId};
use subseek::render::{subtitle_list, terminal_width};
use subseek::theme::current_theme;

use super::{backend, load_config};

pub async fn handle(config_path: Option<&Path>, video: VideoId) -> Result<()> {
    let config = load_config(config_path)?;
    let subtitles = backend(&config)?
        .subtitles(video)
        .await
        .with_context(|| format!("Failed to fetch subtitles of video {video}"))?;

    println!("{}", subtitle_list(&subtitles, &current_theme(), terminal_width()));
    Ok(())
}
