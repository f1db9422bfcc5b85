//! Languages subcommand handler

use std::path::Path;

use anyhow::{Context, Result};

use subseek::api::{Catalog, VideoId};
use subseek::render::language_list;
use subseek::theme::current_theme;

use super::{backend, load_config};

pub async fn handle(config_path: Option<&Path>, video: VideoId) -> Result<()> {
    let config = load_config(config_path)?;
    let languages = backend(&config)?
        .languages(video)
        .await
        .with_context(|| format!("Failed to fetch subtitle languages of video {video}"))?;

    println!("{}", language_list(&languages, &current_theme()));
    Ok(())
}
