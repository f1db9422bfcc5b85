//! Delete subcommand handler

use std::path::Path;

use anyhow::{bail, Context, Result};

use subseek::api::{Catalog, VideoId};
use subseek::theme::current_theme;

use super::{backend, load_config};

/// Delete a video. Nothing is sent without `--yes`.
pub async fn handle(config_path: Option<&Path>, video: VideoId, yes: bool) -> Result<()> {
    if !yes {
        bail!("Refusing to delete video {video} without --yes");
    }

    let config = load_config(config_path)?;
    backend(&config)?
        .delete_video(video)
        .await
        .with_context(|| format!("Failed to delete video {video}"))?;

    println!("{}", current_theme().success_text(&format!("Deleted video {video}")));
    Ok(())
}
