//! Search subcommand handler

use std::path::Path;

use anyhow::{anyhow, Result};

use subseek::api::VideoId;
use subseek::notice::Notice;
use subseek::render::{search_results, terminal_width};
use subseek::theme::current_theme;
use subseek::SubtitleSearchClient;

use super::{backend, load_config};

/// Search and list results. Finding nothing is not a failure.
pub async fn handle(config_path: Option<&Path>, video: VideoId, query: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let client = SubtitleSearchClient::new(backend(&config)?);
    let theme = current_theme();

    let outcome = client
        .search(video, query)
        .await
        .map_err(|err| anyhow!(Notice::search_error(&err)))?;

    println!("{}", search_results(query, &outcome, &theme, terminal_width()));
    Ok(())
}
