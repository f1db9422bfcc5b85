//! Play subcommand handler
//!
//! Drives a headless media element the way a browser page would: select the
//! video, attach its subtitle tracks, request the seek, then let the element
//! load while the controller applies the seek once metadata arrives.

use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};

use subseek::api::{Catalog, HttpBackend, VideoId};
use subseek::media::{HeadlessMedia, MediaElement, TrackMode};
use subseek::notice::Notice;
use subseek::player::{HeadlessLoader, SeekController, SelectedVideo};
use subseek::theme::{current_theme, Theme};
use subseek::timestamp::Timestamp;
use subseek::tracks::TrackManager;
use subseek::{Config, SubtitleSearchClient};

use super::{backend, load_config};

/// Where to jump once the video is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Load only
    Start,
    Timestamp(String),
    /// The `pick`-th result (1-based) of a subtitle search
    Search { query: String, pick: usize },
}

pub async fn handle(config_path: Option<&Path>, video: VideoId, target: Target) -> Result<()> {
    let config = load_config(config_path)?;
    let backend = backend(&config)?;
    let theme = current_theme();

    let entry = backend
        .find_video(video)
        .await
        .with_context(|| format!("Failed to look up video {video}"))?
        .ok_or_else(|| anyhow!("No video with id {video}"))?;

    let mut controller =
        SeekController::new(HeadlessMedia::new().with_autoplay(config.player.autoplay));
    let cycle = controller.select_video(SelectedVideo::from_catalog(&entry, &config.server.media_url));
    println!(
        "{} {} {}",
        theme.secondary_text("Loading"),
        theme.primary_text(&entry.title),
        theme.secondary_text(&format!("({cycle})"))
    );

    attach_tracks(&backend, &config, &mut controller, &theme).await;

    let raw = match target {
        Target::Start => None,
        Target::Timestamp(raw) => Some(raw),
        Target::Search { query, pick } => {
            match resolve_search(backend.clone(), &controller, &query, pick, &theme).await? {
                Some(raw) => Some(raw),
                None => return Ok(()),
            }
        }
    };

    if let Some(raw) = raw {
        let outcome = controller
            .seek_to_timestamp(&raw)
            .map_err(|err| anyhow!(Notice::seek_error(&err)))?;
        println!("{}", theme.notice(&Notice::seek_outcome(&outcome)));
    }

    let loader = HeadlessLoader::new(Duration::from_millis(config.player.load_step_ms))
        .with_metadata_timeout(config.player.metadata_timeout_secs.map(Duration::from_secs));
    let report = loader.run(&mut controller).await;

    for applied in &report.applied {
        println!("{}", theme.notice(&Notice::seek_applied(applied)));
    }
    for rejected in &report.rejected {
        println!("{}", theme.notice(&Notice::warning(rejected.to_string())));
    }
    if let Some(pending) = &report.timed_out {
        let waited = config.player.metadata_timeout_secs.unwrap_or_default();
        bail!(Notice::seek_timed_out(pending.offset, waited));
    }

    print_position(controller.session().media(), &theme);
    Ok(())
}

/// Attach one track per subtitle language. Failures only produce a warning.
async fn attach_tracks(
    backend: &HttpBackend,
    config: &Config,
    controller: &mut SeekController<HeadlessMedia>,
    theme: &Theme,
) {
    let Some(video) = controller.session().video_id() else {
        return;
    };

    let languages = match backend.languages(video).await {
        Ok(languages) => languages,
        Err(err) => {
            eprintln!("{}", theme.notice(&Notice::transport("Could not load subtitles", &err)));
            return;
        }
    };

    let manager = TrackManager::new(&config.server.media_url, &config.player.subtitle_url_template)
        .with_preferred_language(config.player.preferred_language.clone());
    match manager.attach(controller.session_mut(), &languages) {
        Ok(tracks) if tracks.is_empty() => {
            println!("{}", theme.secondary_text("No subtitle tracks"));
        }
        Ok(tracks) => {
            let labels: Vec<String> = tracks
                .iter()
                .map(|t| match t.mode {
                    TrackMode::Showing => format!("{} (shown)", t.label),
                    TrackMode::Hidden | TrackMode::Disabled => t.label.clone(),
                })
                .collect();
            println!(
                "{} {}",
                theme.secondary_text("Subtitles:"),
                theme.primary_text(&labels.join(", "))
            );
        }
        Err(err) => eprintln!("{}", theme.notice(&Notice::track_error(&err))),
    }
}

/// Run the search and return the chosen result's timestamp.
///
/// `Ok(None)` when the search found nothing.
async fn resolve_search(
    backend: HttpBackend,
    controller: &SeekController<HeadlessMedia>,
    query: &str,
    pick: usize,
    theme: &Theme,
) -> Result<Option<String>> {
    let client = SubtitleSearchClient::new(backend);
    let outcome = client
        .search_session(controller.session(), query)
        .await
        .map_err(|err| anyhow!(Notice::search_error(&err)))?;

    if outcome.is_empty() {
        println!("{}", theme.notice(&Notice::search_outcome(query, &outcome)));
        return Ok(None);
    }

    let target = outcome
        .get(pick)
        .ok_or_else(|| anyhow!("Only {} result(s) for {:?}, cannot pick #{pick}", outcome.len(), query.trim()))?;
    println!(
        "{} {}",
        theme.secondary_text(&format!("#{} of {}:", target.rank, outcome.len())),
        theme.primary_text(&target.result.content)
    );
    Ok(Some(target.result.raw_timestamp.clone()))
}

fn print_position(media: &HeadlessMedia, theme: &Theme) {
    let position = Timestamp::from_secs(media.current_time())
        .map(|t| t.to_string())
        .unwrap_or_else(|_| format!("{}s", media.current_time()));
    let state = if media.is_paused() { "paused" } else { "playing" };
    println!(
        "{} {} {}",
        theme.secondary_text("Position"),
        theme.accent_text(&position),
        theme.secondary_text(&format!("({state})"))
    );
}
