//! Subtitle track attachment.
//!
//! Tracks are attached to the session's media element without reloading it,
//! so attaching never starts a new load cycle and never disturbs a pending
//! seek.

use tracing::debug;

use crate::api::{Language, VideoId};
use crate::media::{MediaElement, TextTrack, TrackMode};
use crate::player::VideoSession;

/// Default location of extracted subtitle files under the media root.
pub const DEFAULT_SUBTITLE_URL_TEMPLATE: &str = "{media}subtitles/{video}_{lang}.vtt";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackError {
    #[error("No video is loaded to attach subtitles to")]
    NoVideoSelected,
}

/// Builds and attaches subtitle tracks for the loaded video.
#[derive(Debug, Clone)]
pub struct TrackManager {
    media_base: String,
    url_template: String,
    preferred_language: Option<String>,
}

impl TrackManager {
    /// `url_template` may use `{media}`, `{video}` and `{lang}`.
    pub fn new(media_base: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            media_base: media_base.into(),
            url_template: url_template.into(),
            preferred_language: None,
        }
    }

    /// Language shown by default when available.
    pub fn with_preferred_language(mut self, code: Option<String>) -> Self {
        self.preferred_language = code;
        self
    }

    pub fn track_url(&self, video: VideoId, language: &str) -> String {
        self.url_template
            .replace("{media}", &self.media_base)
            .replace("{video}", &video.to_string())
            .replace("{lang}", language)
    }

    /// Replace the element's tracks with one per language.
    ///
    /// The preferred language (or the first one) is shown, the rest hidden.
    pub fn attach<M: MediaElement>(
        &self,
        session: &mut VideoSession<M>,
        languages: &[Language],
    ) -> Result<Vec<TextTrack>, TrackError> {
        let video = session.video_id().ok_or(TrackError::NoVideoSelected)?;

        let showing = self
            .preferred_language
            .as_deref()
            .filter(|code| languages.iter().any(|l| l.code == *code))
            .or_else(|| languages.first().map(|l| l.code.as_str()));

        let tracks: Vec<TextTrack> = languages
            .iter()
            .map(|language| TextTrack {
                language: language.code.clone(),
                label: language.label().to_string(),
                src: self.track_url(video, &language.code),
                mode: if Some(language.code.as_str()) == showing {
                    TrackMode::Showing
                } else {
                    TrackMode::Hidden
                },
            })
            .collect();

        let media = session.media_mut();
        media.clear_text_tracks();
        for track in &tracks {
            media.add_text_track(track.clone());
        }

        debug!(%video, count = tracks.len(), showing = ?showing, "attached subtitle tracks");
        Ok(tracks)
    }

    /// Remove every text track from the element.
    pub fn detach<M: MediaElement>(&self, session: &mut VideoSession<M>) {
        session.media_mut().clear_text_tracks();
    }
}
