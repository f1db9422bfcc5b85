//! The video session: one media element and the video currently on it.

use crate::api::{Video, VideoId};
use crate::media::MediaElement;

/// The video loaded into a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedVideo {
    pub id: VideoId,
    pub title: String,
    /// Fully resolved media URL handed to the element
    pub source: String,
}

impl SelectedVideo {
    /// Select a catalog entry, resolving its file against `media_base`.
    pub fn from_catalog(video: &Video, media_base: &str) -> Self {
        Self {
            id: video.id,
            title: video.title.clone(),
            source: video.source_url(media_base),
        }
    }
}

/// Owns the media element and remembers which video it is playing.
///
/// Components get the session by reference instead of looking the element
/// up on their own.
#[derive(Debug)]
pub struct VideoSession<M> {
    media: M,
    video: Option<SelectedVideo>,
}

impl<M: MediaElement> VideoSession<M> {
    pub fn new(media: M) -> Self {
        Self { media, video: None }
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn video(&self) -> Option<&SelectedVideo> {
        self.video.as_ref()
    }

    pub fn video_id(&self) -> Option<VideoId> {
        self.video.as_ref().map(|v| v.id)
    }

    /// Load `video` into the element, replacing whatever was there.
    pub(crate) fn load(&mut self, video: SelectedVideo) {
        self.media.load(&video.source);
        self.video = Some(video);
    }

    pub fn into_media(self) -> M {
        self.media
    }
}
