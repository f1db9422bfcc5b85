//! Client side of the video backend's REST API.
//!
//! The backend is consumed through two traits so the controller and its tests
//! never depend on HTTP directly:
//!
//! - [`SubtitleSearchBackend`]: `GET search?query=<text>&video=<id>`
//! - [`Catalog`]: `GET videos/`, `GET|DELETE videos/{id}/`,
//!   `GET videos/{id}/subtitles/`, `GET videos/{id}/languages/`, `POST upload/`
//!
//! [`HttpBackend`] implements both with `reqwest`. The futures are not `Send`;
//! everything runs on one thread.

mod error;
mod http;
mod types;
mod upload;

pub use error::TransportError;
pub use http::HttpBackend;
pub use types::{Language, SearchResult, SubtitleLanguage, Video, VideoId};
pub use upload::{UploadError, UploadRequest, SUPPORTED_EXTENSIONS};

use async_trait::async_trait;

/// Full-text search over a video's subtitles.
#[async_trait(?Send)]
pub trait SubtitleSearchBackend {
    /// Results in backend order (most relevant first).
    async fn search(&self, video: VideoId, query: &str) -> Result<Vec<SearchResult>, TransportError>;
}

/// Video catalog and upload endpoints.
#[async_trait(?Send)]
pub trait Catalog {
    async fn list_videos(&self) -> Result<Vec<Video>, TransportError>;

    /// A single catalog entry. Unknown ids are a 404 [`TransportError::Status`].
    async fn video(&self, id: VideoId) -> Result<Video, TransportError>;

    /// Remove a video with its subtitles.
    async fn delete_video(&self, id: VideoId) -> Result<(), TransportError>;

    /// Every subtitle line of `video`, in the same shape as search hits.
    async fn subtitles(&self, video: VideoId) -> Result<Vec<SearchResult>, TransportError>;

    /// Subtitle languages available for `video`.
    async fn languages(&self, video: VideoId) -> Result<Vec<Language>, TransportError>;

    async fn upload(&self, request: &UploadRequest) -> Result<Video, UploadError>;

    /// Look a video up by id. `Ok(None)` when the catalog has no such entry.
    async fn find_video(&self, id: VideoId) -> Result<Option<Video>, TransportError> {
        match self.video(id).await {
            Ok(video) => Ok(Some(video)),
            Err(err) if err.status() == Some(404) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
