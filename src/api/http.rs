//! HTTP implementation of the backend traits.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client, Method, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::error::TransportError;
use super::types::{Language, SearchResult, Video, VideoId};
use super::upload::{UploadError, UploadRequest};
use super::{Catalog, SubtitleSearchBackend};
use crate::config::ServerConfig;

/// REST client for the video backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    /// Create a client rooted at `base_url` (e.g. `http://127.0.0.1:8000/api/`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        // Without the trailing slash, Url::join would drop the last segment
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base = Url::parse(&normalized).map_err(|e| TransportError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self { client, base })
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, TransportError> {
        Self::new(&config.base_url, Duration::from_secs(config.request_timeout_secs))
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolve `path` against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base.join(path).map_err(|e| TransportError::InvalidUrl {
            url: format!("{}{}", self.base, path),
            reason: e.to_string(),
        })
    }

    /// URL of the subtitle search for `video`.
    pub fn search_url(&self, video: VideoId, query: &str) -> Result<Url, TransportError> {
        let mut url = self.endpoint("search")?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("video", &video.to_string());
        Ok(url)
    }

    async fn send(&self, method: Method, url: &Url) -> Result<reqwest::Response, TransportError> {
        debug!(%url, %method, "request");
        self.client
            .request(method, url.clone())
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, TransportError> {
        let response = self.send(Method::GET, &url).await?;
        decode(url, response).await
    }
}

/// Fail on a non-success status, keeping the body for the message.
async fn check_status(url: &Url, response: reqwest::Response) -> Result<reqwest::Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(%url, status = status.as_u16(), "backend returned an error status");
    Err(TransportError::Status {
        url: url.to_string(),
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(url: Url, response: reqwest::Response) -> Result<T, TransportError> {
    let response = check_status(&url, response).await?;
    let body = response.bytes().await.map_err(|source| TransportError::Request {
        url: url.to_string(),
        source,
    })?;

    serde_json::from_slice(&body).map_err(|source| TransportError::Decode {
        url: url.to_string(),
        source,
    })
}

#[async_trait(?Send)]
impl SubtitleSearchBackend for HttpBackend {
    async fn search(&self, video: VideoId, query: &str) -> Result<Vec<SearchResult>, TransportError> {
        let url = self.search_url(video, query)?;
        self.get_json(url).await
    }
}

#[async_trait(?Send)]
impl Catalog for HttpBackend {
    async fn list_videos(&self) -> Result<Vec<Video>, TransportError> {
        let url = self.endpoint("videos/")?;
        self.get_json(url).await
    }

    async fn video(&self, id: VideoId) -> Result<Video, TransportError> {
        let url = self.endpoint(&format!("videos/{id}/"))?;
        self.get_json(url).await
    }

    async fn delete_video(&self, id: VideoId) -> Result<(), TransportError> {
        let url = self.endpoint(&format!("videos/{id}/"))?;
        let response = self.send(Method::DELETE, &url).await?;
        check_status(&url, response).await?;
        info!(%url, "deleted video");
        Ok(())
    }

    async fn subtitles(&self, video: VideoId) -> Result<Vec<SearchResult>, TransportError> {
        let url = self.endpoint(&format!("videos/{video}/subtitles/"))?;
        self.get_json(url).await
    }

    async fn languages(&self, video: VideoId) -> Result<Vec<Language>, TransportError> {
        let url = self.endpoint(&format!("videos/{video}/languages/"))?;
        self.get_json(url).await
    }

    async fn upload(&self, request: &UploadRequest) -> Result<Video, UploadError> {
        let url = self.endpoint("upload/")?;
        let bytes = tokio::fs::read(&request.path).await?;

        let part = multipart::Part::bytes(bytes)
            .file_name(request.file_name())
            .mime_str(request.content_type())
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;
        let form = multipart::Form::new()
            .text("title", request.title.clone())
            .part("video_file", part);

        info!(%url, title = %request.title, bytes = request.size_bytes, "uploading video");
        let response = self
            .client
            .post(url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;

        Ok(decode(url, response).await?)
    }
}
