//! Subtitle search: turn backend hits into seek targets.

use tracing::{debug, info};

use crate::api::{SearchResult, SubtitleSearchBackend, TransportError, VideoId};
use crate::media::MediaElement;
use crate::player::{SeekController, SeekError, SeekOutcome, VideoSession};
use crate::timestamp::{self, ParseError, Timestamp};

/// Errors from [`SubtitleSearchClient::search`].
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Search query is empty")]
    EmptyQuery,

    #[error("No video is loaded to search in")]
    NoVideoSelected,

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// A search hit the user can jump to.
#[derive(Debug, Clone, PartialEq)]
pub struct SeekTarget {
    /// 1-based position in the result list
    pub rank: usize,
    pub result: SearchResult,
    /// Parsed timestamp, or why it could not be parsed
    pub timestamp: Result<Timestamp, ParseError>,
}

impl SeekTarget {
    pub fn new(rank: usize, result: SearchResult) -> Self {
        let timestamp = timestamp::parse(&result.raw_timestamp);
        Self {
            rank,
            result,
            timestamp,
        }
    }

    /// Canonical offset, if the timestamp parsed.
    pub fn offset(&self) -> Option<f64> {
        self.timestamp.as_ref().ok().map(Timestamp::as_secs_f64)
    }

    pub fn is_seekable(&self) -> bool {
        self.timestamp.is_ok()
    }
}

/// Result of a search that reached the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The backend answered with an empty list.
    NoResults,
    /// Hits in backend order.
    Results(Vec<SeekTarget>),
}

impl SearchOutcome {
    pub fn targets(&self) -> &[SeekTarget] {
        match self {
            Self::NoResults => &[],
            Self::Results(targets) => targets,
        }
    }

    /// Target at 1-based `rank`.
    pub fn get(&self, rank: usize) -> Option<&SeekTarget> {
        self.targets().iter().find(|t| t.rank == rank)
    }

    pub fn len(&self) -> usize {
        self.targets().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoResults)
    }
}

/// Searches subtitles and hands results to a [`SeekController`].
pub struct SubtitleSearchClient<B> {
    backend: B,
}

impl<B: SubtitleSearchBackend> SubtitleSearchClient<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Search the subtitles of `video`.
    ///
    /// An empty answer is [`SearchOutcome::NoResults`], not an error. Blank
    /// queries are refused without contacting the backend.
    pub async fn search(&self, video: VideoId, query: &str) -> Result<SearchOutcome, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let results = self.backend.search(video, query).await?;
        info!(%video, query, hits = results.len(), "subtitle search finished");

        if results.is_empty() {
            return Ok(SearchOutcome::NoResults);
        }

        let targets: Vec<SeekTarget> = results
            .into_iter()
            .enumerate()
            .map(|(i, result)| SeekTarget::new(i + 1, result))
            .collect();

        for target in targets.iter().filter(|t| !t.is_seekable()) {
            debug!(
                rank = target.rank,
                raw = %target.result.raw_timestamp,
                "result has an unusable timestamp"
            );
        }

        Ok(SearchOutcome::Results(targets))
    }

    /// Search within the video loaded in `session`.
    pub async fn search_session<M: MediaElement>(
        &self,
        session: &VideoSession<M>,
        query: &str,
    ) -> Result<SearchOutcome, SearchError> {
        let video = session.video_id().ok_or(SearchError::NoVideoSelected)?;
        self.search(video, query).await
    }

    /// Jump to `target`.
    pub fn invoke<M: MediaElement + 'static>(
        &self,
        target: &SeekTarget,
        controller: &mut SeekController<M>,
    ) -> Result<SeekOutcome, SeekError> {
        controller.seek_to_timestamp(&target.result.raw_timestamp)
    }
}
