//! Integration tests for the HTTP backend against a stub server

use std::time::Duration;

use tempfile::TempDir;

use subseek::api::{
    Catalog, HttpBackend, SubtitleLanguage, TransportError, UploadError, UploadRequest, VideoId,
};
use subseek::search::{SearchError, SearchOutcome};
use subseek::SubtitleSearchClient;

use crate::helpers::{catalog_stub, video_json, videos_json, StubServer};

fn backend(stub: &StubServer) -> HttpBackend {
    HttpBackend::new(&stub.api_url(), Duration::from_secs(5)).unwrap()
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn lists_videos() {
    let stub = catalog_stub("[]");

    let videos = backend(&stub).list_videos().await.unwrap();

    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0].title, "Morning Show");
    assert_eq!(
        videos[1].source_url(&stub.media_url()),
        format!("{}videos/evening.mkv", stub.media_url())
    );
}

#[tokio::test]
async fn fetches_single_video() {
    let stub = catalog_stub("[]");

    let video = backend(&stub).video(VideoId(2)).await.unwrap();

    assert_eq!(video.title, "Evening News");
    assert_eq!(stub.requests_to("/api/videos/2/").len(), 1);
    assert!(stub.requests_to("/api/videos/").is_empty());
}

#[tokio::test]
async fn find_video_returns_none_for_unknown_id() {
    let stub = catalog_stub("[]");
    let backend = backend(&stub);

    assert_eq!(
        backend.find_video(VideoId(2)).await.unwrap().map(|v| v.title),
        Some("Evening News".to_string())
    );
    assert!(backend.find_video(VideoId(99)).await.unwrap().is_none());
    assert_eq!(backend.video(VideoId(99)).await.unwrap_err().status(), Some(404));
}

#[tokio::test]
async fn find_video_propagates_server_errors() {
    let stub = StubServer::builder()
        .route("GET", "/api/videos/5/", 500, "{}")
        .start();

    let err = backend(&stub).find_video(VideoId(5)).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn deletes_video() {
    let stub = StubServer::builder()
        .route("DELETE", "/api/videos/2/", 204, "")
        .start();

    backend(&stub).delete_video(VideoId(2)).await.unwrap();

    let deletes = stub.requests_to("/api/videos/2/");
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].method, "DELETE");
}

#[tokio::test]
async fn deleting_unknown_video_is_status_error() {
    let stub = StubServer::builder().get("/api/videos/1/", video_json(1)).start();

    let err = backend(&stub).delete_video(VideoId(1)).await.unwrap_err();

    // Only GET is routed for that path
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn lists_subtitles_of_video() {
    let stub = StubServer::builder()
        .get(
            "/api/videos/1/subtitles/",
            r#"[{"id": 1, "content": "Hello", "timestamp": "00:00:01,000", "language": 3},
                {"id": 2, "content": "Bye", "timestamp": "00:00:04,500", "language": 3}]"#,
        )
        .start();

    let subtitles = backend(&stub).subtitles(VideoId(1)).await.unwrap();

    let contents: Vec<&str> = subtitles.iter().map(|s| s.content.as_str()).collect();
    assert_eq!(contents, vec!["Hello", "Bye"]);
    assert_eq!(subtitles[1].raw_timestamp, "00:00:04,500");
    assert_eq!(subtitles[0].language, Some(SubtitleLanguage::Id(3)));
}

#[tokio::test]
async fn fetches_languages() {
    let stub = catalog_stub("[]");

    let languages = backend(&stub).languages(VideoId(1)).await.unwrap();

    let codes: Vec<&str> = languages.iter().map(|l| l.code.as_str()).collect();
    assert_eq!(codes, vec!["eng", "rus"]);
    assert_eq!(stub.requests_to("/api/videos/1/languages/").len(), 1);
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn search_sends_query_and_video() {
    let stub = catalog_stub(
        r#"[{"id": 7, "content": "Good morning!", "timestamp": "00:00:03,200", "language": 1},
            {"id": 8, "content": "Morning again", "timestamp_start": "00:10:00.000"},
            {"id": 9, "content": "Morning, all", "timestamp": "00:12:00", "language": "eng"}]"#,
    );
    let client = SubtitleSearchClient::new(backend(&stub));

    let outcome = client.search(VideoId(1), "good morning").await.unwrap();

    assert_eq!(outcome.len(), 3);
    assert_eq!(outcome.get(1).unwrap().offset(), Some(3.2));
    assert_eq!(outcome.get(2).unwrap().offset(), Some(600.0));
    assert_eq!(outcome.get(1).unwrap().result.language, Some(SubtitleLanguage::Id(1)));
    assert_eq!(outcome.get(2).unwrap().result.language, None);
    assert_eq!(
        outcome.get(3).unwrap().result.language,
        Some(SubtitleLanguage::Code("eng".to_string()))
    );

    let searches = stub.requests_to("/api/search");
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].query, "query=good+morning&video=1");
}

#[tokio::test]
async fn empty_search_is_no_results() {
    let stub = catalog_stub("[]");
    let client = SubtitleSearchClient::new(backend(&stub));

    let outcome = client.search(VideoId(1), "silence").await.unwrap();

    assert_eq!(outcome, SearchOutcome::NoResults);
}

#[tokio::test]
async fn null_timestamp_only_spoils_its_result() {
    let stub = catalog_stub(
        r#"[{"content": "no time", "timestamp": null}, {"content": "ok", "timestamp": "1:00"}]"#,
    );
    let client = SubtitleSearchClient::new(backend(&stub));

    let outcome = client.search(VideoId(1), "x").await.unwrap();

    assert!(!outcome.get(1).unwrap().is_seekable());
    assert_eq!(outcome.get(2).unwrap().offset(), Some(60.0));
}

#[tokio::test]
async fn server_error_is_retryable_transport_error() {
    let stub = StubServer::builder()
        .route("GET", "/api/search", 500, r#"{"error": "boom"}"#)
        .start();
    let client = SubtitleSearchClient::new(backend(&stub));

    let err = client.search(VideoId(1), "hello").await.unwrap_err();

    match err {
        SearchError::Transport(TransportError::Status { status, body, .. }) => {
            assert_eq!(status, 500);
            assert!(body.contains("boom"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn bad_request_is_not_retryable() {
    let stub = StubServer::builder()
        .route("GET", "/api/search", 400, r#"{"error": "Query parameter is required."}"#)
        .start();

    let err = backend(&stub).list_videos().await;
    // Unrouted path answers 404
    assert_eq!(err.unwrap_err().status(), Some(404));

    let client = SubtitleSearchClient::new(backend(&stub));
    let SearchError::Transport(err) = client.search(VideoId(1), "x").await.unwrap_err() else {
        panic!("expected transport error");
    };
    assert_eq!(err.status(), Some(400));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let stub = StubServer::builder().get("/api/videos/", "{not json").start();

    let err = backend(&stub).list_videos().await.unwrap_err();

    assert!(matches!(err, TransportError::Decode { .. }));
}

#[tokio::test]
async fn refused_connection_is_request_error() {
    // Bind then drop to get a port nothing listens on
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let backend = HttpBackend::new(&format!("http://127.0.0.1:{port}/api/"), Duration::from_secs(2)).unwrap();

    let err = backend.list_videos().await.unwrap_err();

    assert!(matches!(err, TransportError::Request { .. }));
    assert!(err.is_retryable());
}

// ============================================================================
// Upload
// ============================================================================

#[tokio::test]
async fn upload_sends_multipart_form() {
    let created = r#"{"id": 3, "title": "Holiday", "video_file": "/media/videos/holiday.mp4"}"#;
    let stub = StubServer::builder()
        .route("POST", "/api/upload/", 201, created)
        .get("/api/videos/", videos_json())
        .start();
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("holiday.mp4");
    std::fs::write(&file, b"fake video bytes").unwrap();

    let request = UploadRequest::new(&file, None).unwrap();
    let video = backend(&stub).upload(&request).await.unwrap();

    assert_eq!(video.id, VideoId(3));
    let uploads = stub.requests_to("/api/upload/");
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].method, "POST");
    let body = uploads[0].body_text();
    assert!(body.contains("name=\"title\""));
    assert!(body.contains("Holiday") || body.contains("holiday"));
    assert!(body.contains("name=\"video_file\"; filename=\"holiday.mp4\""));
    assert!(body.contains("fake video bytes"));
}

#[tokio::test]
async fn upload_rejection_surfaces_status() {
    let stub = StubServer::builder()
        .route("POST", "/api/upload/", 400, r#"{"video_file": ["Unsupported file extension."]}"#)
        .start();
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("clip.avi");
    std::fs::write(&file, b"avi").unwrap();

    let request = UploadRequest::new(&file, Some("Clip".to_string())).unwrap();
    let err = backend(&stub).upload(&request).await.unwrap_err();

    assert!(matches!(
        err,
        UploadError::Transport(TransportError::Status { status: 400, .. })
    ));
}
