//! End-to-end seek flows through the public library API

use std::time::Duration;

use subseek::api::{Catalog, HttpBackend, VideoId};
use subseek::media::{HeadlessMedia, MediaElement, MediaEvent, ReadyState, TrackMode};
use subseek::player::{EventOutcome, HeadlessLoader, SeekController, SeekOutcome, SelectedVideo};
use subseek::tracks::{TrackManager, DEFAULT_SUBTITLE_URL_TEMPLATE};
use subseek::SubtitleSearchClient;

use crate::helpers::catalog_stub;

const HITS: &str = r#"[
    {"content": "first line", "timestamp": "00:00:10"},
    {"content": "second line", "timestamp": "00:00:20"}
]"#;

async fn select(
    backend: &HttpBackend,
    controller: &mut SeekController<HeadlessMedia>,
    id: u64,
    media_url: &str,
) {
    let video = backend.find_video(VideoId(id)).await.unwrap().unwrap();
    controller.select_video(SelectedVideo::from_catalog(&video, media_url));
}

#[tokio::test]
async fn search_then_seek_before_metadata_lands_once_loaded() {
    let stub = catalog_stub(HITS);
    let backend = HttpBackend::new(&stub.api_url(), Duration::from_secs(5)).unwrap();
    let mut controller = SeekController::new(HeadlessMedia::new());
    select(&backend, &mut controller, 1, &stub.media_url()).await;

    let languages = backend.languages(VideoId(1)).await.unwrap();
    let tracks = TrackManager::new(stub.media_url(), DEFAULT_SUBTITLE_URL_TEMPLATE)
        .with_preferred_language(Some("rus".to_string()))
        .attach(controller.session_mut(), &languages)
        .unwrap();
    assert_eq!(tracks[1].mode, TrackMode::Showing);
    assert_eq!(tracks[1].src, format!("{}subtitles/1_rus.vtt", stub.media_url()));

    let client = SubtitleSearchClient::new(backend.clone());
    let outcome = client.search_session(controller.session(), "line").await.unwrap();

    // Two quick clicks before anything has loaded: only the last one counts
    let first = client.invoke(outcome.get(1).unwrap(), &mut controller).unwrap();
    let second = client.invoke(outcome.get(2).unwrap(), &mut controller).unwrap();
    assert_eq!(first, SeekOutcome::Deferred { offset: 10.0 });
    assert_eq!(second, SeekOutcome::Deferred { offset: 20.0 });

    let report = HeadlessLoader::new(Duration::from_millis(1)).run(&mut controller).await;

    assert_eq!(report.applied.len(), 1);
    assert_eq!(controller.session().media().seek_log(), &[20.0]);
    assert_eq!(
        controller.session().media().source(),
        Some(format!("{}videos/morning.mp4", stub.media_url()).as_str())
    );
}

#[tokio::test]
async fn switching_videos_drops_seek_for_old_source() {
    let stub = catalog_stub(HITS);
    let backend = HttpBackend::new(&stub.api_url(), Duration::from_secs(5)).unwrap();
    let mut controller = SeekController::new(HeadlessMedia::new());

    select(&backend, &mut controller, 1, &stub.media_url()).await;
    let old_cycle = controller.cycle();
    controller.seek_to_timestamp("00:05:00").unwrap();

    select(&backend, &mut controller, 2, &stub.media_url()).await;
    assert!(controller.pending_seek().is_none());

    // A late event from the first video must not move the second one
    let late = MediaEvent::new(old_cycle, subseek::media::MediaEventKind::LoadedMetadata);
    controller.session_mut().media_mut().advance(ReadyState::HaveMetadata);
    assert_eq!(controller.handle_media_event(&late), EventOutcome::StaleCycleIgnored);

    let report = HeadlessLoader::new(Duration::from_millis(1)).run(&mut controller).await;
    assert!(report.applied.is_empty());
    assert!(controller.session().media().seek_log().is_empty());
    assert_eq!(controller.session().video_id(), Some(VideoId(2)));
}

#[tokio::test]
async fn seek_after_load_is_immediate() {
    let stub = catalog_stub(HITS);
    let backend = HttpBackend::new(&stub.api_url(), Duration::from_secs(5)).unwrap();
    let mut controller = SeekController::new(HeadlessMedia::new());
    select(&backend, &mut controller, 1, &stub.media_url()).await;
    HeadlessLoader::new(Duration::from_millis(1)).run(&mut controller).await;

    let outcome = controller.seek_to_timestamp("0:42").unwrap();

    assert!(matches!(outcome, SeekOutcome::Applied(ref a) if a.offset == 42.0));
    assert_eq!(controller.session().media().current_time(), 42.0);
}
