//! Integration tests covering the discovery → selection → retrieval flow
//! against a canned catalog and a local HTTP server; no real site is hit.

use async_trait::async_trait;
use elysium::catalog::{
    MediaKind, PageInfo, ResolvedStream, StreamCatalog, StreamCriteria, StreamDescriptor,
};
use elysium::discovery::{AudioSelection, DiscoveryWorker, DownloadRequest, VideoSelection};
use elysium::gui::dialog::{DialogEvent, DialogMessage, MediaDialog};
use elysium::transfer;
use elysium::utils::{ElysiumError, MediaLibrary};
use elysium::VideoContainer;
use std::collections::BTreeSet;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc;
use url::Url;

/// Catalog with a fixed stream list; resolutions point at `direct_url`.
struct CannedCatalog {
    audio: Vec<StreamDescriptor>,
    video: Vec<StreamDescriptor>,
    direct_url: String,
}

impl CannedCatalog {
    fn streams(&self, kind: MediaKind) -> &[StreamDescriptor] {
        match kind {
            MediaKind::Audio => &self.audio,
            MediaKind::Video => &self.video,
        }
    }
}

#[async_trait]
impl StreamCatalog for CannedCatalog {
    fn id(&self) -> &'static str {
        "canned"
    }

    fn supports(&self, _url: &str) -> bool {
        true
    }

    async fn probe(&self, _url: &str) -> Result<PageInfo, ElysiumError> {
        Ok(PageInfo {
            title: "Canned Page".to_string(),
            uploader: None,
            duration: Some(60),
        })
    }

    async fn enumerate(
        &self,
        _url: &str,
        kind: MediaKind,
    ) -> Result<Vec<StreamDescriptor>, ElysiumError> {
        Ok(self.streams(kind).to_vec())
    }

    async fn resolve(
        &self,
        _url: &str,
        criteria: &StreamCriteria,
    ) -> Result<ResolvedStream, ElysiumError> {
        let descriptor = self
            .streams(criteria.kind())
            .iter()
            .find(|descriptor| criteria.matches(descriptor))
            .ok_or_else(|| ElysiumError::ResolutionMiss(criteria.clone()))?;

        Ok(ResolvedStream {
            direct_url: self.direct_url.clone(),
            ext: descriptor.ext.clone(),
            filesize: descriptor.filesize,
        })
    }
}

fn audio_stream(subtype: &str, bitrate: &str) -> StreamDescriptor {
    StreamDescriptor {
        mime_type: format!("audio/{}", subtype),
        bitrate: Some(bitrate.to_string()),
        resolution: None,
        ext: subtype.to_string(),
        format_id: format!("a-{}-{}", subtype, bitrate),
        filesize: None,
    }
}

fn video_stream(subtype: &str, resolution: &str) -> StreamDescriptor {
    StreamDescriptor {
        mime_type: format!("video/{}", subtype),
        bitrate: None,
        resolution: Some(resolution.to_string()),
        ext: subtype.to_string(),
        format_id: format!("v-{}-{}", subtype, resolution),
        filesize: None,
    }
}

fn page_url() -> Url {
    Url::parse("https://www.youtube.com/watch?v=abc").expect("url")
}

fn canned_catalog(direct_url: &str) -> Arc<CannedCatalog> {
    Arc::new(CannedCatalog {
        audio: vec![
            audio_stream("mp4", "128kbps"),
            audio_stream("mp4", "160kbps"),
            audio_stream("webm", "70kbps"),
        ],
        video: vec![
            video_stream("mp4", "720p"),
            video_stream("quicktime", "1080p"),
        ],
        direct_url: direct_url.to_string(),
    })
}

#[tokio::test]
async fn discovery_builds_both_indexes() {
    let catalog = canned_catalog("http://unused.invalid/");
    let worker = DiscoveryWorker::new(page_url(), catalog);

    let indexes = worker.discover().await.expect("discover");

    assert_eq!(
        indexes.audio["mp4"],
        BTreeSet::from(["128kbps".to_string(), "160kbps".to_string()])
    );
    assert_eq!(indexes.audio["webm"], BTreeSet::from(["70kbps".to_string()]));

    // The quicktime stream is dropped entirely.
    assert_eq!(
        indexes.video.qualities(VideoContainer::Mp4),
        &BTreeSet::from(["720p".to_string()])
    );
    assert!(indexes.video.qualities(VideoContainer::WebM).is_empty());
}

#[tokio::test]
async fn audio_selection_is_saved_into_the_library() {
    let mut server = mockito::Server::new_async().await;
    let stream_mock = server
        .mock("GET", "/stream")
        .with_body("media-bytes")
        .create_async()
        .await;

    let catalog = canned_catalog(&format!("{}/stream", server.url()));
    let temp = TempDir::new().expect("temp dir");
    let library = MediaLibrary::new(temp.path().join("Elysium"));

    // Drive the dialog the way the shell does.
    let worker = DiscoveryWorker::new(page_url(), Arc::clone(&catalog) as Arc<dyn StreamCatalog>);
    let indexes = worker.discover().await.expect("discover");

    let (mut dialog, _command) = MediaDialog::open(
        page_url(),
        Arc::clone(&catalog) as Arc<dyn StreamCatalog>,
        None,
    );
    dialog.update(DialogMessage::DiscoveryComplete(Ok(indexes)));
    dialog.update(DialogMessage::TitleChanged("Test".to_string()));
    dialog.update(DialogMessage::AudioToggled(true));
    dialog.update(DialogMessage::AudioQualitySelected("160kbps".to_string()));

    let event = dialog.update(DialogMessage::Confirm).expect("confirm");
    let DialogEvent::Confirmed(request) = event else {
        panic!("expected a confirmed request");
    };
    assert_eq!(
        request.audio,
        Some(AudioSelection {
            format: "mp4".to_string(),
            quality: "160kbps".to_string(),
        })
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let saved = transfer::run(catalog, library.clone(), request, tx)
        .await
        .expect("transfer");

    let expected = temp.path().join("Elysium").join("Audio").join("Test-.mp4");
    assert_eq!(saved, vec![expected.clone()]);
    assert_eq!(
        std::fs::read(&expected).expect("read saved file"),
        b"media-bytes"
    );

    // Progress was reported, ending at the full body size.
    let mut last = None;
    while let Ok(sample) = rx.try_recv() {
        last = Some(sample);
    }
    let last = last.expect("progress sample");
    assert_eq!(last.kind, MediaKind::Audio);
    assert_eq!(last.received, "media-bytes".len() as u64);

    stream_mock.assert_async().await;
}

#[tokio::test]
async fn video_selection_uses_the_container_extension() {
    let mut server = mockito::Server::new_async().await;
    let _stream_mock = server
        .mock("GET", "/stream")
        .with_body("frames")
        .create_async()
        .await;

    let catalog = canned_catalog(&format!("{}/stream", server.url()));
    let temp = TempDir::new().expect("temp dir");
    let library = MediaLibrary::new(temp.path().join("Elysium"));

    let request = DownloadRequest {
        url: page_url(),
        base_name: "Clip-Someone".to_string(),
        audio: None,
        video: Some(VideoSelection {
            container: VideoContainer::Mp4,
            quality: "720p".to_string(),
        }),
    };

    let (tx, _rx) = mpsc::unbounded_channel();
    let saved = transfer::run(catalog, library, request, tx)
        .await
        .expect("transfer");

    assert_eq!(
        saved,
        vec![temp
            .path()
            .join("Elysium")
            .join("Video")
            .join("Clip-Someone.mp4")]
    );
}

#[tokio::test]
async fn stale_selection_reports_a_resolution_miss() {
    let catalog = canned_catalog("http://unused.invalid/");
    let temp = TempDir::new().expect("temp dir");
    let library = MediaLibrary::new(temp.path().join("Elysium"));

    // A quality that no longer matches any stream.
    let request = DownloadRequest {
        url: page_url(),
        base_name: "Test-".to_string(),
        audio: Some(AudioSelection {
            format: "mp4".to_string(),
            quality: "999kbps".to_string(),
        }),
        video: None,
    };

    let (tx, _rx) = mpsc::unbounded_channel();
    let error = transfer::run(catalog, library, request, tx)
        .await
        .expect_err("must miss");

    assert!(matches!(error, ElysiumError::ResolutionMiss(_)));
    assert!(error.to_string().contains("No stream matches"));
}
