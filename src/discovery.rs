//! Format discovery
//!
//! One discovery run enumerates the audio-only and video-only streams for a
//! URL and partitions them into the two quality indexes the selection dialog
//! reads. The run happens off the interactive thread and completes exactly
//! once; the indexes are never mutated afterwards.

use crate::catalog::{MediaKind, StreamCatalog, StreamDescriptor};
use crate::utils::error::ElysiumError;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// The two video containers offered for download. Audio formats are open
/// ended; video streams in any other container are dropped during
/// partitioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VideoContainer {
    Mp4,
    WebM,
}

impl VideoContainer {
    pub const ALL: [VideoContainer; 2] = [VideoContainer::Mp4, VideoContainer::WebM];

    pub fn label(self) -> &'static str {
        match self {
            VideoContainer::Mp4 => "MP4",
            VideoContainer::WebM => "WebM",
        }
    }

    /// File extension: the label, lowercased
    pub fn ext(self) -> &'static str {
        match self {
            VideoContainer::Mp4 => "mp4",
            VideoContainer::WebM => "webm",
        }
    }

    pub fn from_subtype(subtype: &str) -> Option<Self> {
        match subtype {
            "mp4" => Some(VideoContainer::Mp4),
            "webm" => Some(VideoContainer::WebM),
            _ => None,
        }
    }
}

impl fmt::Display for VideoContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Audio quality index: discovered format key → set of bitrate labels
pub type AudioIndex = BTreeMap<String, BTreeSet<String>>;

/// Video quality index: exactly two buckets, both always present
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoIndex {
    mp4: BTreeSet<String>,
    webm: BTreeSet<String>,
}

impl VideoIndex {
    pub fn qualities(&self, container: VideoContainer) -> &BTreeSet<String> {
        match container {
            VideoContainer::Mp4 => &self.mp4,
            VideoContainer::WebM => &self.webm,
        }
    }

    fn insert(&mut self, container: VideoContainer, quality: String) {
        match container {
            VideoContainer::Mp4 => self.mp4.insert(quality),
            VideoContainer::WebM => self.webm.insert(quality),
        };
    }

    /// Containers that actually have something to offer
    pub fn available(&self) -> Vec<VideoContainer> {
        VideoContainer::ALL
            .into_iter()
            .filter(|container| !self.qualities(*container).is_empty())
            .collect()
    }
}

/// Result of one discovery run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatIndexes {
    pub audio: AudioIndex,
    pub video: VideoIndex,
}

/// Group audio streams by declared subtype; each key's set collects the
/// bitrate labels seen for it, duplicates collapsing.
pub fn partition_audio(streams: &[StreamDescriptor]) -> AudioIndex {
    let mut index = AudioIndex::new();
    for stream in streams {
        let (Some(subtype), Some(bitrate)) = (stream.subtype(), stream.bitrate.as_ref()) else {
            continue;
        };
        index
            .entry(subtype.to_string())
            .or_default()
            .insert(bitrate.clone());
    }
    index
}

/// Group video streams into the two fixed containers. Streams with any other
/// subtype are silently dropped; that is the intended filter, not an error.
pub fn partition_video(streams: &[StreamDescriptor]) -> VideoIndex {
    let mut index = VideoIndex::default();
    for stream in streams {
        let (Some(subtype), Some(resolution)) = (stream.subtype(), stream.resolution.as_ref())
        else {
            continue;
        };
        if let Some(container) = VideoContainer::from_subtype(subtype) {
            index.insert(container, resolution.clone());
        }
    }
    index
}

/// One-shot background discovery for a single dialog.
///
/// The dialog owns the task through an abort handle; an aborted run's late
/// completion is discarded by the caller.
pub struct DiscoveryWorker {
    url: Url,
    catalog: Arc<dyn StreamCatalog>,
}

impl DiscoveryWorker {
    pub fn new(url: Url, catalog: Arc<dyn StreamCatalog>) -> Self {
        Self { url, catalog }
    }

    /// Enumerate both media kinds and build the indexes.
    ///
    /// Resolves exactly once, with either both complete indexes or an error;
    /// no partial results are observable.
    pub async fn discover(self) -> Result<FormatIndexes, ElysiumError> {
        let audio_streams = self.catalog.enumerate(self.url.as_str(), MediaKind::Audio).await?;
        let video_streams = self.catalog.enumerate(self.url.as_str(), MediaKind::Video).await?;

        let indexes = FormatIndexes {
            audio: partition_audio(&audio_streams),
            video: partition_video(&video_streams),
        };
        debug!(
            audio_formats = indexes.audio.len(),
            video_formats = indexes.video.available().len(),
            "discovery complete"
        );
        Ok(indexes)
    }
}

/// The user's audio pick: a discovered format key plus one of its qualities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSelection {
    pub format: String,
    pub quality: String,
}

/// The user's video pick: one of the fixed containers plus a resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSelection {
    pub container: VideoContainer,
    pub quality: String,
}

/// Everything the confirm action hands to the transfer stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: Url,
    pub base_name: String,
    pub audio: Option<AudioSelection>,
    pub video: Option<VideoSelection>,
}
