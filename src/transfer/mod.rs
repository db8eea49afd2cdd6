//! Stream retrieval
//!
//! Downloads run as background tasks: the engine streams a resolved URL to
//! disk chunk by chunk and reports progress over an mpsc channel that the
//! shell drains on its tick. [`run`] is the confirm-time orchestration: it
//! ensures the library tree, then resolves and retrieves each enabled
//! selection in turn.

pub mod progress;

pub use progress::TransferProgress;

use crate::catalog::{MediaKind, ResolvedStream, StreamCatalog, StreamCriteria};
use crate::discovery::DownloadRequest;
use crate::utils::error::ElysiumError;
use crate::utils::library::MediaLibrary;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

/// Streams resolved URLs to disk
pub struct TransferEngine {
    client: reqwest::Client,
}

impl TransferEngine {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Retrieve one stream into `dir/filename`, reporting progress as chunks
    /// land. Returns the path of the written file.
    pub async fn retrieve(
        &self,
        stream: &ResolvedStream,
        dir: &Path,
        filename: &str,
        kind: MediaKind,
        progress: UnboundedSender<TransferProgress>,
    ) -> Result<PathBuf, ElysiumError> {
        let path = dir.join(filename);
        info!(kind = %kind, path = %path.display(), "starting transfer");

        let response = self
            .client
            .get(&stream.direct_url)
            .send()
            .await?
            .error_for_status()?;

        let total = response.content_length().or(stream.filesize);
        let mut body = response.bytes_stream();
        let mut file = tokio::fs::File::create(&path).await?;
        let mut received: u64 = 0;

        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            received += chunk.len() as u64;
            // A closed channel only means nobody is watching anymore.
            let _ = progress.send(TransferProgress {
                kind,
                received,
                total,
            });
        }

        file.sync_all().await?;
        debug!(bytes = received, "transfer finished");
        Ok(path)
    }
}

impl Default for TransferEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve and retrieve every enabled selection of a confirmed download.
///
/// Audio first, then video, matching the confirm order of the dialog. Any
/// stage error aborts the remainder and is surfaced to the shell.
pub async fn run(
    catalog: Arc<dyn StreamCatalog>,
    library: MediaLibrary,
    request: DownloadRequest,
    progress: UnboundedSender<TransferProgress>,
) -> Result<Vec<PathBuf>, ElysiumError> {
    library.ensure().await?;

    let engine = TransferEngine::new();
    let mut saved = Vec::new();

    if let Some(selection) = &request.audio {
        let criteria = StreamCriteria::Audio {
            bitrate: selection.quality.clone(),
        };
        let stream = catalog.resolve(request.url.as_str(), &criteria).await?;
        let filename = format!("{}.{}", request.base_name, selection.format.to_lowercase());
        let path = engine
            .retrieve(
                &stream,
                &library.dir_for(MediaKind::Audio),
                &filename,
                MediaKind::Audio,
                progress.clone(),
            )
            .await?;
        saved.push(path);
    }

    if let Some(selection) = &request.video {
        let criteria = StreamCriteria::Video {
            resolution: selection.quality.clone(),
            ext: selection.container.ext().to_string(),
        };
        let stream = catalog.resolve(request.url.as_str(), &criteria).await?;
        let filename = format!("{}.{}", request.base_name, selection.container.ext());
        let path = engine
            .retrieve(
                &stream,
                &library.dir_for(MediaKind::Video),
                &filename,
                MediaKind::Video,
                progress,
            )
            .await?;
        saved.push(path);
    }

    Ok(saved)
}
