//! yt-dlp backed stream catalog
//!
//! Enumeration and metadata come from `yt-dlp --dump-json`; resolving a
//! selection reuses the direct URL from the dump when present and falls back
//! to `yt-dlp -f <id> -g` otherwise.

use crate::catalog::models::{
    MediaKind, PageInfo, ResolvedStream, StreamCriteria, StreamDescriptor,
};
use crate::catalog::traits::StreamCatalog;
use crate::utils::error::ElysiumError;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use tokio::process::Command as AsyncCommand;
use tracing::{debug, info, warn};

/// Stream catalog backed by the yt-dlp binary
pub struct YtDlpCatalog {
    ytdlp_path: Option<PathBuf>,
}

impl YtDlpCatalog {
    /// Locate yt-dlp and build the catalog.
    ///
    /// A missing binary is not fatal here; the shell still runs and every
    /// catalog call reports [`ElysiumError::CatalogUnavailable`] instead.
    pub fn new() -> Self {
        let ytdlp_path = find_ytdlp();
        match &ytdlp_path {
            Some(path) => info!("Found yt-dlp at: {}", path.display()),
            None => warn!("yt-dlp not found; format discovery will be unavailable"),
        }
        Self { ytdlp_path }
    }

    fn binary(&self) -> Result<&PathBuf, ElysiumError> {
        self.ytdlp_path
            .as_ref()
            .ok_or(ElysiumError::CatalogUnavailable)
    }

    /// Fetch the full page dump for a URL.
    /// Uses: yt-dlp --dump-json --no-download
    async fn fetch_dump(&self, url: &str) -> Result<RawDump, ElysiumError> {
        debug!("Fetching stream dump for URL: {}", url);

        let output = AsyncCommand::new(self.binary()?)
            .arg("--dump-json")
            .arg("--no-download")
            .arg("--no-warnings")
            .arg(url)
            .output()
            .await?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            warn!("yt-dlp dump failed: {}", error_msg);
            return Err(ElysiumError::Discovery(error_msg.trim().to_string()));
        }

        let dump: RawDump = serde_json::from_slice(&output.stdout)?;
        Ok(dump)
    }

    /// Ask yt-dlp for the direct URL of one format.
    /// Uses: yt-dlp -f <format_id> -g
    async fn direct_url(&self, url: &str, format_id: &str) -> Result<String, ElysiumError> {
        debug!("Resolving direct URL for format {} from {}", format_id, url);

        let output = AsyncCommand::new(self.binary()?)
            .arg("-f")
            .arg(format_id)
            .arg("-g")
            .arg("--no-warnings")
            .arg(url)
            .output()
            .await?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            warn!("yt-dlp -g failed: {}", error_msg);
            return Err(ElysiumError::Discovery(error_msg.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Default for YtDlpCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StreamCatalog for YtDlpCatalog {
    fn id(&self) -> &'static str {
        "ytdlp"
    }

    fn supports(&self, url: &str) -> bool {
        url.contains("youtube.com") || url.contains("youtu.be")
    }

    async fn probe(&self, url: &str) -> Result<PageInfo, ElysiumError> {
        let dump = self.fetch_dump(url).await?;
        Ok(PageInfo {
            title: dump.title.unwrap_or_default(),
            uploader: dump.uploader,
            duration: dump.duration.map(|d| d.round() as u64),
        })
    }

    async fn enumerate(
        &self,
        url: &str,
        kind: MediaKind,
    ) -> Result<Vec<StreamDescriptor>, ElysiumError> {
        let dump = self.fetch_dump(url).await?;
        Ok(dump
            .formats
            .iter()
            .filter(|format| format.is_only(kind))
            .map(|format| format.descriptor(kind))
            .collect())
    }

    async fn resolve(
        &self,
        url: &str,
        criteria: &StreamCriteria,
    ) -> Result<ResolvedStream, ElysiumError> {
        let dump = self.fetch_dump(url).await?;
        let kind = criteria.kind();

        let raw = dump
            .formats
            .iter()
            .find(|format| format.is_only(kind) && criteria.matches(&format.descriptor(kind)))
            .ok_or_else(|| ElysiumError::ResolutionMiss(criteria.clone()))?;

        let direct_url = match raw.url.as_deref() {
            Some(direct) if !direct.is_empty() => direct.to_string(),
            _ => self.direct_url(url, &raw.format_id).await?,
        };

        Ok(ResolvedStream {
            direct_url,
            ext: raw.ext.clone(),
            filesize: raw.filesize,
        })
    }
}

// ============================================================
// yt-dlp JSON payload
// ============================================================

#[derive(Debug, Deserialize)]
struct RawDump {
    title: Option<String>,
    uploader: Option<String>,
    duration: Option<f64>,
    #[serde(default)]
    formats: Vec<RawFormat>,
}

#[derive(Debug, Deserialize)]
struct RawFormat {
    format_id: String,
    ext: String,
    vcodec: Option<String>,
    acodec: Option<String>,
    abr: Option<f64>,
    height: Option<u32>,
    format_note: Option<String>,
    filesize: Option<u64>,
    url: Option<String>,
}

fn codec_present(codec: &Option<String>) -> bool {
    matches!(codec.as_deref(), Some(c) if !c.is_empty() && c != "none")
}

impl RawFormat {
    /// Whether this format carries exactly the requested kind and nothing else
    fn is_only(&self, kind: MediaKind) -> bool {
        match kind {
            MediaKind::Audio => codec_present(&self.acodec) && !codec_present(&self.vcodec),
            MediaKind::Video => codec_present(&self.vcodec) && !codec_present(&self.acodec),
        }
    }

    fn descriptor(&self, kind: MediaKind) -> StreamDescriptor {
        StreamDescriptor {
            mime_type: self.mime_type(kind),
            bitrate: self.abr.map(bitrate_label),
            resolution: self.resolution_label(),
            ext: self.ext.clone(),
            format_id: self.format_id.clone(),
            filesize: self.filesize,
        }
    }

    /// Declared MIME type, reconstructed from container and codec the way
    /// DASH manifests declare them: `audio/mp4; codecs="mp4a.40.2"`.
    fn mime_type(&self, kind: MediaKind) -> String {
        let subtype = match self.ext.as_str() {
            "m4a" | "mp4" => "mp4",
            "webm" => "webm",
            "3gp" => "3gpp",
            other => other,
        };
        let codec = match kind {
            MediaKind::Audio => &self.acodec,
            MediaKind::Video => &self.vcodec,
        };
        match codec.as_deref().filter(|c| !c.is_empty() && *c != "none") {
            Some(codec) => format!("{}/{}; codecs=\"{}\"", kind, subtype, codec),
            None => format!("{}/{}", kind, subtype),
        }
    }

    fn resolution_label(&self) -> Option<String> {
        self.height
            .map(|h| format!("{}p", h))
            .or_else(|| self.format_note.clone())
    }
}

fn bitrate_label(abr: f64) -> String {
    format!("{}kbps", abr.round() as u64)
}

// ============================================================
// yt-dlp Detection
// ============================================================

/// Find the yt-dlp binary: system PATH first, then common install locations.
pub fn find_ytdlp() -> Option<PathBuf> {
    if let Ok(path) = which::which("yt-dlp") {
        if path.exists() {
            return Some(path);
        }
    }

    let common_paths = [
        "/opt/homebrew/bin/yt-dlp",
        "/usr/local/bin/yt-dlp",
        "/usr/bin/yt-dlp",
        "~/.local/bin/yt-dlp",
    ];

    for path_str in common_paths {
        let expanded = if let Some(rest) = path_str.strip_prefix("~/") {
            dirs::home_dir()?.join(rest)
        } else {
            PathBuf::from(path_str)
        };

        if expanded.is_file() {
            return Some(expanded);
        }
    }

    None
}
