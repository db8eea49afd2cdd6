//! Download library layout
//!
//! All saved media lands in a fixed directory tree under the user's home:
//! `~/Music/Elysium/Audio` and `~/Music/Elysium/Video`. Files are named
//! `{title}-{artist}.{ext}` from the dialog's free-form inputs.

use crate::catalog::MediaKind;
use crate::utils::error::ElysiumError;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Derive the base filename from the user-entered title and artist.
///
/// Surrounding whitespace is trimmed, internal spaces become underscores,
/// and the two parts are joined with a dash. Empty inputs are permitted and
/// yield `"-"` or partial names; no validation is performed.
pub fn derive_base_name(title: &str, artist: &str) -> String {
    let title = title.trim().replace(' ', "_");
    let artist = artist.trim().replace(' ', "_");
    format!("{}-{}", title, artist)
}

/// The fixed on-disk tree downloads are written into
#[derive(Debug, Clone)]
pub struct MediaLibrary {
    root: PathBuf,
}

impl MediaLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dir_for(&self, kind: MediaKind) -> PathBuf {
        match kind {
            MediaKind::Audio => self.root.join("Audio"),
            MediaKind::Video => self.root.join("Video"),
        }
    }

    /// Destination path for one download
    pub fn target(&self, kind: MediaKind, base_name: &str, ext: &str) -> PathBuf {
        self.dir_for(kind).join(format!("{}.{}", base_name, ext))
    }

    /// Create the root and both kind subdirectories.
    ///
    /// Safe to call when the tree already exists; `create_dir_all` makes the
    /// whole operation idempotent.
    pub async fn ensure(&self) -> Result<(), ElysiumError> {
        debug!(root = %self.root.display(), "ensuring library directories");
        fs::create_dir_all(&self.root).await?;
        fs::create_dir_all(self.dir_for(MediaKind::Audio)).await?;
        fs::create_dir_all(self.dir_for(MediaKind::Video)).await?;
        Ok(())
    }
}
