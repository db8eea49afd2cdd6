use crate::catalog::models::{MediaKind, PageInfo, ResolvedStream, StreamCriteria, StreamDescriptor};
use crate::utils::error::ElysiumError;
use async_trait::async_trait;

/// Core trait for stream catalogs
///
/// This trait isolates the application from the specific extraction backend,
/// and lets tests substitute a canned catalog.
#[async_trait]
pub trait StreamCatalog: Send + Sync {
    /// Returns a unique identifier for this catalog (e.g., "ytdlp")
    fn id(&self) -> &'static str;

    /// Checks if this catalog can handle the given URL
    fn supports(&self, url: &str) -> bool;

    /// Fetches display metadata for a page
    async fn probe(&self, url: &str) -> Result<PageInfo, ElysiumError>;

    /// Enumerates the streams of one media kind available at the URL.
    ///
    /// `MediaKind::Audio` yields audio-only streams, `MediaKind::Video`
    /// video-only streams.
    async fn enumerate(
        &self,
        url: &str,
        kind: MediaKind,
    ) -> Result<Vec<StreamDescriptor>, ElysiumError>;

    /// Resolves a (format, quality) selection back to a retrievable stream.
    ///
    /// The stream list is queried afresh, so a selection made against an
    /// earlier enumeration can miss; that surfaces as
    /// [`ElysiumError::ResolutionMiss`].
    async fn resolve(
        &self,
        url: &str,
        criteria: &StreamCriteria,
    ) -> Result<ResolvedStream, ElysiumError>;
}
