//! Elysium library
//!
//! A single-domain browser shell with an attached media download dialog:
//! format discovery and retrieval go through the [`catalog`] boundary, the
//! selection workflow lives in [`discovery`] and [`gui::dialog`], and the
//! navigation allow-list in [`shell`].

pub mod catalog;
pub mod discovery;
pub mod gui;
pub mod shell;
pub mod transfer;
pub mod utils;

// Re-export main types for easier use
pub use catalog::{
    MediaKind, PageInfo, ResolvedStream, StreamCatalog, StreamCriteria, StreamDescriptor,
    YtDlpCatalog,
};
pub use discovery::{DiscoveryWorker, DownloadRequest, FormatIndexes, VideoContainer};
pub use gui::{ElysiumApp, Message};
pub use shell::{GuardState, HistorySurface, NavigationGuard, RenderSurface};
pub use transfer::{TransferEngine, TransferProgress};
pub use utils::{derive_base_name, AppConfig, ElysiumError, MediaLibrary};
