//! Stream catalog boundary
//!
//! Everything the application knows about media extraction goes through the
//! [`StreamCatalog`] trait; the production implementation wraps yt-dlp.

pub mod models;
pub mod traits;
pub mod ytdlp;

pub use models::{
    media_subtype, MediaKind, PageInfo, ResolvedStream, StreamCriteria, StreamDescriptor,
};
pub use traits::StreamCatalog;
pub use ytdlp::YtDlpCatalog;
