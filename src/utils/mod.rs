//! Utility modules for error handling, configuration, and the library tree

pub mod config;
pub mod error;
pub mod library;

// Re-export for convenience
pub use config::AppConfig;
pub use error::ElysiumError;
pub use library::{derive_base_name, MediaLibrary};
