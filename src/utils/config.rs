//! Application configuration
//!
//! Elysium takes no flags, environment variables, or config file; the fixed
//! constants of the shell live here so the guard and library code can be
//! exercised against other values in tests.

use std::path::PathBuf;
use url::Url;

/// Fixed settings for the browser shell and download library
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Location loaded when the shell starts
    pub start_url: Url,
    /// Location the navigation guard falls back to
    pub canonical_url: Url,
    /// Host suffix the guard accepts
    pub allowed_host_suffix: String,
    /// Root of the download directory tree
    pub library_root: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

        Self {
            start_url: Url::parse("https://www.youtube.com/watch?v=kGScxakv49Q")
                .expect("static URL"),
            canonical_url: Url::parse("https://www.youtube.com").expect("static URL"),
            allowed_host_suffix: "youtube.com".to_string(),
            library_root: home.join("Music").join("Elysium"),
        }
    }
}
