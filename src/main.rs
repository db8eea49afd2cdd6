//! Elysium - Single-Site Browser with Media Downloads
//!
//! A desktop shell pinned to youtube.com with a dialog for saving audio and
//! video streams into a fixed local library.

use anyhow::Result;
use elysium::catalog::YtDlpCatalog;
use elysium::gui::{AppFlags, ElysiumApp};
use elysium::utils::AppConfig;
use iced::Application;
use std::sync::Arc;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // A missing yt-dlp is reported inside the dialog when discovery runs;
    // the shell itself still works without it.
    let catalog = Arc::new(YtDlpCatalog::new());

    let mut settings = iced::Settings::with_flags(AppFlags {
        config: AppConfig::default(),
        catalog,
    });
    settings.window = iced::window::Settings {
        size: iced::Size::new(1000.0, 800.0),
        resizable: false,
        ..Default::default()
    };

    ElysiumApp::run(settings)?;
    Ok(())
}
