//! Main GUI application: the single-domain browser shell
//!
//! Hosts the rendering surface behind its trait, runs every location change
//! through the navigation guard, and owns the media selection dialog and any
//! in-flight transfer.

use crate::catalog::{MediaKind, PageInfo, StreamCatalog};
use crate::discovery::DownloadRequest;
use crate::gui::clipboard;
use crate::gui::dialog::{DialogEvent, DialogMessage, MediaDialog};
use crate::gui::theme;
use crate::gui::widgets::toolbar_button;
use crate::shell::{HistorySurface, NavigationGuard, RenderSurface};
use crate::transfer::{self, TransferProgress};
use crate::utils::config::AppConfig;
use crate::utils::library::MediaLibrary;
use iced::widget::{column, container, progress_bar, row, text, text_input, Space};
use iced::{Alignment, Application, Command, Element, Length, Subscription, Theme};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, warn};
use url::Url;

/// Data the binary hands to the application
pub struct AppFlags {
    pub config: AppConfig,
    pub catalog: Arc<dyn StreamCatalog>,
}

/// Main application state
pub struct ElysiumApp {
    config: AppConfig,
    catalog: Arc<dyn StreamCatalog>,

    surface: HistorySurface,
    guard: NavigationGuard,
    address_input: String,

    preview: PreviewState,
    preview_epoch: u64,

    dialog: Option<MediaDialog>,

    transfer: Option<TransferUi>,
    progress_rx: Option<UnboundedReceiver<TransferProgress>>,

    status: String,
}

/// Page preview pane state
enum PreviewState {
    Idle,
    Loading,
    Ready(PageInfo),
    Unavailable,
}

/// Progress shown for the active transfer batch
#[derive(Default)]
struct TransferUi {
    audio: Option<TransferProgress>,
    video: Option<TransferProgress>,
}

impl TransferUi {

    fn record(&mut self, sample: TransferProgress) {
        match sample.kind {
            MediaKind::Audio => self.audio = Some(sample),
            MediaKind::Video => self.video = Some(sample),
        }
    }
}

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // Toolbar and address input
    AddressChanged(String),
    AddressSubmitted,
    PasteAddress,
    BackPressed,
    ForwardPressed,
    OpenDownloadDialog,
    ViewDownloads,

    // Background results
    PreviewLoaded(u64, Result<PageInfo, String>),
    Dialog(DialogMessage),
    TransfersFinished(Result<Vec<PathBuf>, String>),

    // Progress drain while a transfer is live
    Tick,
}

impl Application for ElysiumApp {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = AppFlags;

    fn new(flags: AppFlags) -> (Self, Command<Message>) {
        let surface = HistorySurface::new(flags.config.start_url.clone());
        let guard = NavigationGuard::new(&flags.config);

        let mut app = Self {
            config: flags.config,
            catalog: flags.catalog,
            surface,
            guard,
            address_input: String::new(),
            preview: PreviewState::Idle,
            preview_epoch: 0,
            dialog: None,
            transfer: None,
            progress_rx: None,
            status: "Ready".to_string(),
        };

        // The start location goes through the guard like any other change.
        let command = app.after_location_change();
        (app, command)
    }

    fn title(&self) -> String {
        String::from("Elysium")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::AddressChanged(value) => {
                self.address_input = value;
                Command::none()
            }

            Message::AddressSubmitted => match Url::parse(self.address_input.trim()) {
                Ok(url) => {
                    self.surface.load(url);
                    self.after_location_change()
                }
                Err(_) => {
                    self.status = "Not a valid URL".to_string();
                    Command::none()
                }
            },

            Message::PasteAddress => {
                match clipboard::get_clipboard_content() {
                    Ok(content) => self.address_input = content.trim().to_string(),
                    Err(e) => self.status = e,
                }
                Command::none()
            }

            Message::BackPressed => {
                self.surface.back();
                self.after_location_change()
            }

            Message::ForwardPressed => {
                self.surface.forward();
                self.after_location_change()
            }

            Message::OpenDownloadDialog => {
                if self.dialog.is_some() {
                    return Command::none();
                }
                let prefill = match &self.preview {
                    PreviewState::Ready(info) if !info.title.is_empty() => {
                        Some(info.title.clone())
                    }
                    _ => None,
                };
                let (dialog, command) = MediaDialog::open(
                    self.surface.location().clone(),
                    Arc::clone(&self.catalog),
                    prefill,
                );
                self.dialog = Some(dialog);
                command.map(Message::Dialog)
            }

            // Download history dialog is not implemented yet.
            Message::ViewDownloads => Command::none(),

            Message::PreviewLoaded(epoch, result) => {
                // A stale probe belongs to an earlier location.
                if epoch == self.preview_epoch {
                    self.preview = match result {
                        Ok(info) => PreviewState::Ready(info),
                        Err(e) => {
                            debug!("page probe failed: {}", e);
                            PreviewState::Unavailable
                        }
                    };
                }
                Command::none()
            }

            Message::Dialog(dialog_message) => {
                let Some(dialog) = &mut self.dialog else {
                    // Late message from a dismissed dialog (e.g. an aborted
                    // discovery completing); nothing to do.
                    return Command::none();
                };
                match dialog.update(dialog_message) {
                    Some(DialogEvent::Confirmed(request)) => {
                        self.dialog = None;
                        self.start_transfer(request)
                    }
                    Some(DialogEvent::Cancelled) => {
                        self.dialog = None;
                        Command::none()
                    }
                    None => Command::none(),
                }
            }

            Message::TransfersFinished(result) => {
                match result {
                    Ok(paths) => {
                        self.status = match paths.len() {
                            1 => format!("Saved {}", paths[0].display()),
                            n => format!("Saved {} files to {}", n, self.config.library_root.display()),
                        };
                    }
                    Err(e) => {
                        warn!("transfer failed: {}", e);
                        self.status = format!("Download failed: {}", e);
                    }
                }
                self.transfer = None;
                self.progress_rx = None;
                Command::none()
            }

            Message::Tick => {
                if let (Some(rx), Some(ui)) = (&mut self.progress_rx, &mut self.transfer) {
                    while let Ok(sample) = rx.try_recv() {
                        ui.record(sample);
                    }
                }
                Command::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let toolbar = container(
            row![
                toolbar_button("Back", self.surface.can_back().then_some(Message::BackPressed)),
                toolbar_button(
                    "Forward",
                    self.surface.can_forward().then_some(Message::ForwardPressed)
                ),
                text_input("Enter a YouTube address", &self.address_input)
                    .on_input(Message::AddressChanged)
                    .on_submit(Message::AddressSubmitted)
                    .size(14)
                    .padding(8),
                toolbar_button("Paste", Some(Message::PasteAddress)),
                toolbar_button(
                    "Download",
                    self.dialog.is_none().then_some(Message::OpenDownloadDialog)
                ),
                toolbar_button("Downloads", Some(Message::ViewDownloads)),
            ]
            .spacing(8)
            .padding(10)
            .align_items(Alignment::Center),
        )
        .style(iced::theme::Container::Custom(Box::new(
            theme::ToolbarContainer,
        )));

        // Location readout, updated on every change
        let readout = container(
            text(self.surface.location().as_str())
                .size(12)
                .style(iced::theme::Text::Color(theme::TEXT_SECONDARY)),
        )
        .width(Length::Fill)
        .center_x()
        .padding([4, 0]);

        let content: Element<'_, Message> = match &self.dialog {
            Some(dialog) => dialog.view().map(Message::Dialog),
            None => self.preview_pane(),
        };

        let status_area = self.status_area();

        column![
            toolbar,
            readout,
            container(content).width(Length::Fill).height(Length::Fill),
            status_area,
        ]
        .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.transfer.is_some() {
            iced::time::every(std::time::Duration::from_millis(100)).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    fn theme(&self) -> Self::Theme {
        Theme::Light
    }
}

impl ElysiumApp {
    /// Run the guard over the surface's current location, apply any
    /// corrective load, and refresh the preview. Called after every surface
    /// mutation; the guard re-enters for the corrective change too.
    fn after_location_change(&mut self) -> Command<Message> {
        if let Some(corrective) = self.guard.inspect(self.surface.location()) {
            self.surface.load(corrective);
            let followup = self.guard.inspect(self.surface.location());
            debug_assert!(followup.is_none(), "canonical URL must pass the guard");
        }
        self.refresh_preview()
    }

    /// Probe the catalog for page metadata when the location looks like a
    /// watch page. Stale results are fenced by an epoch counter.
    fn refresh_preview(&mut self) -> Command<Message> {
        self.preview_epoch += 1;
        let epoch = self.preview_epoch;

        let location = self.surface.location();
        if !is_watch_page(location) {
            self.preview = PreviewState::Idle;
            return Command::none();
        }

        self.preview = PreviewState::Loading;
        let catalog = Arc::clone(&self.catalog);
        let url = location.to_string();
        Command::perform(
            async move { catalog.probe(&url).await.map_err(|e| e.to_string()) },
            move |result| Message::PreviewLoaded(epoch, result),
        )
    }

    fn start_transfer(&mut self, request: DownloadRequest) -> Command<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.progress_rx = Some(rx);
        self.transfer = Some(TransferUi::default());
        self.status = format!("Downloading {}…", request.base_name);

        let catalog = Arc::clone(&self.catalog);
        let library = MediaLibrary::new(self.config.library_root.clone());
        Command::perform(
            async move {
                transfer::run(catalog, library, request, tx)
                    .await
                    .map_err(|e| e.to_string())
            },
            Message::TransfersFinished,
        )
    }

    fn preview_pane(&self) -> Element<'_, Message> {
        let body: Element<'_, Message> = match &self.preview {
            PreviewState::Idle => text("Navigate to a watch page to see its details")
                .size(14)
                .style(iced::theme::Text::Color(theme::TEXT_MUTED))
                .into(),
            PreviewState::Loading => text("Loading page preview…")
                .size(14)
                .style(iced::theme::Text::Color(theme::TEXT_MUTED))
                .into(),
            PreviewState::Unavailable => text("Preview unavailable")
                .size(14)
                .style(iced::theme::Text::Color(theme::TEXT_MUTED))
                .into(),
            PreviewState::Ready(info) => {
                let mut details = column![text(&info.title).size(22)].spacing(8);
                if let Some(uploader) = &info.uploader {
                    details = details.push(
                        text(format!("by {}", uploader))
                            .size(14)
                            .style(iced::theme::Text::Color(theme::TEXT_SECONDARY)),
                    );
                }
                if let Some(duration) = info.duration {
                    details = details.push(
                        text(format_duration(duration))
                            .size(14)
                            .style(iced::theme::Text::Color(theme::TEXT_MUTED)),
                    );
                }
                details.into()
            }
        };

        container(
            container(body)
                .padding(24)
                .max_width(640.0)
                .style(iced::theme::Container::Custom(Box::new(
                    theme::CardContainer,
                ))),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x()
        .center_y()
        .into()
    }

    fn status_area(&self) -> Element<'_, Message> {
        let mut area = column![text(&self.status).size(13)].spacing(6).padding(10);

        if let Some(transfer) = &self.transfer {
            for (label, sample) in [("Audio", &transfer.audio), ("Video", &transfer.video)] {
                let Some(sample) = sample else { continue };
                let bar: Element<'_, Message> = match sample.fraction() {
                    Some(fraction) => progress_bar(0.0..=1.0, fraction)
                        .height(Length::Fixed(8.0))
                        .into(),
                    None => text(format!("{} bytes", sample.received))
                        .size(12)
                        .style(iced::theme::Text::Color(theme::TEXT_MUTED))
                        .into(),
                };
                area = area.push(
                    row![
                        text(label).size(12).width(Length::Fixed(50.0)),
                        bar,
                        Space::with_width(Length::Fixed(10.0)),
                    ]
                    .spacing(8)
                    .align_items(Alignment::Center),
                );
            }
        }

        area.into()
    }
}

fn is_watch_page(url: &Url) -> bool {
    url.path().starts_with("/watch") || url.host_str() == Some("youtu.be")
}

fn format_duration(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_pages_are_recognized() {
        let watch = Url::parse("https://www.youtube.com/watch?v=abc").unwrap();
        let home = Url::parse("https://www.youtube.com/").unwrap();
        let short = Url::parse("https://youtu.be/abc").unwrap();
        assert!(is_watch_page(&watch));
        assert!(!is_watch_page(&home));
        assert!(is_watch_page(&short));
    }

    #[test]
    fn durations_render_as_minutes_and_seconds() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(61), "1:01");
        assert_eq!(format_duration(600), "10:00");
    }
}
