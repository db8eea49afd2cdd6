//! Media selection dialog
//!
//! Opened from the toolbar for the currently displayed page. On open it
//! spawns one discovery task and shows a busy indicator; once the indexes
//! arrive it offers format and quality selectors per media kind, gated by an
//! enable checkbox each. Confirming produces a [`DownloadRequest`] for the
//! shell to hand to the transfer stage.

use crate::catalog::StreamCatalog;
use crate::discovery::{
    AudioSelection, DiscoveryWorker, DownloadRequest, FormatIndexes, VideoContainer,
    VideoSelection,
};
use crate::gui::theme;
use crate::gui::widgets::selector;
use crate::utils::library::derive_base_name;
use futures::future::{AbortHandle, Abortable};
use iced::widget::{button, checkbox, column, container, row, text, text_input, Space};
use iced::{Alignment, Command, Element, Length};
use std::sync::Arc;
use url::Url;

/// Messages from the media selection dialog
#[derive(Debug, Clone)]
pub enum DialogMessage {
    TitleChanged(String),
    ArtistChanged(String),
    AudioToggled(bool),
    VideoToggled(bool),
    AudioFormatSelected(String),
    AudioQualitySelected(String),
    VideoFormatSelected(VideoContainer),
    VideoQualitySelected(String),
    /// The discovery task completed (errors already mapped for display)
    DiscoveryComplete(Result<FormatIndexes, String>),
    Confirm,
    Cancel,
}

/// What the dialog hands back to the shell from `update`
#[derive(Debug, Clone)]
pub enum DialogEvent {
    Confirmed(DownloadRequest),
    Cancelled,
}

/// State for the media selection dialog
pub struct MediaDialog {
    url: Url,
    title_input: String,
    artist_input: String,

    discovering: bool,
    indexes: Option<FormatIndexes>,
    error: Option<String>,

    audio_enabled: bool,
    video_enabled: bool,
    audio_format: Option<String>,
    audio_quality: Option<String>,
    video_format: Option<VideoContainer>,
    video_quality: Option<String>,

    /// Handle to the discovery task; owned here so teardown can cancel it
    discovery: AbortHandle,
}

impl MediaDialog {
    /// Create the dialog for a page and start its discovery task.
    ///
    /// The returned command resolves to `DiscoveryComplete` exactly once.
    pub fn open(
        url: Url,
        catalog: Arc<dyn StreamCatalog>,
        prefill_title: Option<String>,
    ) -> (Self, Command<DialogMessage>) {
        let (handle, registration) = AbortHandle::new_pair();
        let worker = DiscoveryWorker::new(url.clone(), catalog);
        let discovery = Abortable::new(
            async move { worker.discover().await.map_err(|e| e.to_string()) },
            registration,
        );

        let dialog = Self {
            url,
            title_input: prefill_title.unwrap_or_default(),
            artist_input: String::new(),
            discovering: true,
            indexes: None,
            error: None,
            audio_enabled: false,
            video_enabled: false,
            audio_format: None,
            audio_quality: None,
            video_format: None,
            video_quality: None,
            discovery: handle,
        };

        let command = Command::perform(discovery, |outcome| {
            DialogMessage::DiscoveryComplete(
                outcome.unwrap_or_else(|_aborted| Err("Discovery cancelled".to_string())),
            )
        });

        (dialog, command)
    }

    /// Handle messages; returns an event when the dialog is done
    pub fn update(&mut self, message: DialogMessage) -> Option<DialogEvent> {
        match message {
            DialogMessage::TitleChanged(value) => self.title_input = value,
            DialogMessage::ArtistChanged(value) => self.artist_input = value,

            DialogMessage::AudioToggled(checked) => self.audio_enabled = checked,
            DialogMessage::VideoToggled(checked) => self.video_enabled = checked,

            DialogMessage::AudioFormatSelected(format) => {
                // Replace, never merge: the quality list is rebuilt from the
                // newly selected format's set.
                self.audio_quality = self.first_audio_quality(&format);
                self.audio_format = Some(format);
            }
            DialogMessage::AudioQualitySelected(quality) => {
                self.audio_quality = Some(quality);
            }
            DialogMessage::VideoFormatSelected(container) => {
                self.video_quality = self.first_video_quality(container);
                self.video_format = Some(container);
            }
            DialogMessage::VideoQualitySelected(quality) => {
                self.video_quality = Some(quality);
            }

            DialogMessage::DiscoveryComplete(result) => {
                self.discovering = false;
                match result {
                    Ok(indexes) => self.apply_indexes(indexes),
                    Err(message) => self.error = Some(message),
                }
            }

            DialogMessage::Confirm => {
                if let Some(request) = self.download_request() {
                    return Some(DialogEvent::Confirmed(request));
                }
            }
            DialogMessage::Cancel => {
                self.discovery.abort();
                return Some(DialogEvent::Cancelled);
            }
        }
        None
    }

    /// Populate the selectors from a completed discovery run: first format
    /// of each kind selected, its quality list filled and its first entry
    /// selected. Formats with an empty quality set are not offered at all.
    fn apply_indexes(&mut self, indexes: FormatIndexes) {
        self.audio_format = indexes.audio.keys().next().cloned();
        self.video_format = indexes.video.available().first().copied();
        self.indexes = Some(indexes);

        self.audio_quality = self
            .audio_format
            .clone()
            .and_then(|format| self.first_audio_quality(&format));
        self.video_quality = self
            .video_format
            .and_then(|container| self.first_video_quality(container));
    }

    fn first_audio_quality(&self, format: &str) -> Option<String> {
        self.indexes
            .as_ref()?
            .audio
            .get(format)?
            .iter()
            .next()
            .cloned()
    }

    fn first_video_quality(&self, container: VideoContainer) -> Option<String> {
        self.indexes
            .as_ref()?
            .video
            .qualities(container)
            .iter()
            .next()
            .cloned()
    }

    fn audio_formats(&self) -> Vec<String> {
        self.indexes
            .as_ref()
            .map(|indexes| indexes.audio.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn audio_qualities(&self) -> Vec<String> {
        match (&self.indexes, &self.audio_format) {
            (Some(indexes), Some(format)) => indexes
                .audio
                .get(format)
                .map(|set| set.iter().cloned().collect())
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    fn video_formats(&self) -> Vec<VideoContainer> {
        self.indexes
            .as_ref()
            .map(|indexes| indexes.video.available())
            .unwrap_or_default()
    }

    fn video_qualities(&self) -> Vec<String> {
        match (&self.indexes, self.video_format) {
            (Some(indexes), Some(container)) => indexes
                .video
                .qualities(container)
                .iter()
                .cloned()
                .collect(),
            _ => Vec::new(),
        }
    }

    fn audio_selection(&self) -> Option<AudioSelection> {
        if !self.audio_enabled {
            return None;
        }
        Some(AudioSelection {
            format: self.audio_format.clone()?,
            quality: self.audio_quality.clone()?,
        })
    }

    fn video_selection(&self) -> Option<VideoSelection> {
        if !self.video_enabled {
            return None;
        }
        Some(VideoSelection {
            container: self.video_format?,
            quality: self.video_quality.clone()?,
        })
    }

    /// The confirm action is only meaningful with at least one enabled,
    /// fully selected kind.
    fn download_request(&self) -> Option<DownloadRequest> {
        let audio = self.audio_selection();
        let video = self.video_selection();
        if audio.is_none() && video.is_none() {
            return None;
        }
        Some(DownloadRequest {
            url: self.url.clone(),
            base_name: derive_base_name(&self.title_input, &self.artist_input),
            audio,
            video,
        })
    }

    /// Render the dialog
    pub fn view(&self) -> Element<'_, DialogMessage> {
        let title_row = row![
            text("Title:").size(14).width(Length::Fixed(60.0)),
            text_input("Title", &self.title_input)
                .on_input(DialogMessage::TitleChanged)
                .padding(8),
        ]
        .spacing(10)
        .align_items(Alignment::Center);

        let artist_row = row![
            text("Artist:").size(14).width(Length::Fixed(60.0)),
            text_input("Artist", &self.artist_input)
                .on_input(DialogMessage::ArtistChanged)
                .padding(8),
        ]
        .spacing(10)
        .align_items(Alignment::Center);

        let audio_section = self.kind_section(
            "Audio Format",
            self.audio_enabled,
            DialogMessage::AudioToggled,
            selector(
                self.audio_formats(),
                self.audio_format.clone(),
                self.audio_enabled && !self.discovering,
                DialogMessage::AudioFormatSelected,
            ),
            selector(
                self.audio_qualities(),
                self.audio_quality.clone(),
                self.audio_enabled && !self.discovering,
                DialogMessage::AudioQualitySelected,
            ),
            self.audio_formats().is_empty(),
        );

        let video_section = self.kind_section(
            "Video Format",
            self.video_enabled,
            DialogMessage::VideoToggled,
            selector(
                self.video_formats(),
                self.video_format,
                self.video_enabled && !self.discovering,
                DialogMessage::VideoFormatSelected,
            ),
            selector(
                self.video_qualities(),
                self.video_quality.clone(),
                self.video_enabled && !self.discovering,
                DialogMessage::VideoQualitySelected,
            ),
            self.video_formats().is_empty(),
        );

        let status: Element<'_, DialogMessage> = if self.discovering {
            text("Fetching available formats…")
                .size(14)
                .style(iced::theme::Text::Color(theme::TEXT_MUTED))
                .into()
        } else if let Some(error) = &self.error {
            text(error)
                .size(14)
                .style(iced::theme::Text::Color(theme::DANGER))
                .into()
        } else {
            Space::with_height(Length::Fixed(0.0)).into()
        };

        let actions = row![
            Space::with_width(Length::Fill),
            button(text("Cancel").size(14))
                .padding([8, 20])
                .style(iced::theme::Button::Secondary)
                .on_press(DialogMessage::Cancel),
            button(text("Download").size(14))
                .padding([8, 20])
                .style(iced::theme::Button::Primary)
                .on_press_maybe(
                    self.download_request()
                        .is_some()
                        .then_some(DialogMessage::Confirm)
                ),
        ]
        .spacing(12)
        .align_items(Alignment::Center);

        let content = column![
            text("Download Media").size(20),
            title_row,
            artist_row,
            audio_section,
            video_section,
            status,
            actions,
        ]
        .spacing(16)
        .padding(20)
        .max_width(520);

        container(
            container(content).style(iced::theme::Container::Custom(Box::new(
                theme::CardContainer,
            ))),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x()
        .center_y()
        .into()
    }

    /// One media kind: enable checkbox plus its selector pair
    fn kind_section<'a>(
        &self,
        label: &'a str,
        enabled: bool,
        on_toggle: impl Fn(bool) -> DialogMessage + 'a,
        format_selector: Element<'a, DialogMessage>,
        quality_selector: Element<'a, DialogMessage>,
        nothing_discovered: bool,
    ) -> Element<'a, DialogMessage> {
        let mut toggle = checkbox(label, enabled).size(16);
        // A kind with nothing to offer cannot be enabled.
        if !self.discovering && !nothing_discovered {
            toggle = toggle.on_toggle(on_toggle);
        }

        let selectors = row![
            text("File Type:")
                .size(14)
                .style(iced::theme::Text::Color(theme::TEXT_SECONDARY)),
            format_selector,
            text("Quality:")
                .size(14)
                .style(iced::theme::Text::Color(theme::TEXT_SECONDARY)),
            quality_selector,
        ]
        .spacing(10)
        .align_items(Alignment::Center);

        column![toggle, selectors].spacing(8).into()
    }
}

impl Drop for MediaDialog {
    fn drop(&mut self) {
        // Harmless after completion; cancels the task when the dialog goes
        // away mid-discovery.
        self.discovery.abort();
    }
}
