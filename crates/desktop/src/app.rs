use std::path::PathBuf;
use std::time::Duration;

use iced::widget::{button, column, container, row, scrollable, text};
use iced::{Element, Length, Subscription, Task, Theme};

use camscope_core::processing::domain::filter_mode::FilterMode;
use camscope_core::shared::constants::IMAGE_EXTENSIONS;
use camscope_core::shared::frame::Frame;
use camscope_core::video::domain::image_writer::ImageWriter;
use camscope_core::video::infrastructure::image_file_writer::ImageFileWriter;

use crate::settings::{Appearance, Settings};
use crate::tabs;
use crate::theme;
use crate::workers::capture_worker::{self, CaptureHandle, CaptureMessage, CaptureParams};

/// How often the UI drains the capture worker's channel.
const CAPTURE_POLL: Duration = Duration::from_millis(30);

// ---------------------------------------------------------------------------
// Tab enum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Main,
    Settings,
    Appearance,
    About,
}

impl Tab {
    const ALL: &[Tab] = &[Tab::Main, Tab::Settings, Tab::Appearance, Tab::About];

    fn label(self) -> &'static str {
        match self {
            Tab::Main => "Camera",
            Tab::Settings => "Settings",
            Tab::Appearance => "Appearance",
            Tab::About => "About",
        }
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Message {
    TabSelected(Tab),
    StartCamera,
    StopCamera,
    ModeSelected(FilterMode),
    ThresholdChanged(u8),
    PollCapture,
    SaveFrame,
    SaveTargetSelected(Option<PathBuf>),
    ShowInFolder,
    DeviceChanged(i32),
    IntervalChanged(u64),
    RestoreDefaults,
    AppearanceChanged(Appearance),
    HighContrastChanged(bool),
    FontScaleChanged(f32),
    PollSystemTheme,
}

/// Operator-facing notifications rendered under the feed.
#[derive(Debug, Clone)]
pub enum Status {
    Warning(String),
    Error(String),
    Saved(PathBuf),
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    active_tab: Tab,
    pub settings: Settings,
    capture: Option<CaptureHandle>,
    mode: FilterMode,
    threshold: u8,
    unavailable: Vec<FilterMode>,
    viewport: Option<iced::widget::image::Handle>,
    last_frame: Option<Frame>,
    status: Option<Status>,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();
        let threshold = settings.threshold;
        (
            Self {
                active_tab: Tab::Main,
                settings,
                capture: None,
                mode: FilterMode::None,
                threshold,
                unavailable: Vec::new(),
                viewport: None,
                last_frame: None,
                status: None,
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                self.active_tab = tab;
            }
            Message::StartCamera => {
                if self.capture.is_none() {
                    self.mode = FilterMode::None;
                    self.unavailable = Vec::new();
                    self.status = None;
                    self.capture = Some(capture_worker::spawn(CaptureParams {
                        device_id: self.settings.device_id,
                        interval: Duration::from_millis(self.settings.tick_interval_ms),
                        threshold: self.threshold,
                        cascade_dir: None,
                    }));
                }
            }
            Message::StopCamera => {
                // No-op when capture never started; the handle drop unblocks
                // the worker so it can release the device.
                if let Some(handle) = self.capture.take() {
                    handle.stop();
                }
            }
            Message::ModeSelected(mode) => {
                if self.unavailable.contains(&mode) {
                    self.status = Some(Status::Warning(format!("{mode} is unavailable.")));
                } else {
                    self.mode = mode;
                    if let Some(handle) = &self.capture {
                        handle.set_mode(mode);
                    }
                }
            }
            Message::ThresholdChanged(value) => {
                self.threshold = value;
                self.settings.threshold = value;
                self.settings.save();
                if let Some(handle) = &self.capture {
                    handle.set_threshold(value);
                }
            }
            Message::PollCapture => {
                self.drain_capture();
            }
            Message::SaveFrame => {
                if self.last_frame.is_none() {
                    self.status = Some(Status::Warning("No frame to save.".to_string()));
                } else {
                    return Task::perform(
                        async {
                            rfd::AsyncFileDialog::new()
                                .set_title("Save frame")
                                .add_filter("Images", IMAGE_EXTENSIONS)
                                .set_file_name("frame.png")
                                .save_file()
                                .await
                                .map(|h| h.path().to_path_buf())
                        },
                        Message::SaveTargetSelected,
                    );
                }
            }
            Message::SaveTargetSelected(Some(path)) => {
                if let Some(frame) = &self.last_frame {
                    self.status = Some(match ImageFileWriter::new().write(&path, frame) {
                        Ok(()) => Status::Saved(path),
                        Err(e) => Status::Warning(format!("Could not save frame: {e}")),
                    });
                }
            }
            Message::SaveTargetSelected(None) => {}
            Message::ShowInFolder => {
                if let Some(Status::Saved(path)) = &self.status {
                    if let Some(dir) = path.parent() {
                        let _ = open::that(dir);
                    }
                }
            }
            Message::DeviceChanged(device_id) => {
                self.settings.device_id = device_id;
                self.settings.save();
            }
            Message::IntervalChanged(ms) => {
                self.settings.tick_interval_ms = ms;
                self.settings.save();
            }
            Message::RestoreDefaults => {
                let defaults = Settings::default();
                self.settings.device_id = defaults.device_id;
                self.settings.tick_interval_ms = defaults.tick_interval_ms;
                self.settings.threshold = defaults.threshold;
                self.settings.save();
                self.threshold = defaults.threshold;
                if let Some(handle) = &self.capture {
                    handle.set_threshold(defaults.threshold);
                }
            }
            Message::AppearanceChanged(appearance) => {
                self.settings.appearance = appearance;
                self.settings.save();
            }
            Message::HighContrastChanged(enabled) => {
                self.settings.high_contrast = enabled;
                self.settings.save();
            }
            Message::FontScaleChanged(scale) => {
                self.settings.font_scale = scale;
                self.settings.save();
            }
            Message::PollSystemTheme => {
                // Theme is resolved fresh in theme() on every render,
                // so just requesting a redraw is enough.
            }
        }
        Task::none()
    }

    fn drain_capture(&mut self) {
        let mut pending = Vec::new();
        if let Some(handle) = &self.capture {
            while let Some(msg) = handle.try_next() {
                pending.push(msg);
            }
        }
        for msg in pending {
            match msg {
                CaptureMessage::Started { unavailable } => {
                    if !unavailable.is_empty() {
                        let names: Vec<String> =
                            unavailable.iter().map(|m| m.to_string()).collect();
                        self.status =
                            Some(Status::Warning(format!("Unavailable: {}", names.join(", "))));
                    }
                    self.unavailable = unavailable;
                }
                CaptureMessage::Frame(frame) => {
                    self.viewport = Some(rgba_handle(&frame));
                    self.last_frame = Some(frame);
                }
                CaptureMessage::Error(e) => {
                    self.status = Some(Status::Error(e));
                }
                CaptureMessage::Stopped => {
                    self.capture = None;
                }
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let fs = self.settings.font_scale;

        // Tab bar
        let tab_bar = row(Tab::ALL
            .iter()
            .map(|&tab| {
                let label = text(tab.label()).size(scaled(13.0, fs));
                let btn = button(label)
                    .on_press(Message::TabSelected(tab))
                    .padding([6, 14]);
                if tab == self.active_tab {
                    btn.style(button::primary).into()
                } else {
                    btn.style(button::text).into()
                }
            })
            .collect::<Vec<_>>())
        .spacing(2);

        let content: Element<'_, Message> = match self.active_tab {
            Tab::Main => tabs::main_tab::view(
                fs,
                self.viewport.as_ref(),
                self.capture.is_some(),
                self.mode,
                self.threshold,
                &self.unavailable,
                self.status.as_ref(),
            ),
            Tab::Settings => tabs::settings_tab::view(&self.settings),
            Tab::Appearance => tabs::appearance_tab::view(&self.settings),
            Tab::About => tabs::about_tab::view(fs),
        };

        let tab_content = container(scrollable(content).height(Length::Fill))
            .padding(16)
            .height(Length::Fill);

        column![tab_bar, tab_content]
            .spacing(0)
            .height(Length::Fill)
            .into()
    }

    pub fn theme(&self) -> Theme {
        theme::resolve_theme(self.settings.appearance, self.settings.high_contrast)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let mut subs = Vec::new();
        if self.capture.is_some() {
            subs.push(iced::time::every(CAPTURE_POLL).map(|_| Message::PollCapture));
        }
        if self.settings.appearance == Appearance::System {
            subs.push(iced::time::every(Duration::from_secs(2)).map(|_| Message::PollSystemTheme));
        }
        Subscription::batch(subs)
    }
}

/// Scale a base font size by the user's font_scale setting.
pub fn scaled(base: f32, font_scale: f32) -> f32 {
    (base * font_scale).round()
}

/// Expand a display-ready RGB frame to the RGBA bytes iced wants.
fn rgba_handle(frame: &Frame) -> iced::widget::image::Handle {
    let mut rgba = Vec::with_capacity(frame.data().len() / 3 * 4);
    for px in frame.data().chunks_exact(3) {
        rgba.extend_from_slice(px);
        rgba.push(u8::MAX);
    }
    iced::widget::image::Handle::from_rgba(frame.width(), frame.height(), rgba)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_with_no_frame_warns_and_writes_nothing() {
        let (mut app, _) = App::new();
        let _ = app.update(Message::SaveFrame);
        assert!(matches!(app.status, Some(Status::Warning(_))));
    }

    #[test]
    fn test_stop_without_start_is_a_noop() {
        let (mut app, _) = App::new();
        let _ = app.update(Message::StopCamera);
        let _ = app.update(Message::StopCamera);
        assert!(app.capture.is_none());
        assert!(app.status.is_none());
    }

    #[test]
    fn test_mode_selection_is_exclusive_in_the_ui_state() {
        let (mut app, _) = App::new();
        let _ = app.update(Message::ModeSelected(FilterMode::EdgeDetection));
        let _ = app.update(Message::ModeSelected(FilterMode::GrayThreshold));
        assert_eq!(app.mode, FilterMode::GrayThreshold);
    }

    #[test]
    fn test_unavailable_mode_selection_warns_and_keeps_the_current_mode() {
        let (mut app, _) = App::new();
        app.unavailable = vec![FilterMode::FaceDetection];
        let _ = app.update(Message::ModeSelected(FilterMode::FaceDetection));
        assert_eq!(app.mode, FilterMode::None);
        assert!(matches!(app.status, Some(Status::Warning(_))));
    }
}
