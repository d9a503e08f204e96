use iced::widget::{button, column, container, image, row, slider, text, Space};
use iced::{Element, Length};

use camscope_core::processing::domain::filter_mode::FilterMode;

use crate::app::{scaled, Message, Status};

const FEED_HEIGHT: f32 = 400.0;

pub fn view<'a>(
    fs: f32,
    viewport: Option<&'a image::Handle>,
    capturing: bool,
    mode: FilterMode,
    threshold: u8,
    unavailable: &[FilterMode],
    status: Option<&'a Status>,
) -> Element<'a, Message> {
    let mut col = column![feed(fs, viewport)].spacing(14);

    col = col.push(capture_row(fs, capturing));
    col = col.push(mode_bar(fs, mode, unavailable));
    col = col.push(threshold_row(fs, mode, threshold));

    if let Some(status) = status {
        col = col.push(status_line(fs, status));
    }

    col.into()
}

fn feed<'a>(fs: f32, viewport: Option<&'a image::Handle>) -> Element<'a, Message> {
    let inner: Element<'a, Message> = match viewport {
        Some(handle) => image(handle.clone())
            .content_fit(iced::ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => column![
            text("Camera is off").size(scaled(16.0, fs)),
            Space::new().height(4),
            text("Start the camera to see the live feed.").size(scaled(13.0, fs)),
        ]
        .align_x(iced::Alignment::Center)
        .into(),
    };

    container(inner)
        .width(Length::Fill)
        .height(FEED_HEIGHT)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(container::rounded_box)
        .into()
}

fn capture_row<'a>(fs: f32, capturing: bool) -> Element<'a, Message> {
    let capture_btn = if capturing {
        button(text("Stop Camera").size(scaled(14.0, fs)))
            .on_press(Message::StopCamera)
            .padding([10, 20])
            .style(button::danger)
    } else {
        button(text("Start Camera").size(scaled(14.0, fs)))
            .on_press(Message::StartCamera)
            .padding([10, 20])
            .style(button::primary)
    };

    let save_btn = button(text("Save Frame").size(scaled(14.0, fs)))
        .on_press(Message::SaveFrame)
        .padding([10, 20])
        .style(button::secondary);

    row![capture_btn, save_btn]
        .spacing(10)
        .align_y(iced::Alignment::Center)
        .into()
}

fn mode_bar<'a>(fs: f32, active: FilterMode, unavailable: &[FilterMode]) -> Element<'a, Message> {
    row(FilterMode::ALL
        .iter()
        .map(|&mode| {
            let label = text(mode.to_string()).size(scaled(13.0, fs));
            let mut btn = button(label).padding([6, 12]);
            if !unavailable.contains(&mode) {
                btn = btn.on_press(Message::ModeSelected(mode));
            }
            if mode == active {
                btn.style(button::primary).into()
            } else {
                btn.style(button::secondary).into()
            }
        })
        .collect::<Vec<_>>())
    .spacing(6)
    .into()
}

fn threshold_row<'a>(fs: f32, mode: FilterMode, threshold: u8) -> Element<'a, Message> {
    let label = if mode.uses_threshold() {
        text("Threshold").size(scaled(13.0, fs))
    } else {
        text("Threshold (grayscale mode)").size(scaled(13.0, fs))
    };

    row![
        label,
        slider(0u8..=u8::MAX, threshold, Message::ThresholdChanged).width(Length::Fill),
        text(format!("{threshold}")).size(scaled(13.0, fs)),
    ]
    .spacing(12)
    .align_y(iced::Alignment::Center)
    .into()
}

fn status_line<'a>(fs: f32, status: &'a Status) -> Element<'a, Message> {
    match status {
        Status::Warning(msg) => text(msg.clone())
            .size(scaled(13.0, fs))
            .style(|theme: &iced::Theme| text::Style {
                color: Some(theme.palette().warning),
            })
            .into(),
        Status::Error(msg) => text(msg.clone())
            .size(scaled(13.0, fs))
            .style(|theme: &iced::Theme| text::Style {
                color: Some(theme.palette().danger),
            })
            .into(),
        Status::Saved(path) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            row![
                text(format!("Saved {name}"))
                    .size(scaled(13.0, fs))
                    .style(|theme: &iced::Theme| text::Style {
                        color: Some(theme.palette().success),
                    }),
                button(text("Show in Folder").size(scaled(12.0, fs)))
                    .on_press(Message::ShowInFolder)
                    .padding([4, 10])
                    .style(button::secondary),
            ]
            .spacing(10)
            .align_y(iced::Alignment::Center)
            .into()
        }
    }
}
