use iced::widget::{button, column, pick_list, row, slider, text, Space};
use iced::Element;

use crate::app::{scaled, Message};
use crate::settings::Settings;
use crate::theme;

const DEVICE_IDS: &[i32] = &[0, 1, 2, 3];

pub fn view<'a>(settings: &Settings) -> Element<'a, Message> {
    let fs = settings.font_scale;

    column![
        text("Capture").size(scaled(16.0, fs)),
        Space::new().height(8),
        row![
            text("Camera device").size(scaled(13.0, fs)),
            pick_list(DEVICE_IDS, Some(settings.device_id), Message::DeviceChanged)
                .text_size(scaled(13.0, fs)),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
        Space::new().height(12),
        row![
            text("Tick interval").size(scaled(13.0, fs)),
            slider(
                15u64..=120,
                settings.tick_interval_ms,
                Message::IntervalChanged
            ),
            text(format!("{} ms", settings.tick_interval_ms)).size(scaled(13.0, fs)),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
        Space::new().height(8),
        text("Capture settings apply the next time the camera starts.")
            .size(scaled(12.0, fs))
            .style(|t: &iced::Theme| iced::widget::text::Style {
                color: Some(theme::tertiary_color(t)),
            }),
        Space::new().height(20),
        button(text("Restore Defaults").size(scaled(13.0, fs)))
            .on_press(Message::RestoreDefaults)
            .padding([8, 16])
            .style(button::secondary),
    ]
    .spacing(0)
    .into()
}
