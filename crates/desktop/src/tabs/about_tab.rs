use iced::widget::{column, text, Space};
use iced::Element;

use crate::app::{scaled, Message};

pub fn view(fs: f32) -> Element<'static, Message> {
    let version = env!("CARGO_PKG_VERSION");

    column![
        text("CamScope").size(scaled(22.0, fs)),
        Space::new().height(4),
        text(format!("Version {version}")).size(scaled(13.0, fs)),
        Space::new().height(12),
        text(
            "A live camera viewer with switchable per-frame filters: edge \
             detection, grayscale thresholding, and Haar-cascade face and \
             eye detection, all rendered in real time."
        )
        .size(scaled(13.0, fs)),
        Space::new().height(16),
        text(
            "Detection cascades are loaded from the local OpenCV install \
             when present, and fetched into the cache directory otherwise."
        )
        .size(scaled(13.0, fs)),
    ]
    .spacing(0)
    .into()
}
