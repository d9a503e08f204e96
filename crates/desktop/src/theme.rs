use iced::color;
use iced::theme::Palette;
use iced::{Color, Theme};

use crate::settings::Appearance;

/// Resolve the iced Theme from appearance + high_contrast settings.
pub fn resolve_theme(appearance: Appearance, high_contrast: bool) -> Theme {
    let is_dark = match appearance {
        Appearance::Dark => true,
        Appearance::Light => false,
        Appearance::System => detect_system_dark_mode(),
    };

    let palette = match (is_dark, high_contrast) {
        (true, false) => dark_palette(),
        (false, false) => light_palette(),
        (true, true) => high_contrast_dark_palette(),
        (false, true) => high_contrast_light_palette(),
    };

    Theme::custom("CamScope", palette)
}

/// De-emphasized text color derived from the active palette.
pub fn tertiary_color(theme: &Theme) -> Color {
    let base = theme.palette().text;
    Color { a: 0.55, ..base }
}

fn dark_palette() -> Palette {
    Palette {
        background: color!(0x17, 0x1a, 0x1d),
        text: color!(0xd4, 0xd7, 0xda),
        primary: color!(0x3f, 0xb6, 0x8e),
        success: color!(0x37, 0xc8, 0x71),
        warning: color!(0xf5, 0xb8, 0x2e),
        danger: color!(0xef, 0x53, 0x50),
    }
}

fn light_palette() -> Palette {
    Palette {
        background: color!(0xf4, 0xf6, 0xf5),
        text: color!(0x20, 0x24, 0x27),
        primary: color!(0x0f, 0x80, 0x62),
        success: color!(0x25, 0x9e, 0x58),
        warning: color!(0xc8, 0x85, 0x0a),
        danger: color!(0xd6, 0x2f, 0x2c),
    }
}

fn high_contrast_dark_palette() -> Palette {
    Palette {
        background: color!(0x00, 0x00, 0x00),
        text: color!(0xff, 0xff, 0xff),
        primary: color!(0x52, 0xd9, 0xac),
        success: color!(0x37, 0xc8, 0x71),
        warning: color!(0xff, 0xd0, 0x40),
        danger: color!(0xff, 0x57, 0x52),
    }
}

fn high_contrast_light_palette() -> Palette {
    Palette {
        background: color!(0xff, 0xff, 0xff),
        text: color!(0x00, 0x00, 0x00),
        primary: color!(0x00, 0x5c, 0x44),
        success: color!(0x1b, 0x74, 0x41),
        warning: color!(0x8f, 0x5e, 0x00),
        danger: color!(0xb8, 0x00, 0x0d),
    }
}

fn detect_system_dark_mode() -> bool {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
            .map(|o| {
                String::from_utf8_lossy(&o.stdout)
                    .trim()
                    .eq_ignore_ascii_case("dark")
            })
            .unwrap_or(true)
    }
    #[cfg(not(target_os = "macos"))]
    {
        true
    }
}
