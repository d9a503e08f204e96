mod app;
mod settings;
mod tabs;
mod theme;
mod workers;

use app::App;

fn main() -> iced::Result {
    env_logger::init();

    iced::application(App::new, App::update, App::view)
        .title("CamScope")
        .theme(App::theme)
        .subscription(App::subscription)
        .window(iced::window::Settings {
            size: iced::Size::new(760.0, 680.0),
            ..Default::default()
        })
        .run()
}
