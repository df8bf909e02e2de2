use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

#[cfg(not(target_arch = "wasm32"))]
mod screenshot;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Coverage Map".to_string(),
            resolution: (1280.0, 800.0).into(),
            present_mode: PresentMode::AutoVsync,
            fit_canvas_to_parent: true,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    })
    .add_plugins((
        coverage::CoveragePlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
        export::ExportPlugin,
    ));

    // Screenshot mode: capture the loaded map once and exit
    #[cfg(not(target_arch = "wasm32"))]
    if let Ok(path) = std::env::var(screenshot::SCREENSHOT_ENV) {
        app.add_plugins(screenshot::ScreenshotPlugin { path });
    }

    app.run();
}
