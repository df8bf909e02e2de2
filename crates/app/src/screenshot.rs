use bevy::prelude::*;
use bevy::render::view::screenshot::{save_to_disk, Screenshot};

use coverage::app_state::AppState;

/// Set to a file path to capture the map once it has loaded, then exit.
pub const SCREENSHOT_ENV: &str = "COVERAGE_SCREENSHOT";

/// Frames to wait in `Ready` before capturing, so meshes are on screen.
const SETTLE_FRAMES: u32 = 30;
/// Frames to wait after capturing before exiting, so the file is written.
const EXIT_FRAMES: u32 = 20;

pub struct ScreenshotPlugin {
    pub path: String,
}

impl Plugin for ScreenshotPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ScreenshotQueue {
            path: self.path.clone(),
            frame: 0,
        })
        .add_systems(
            Update,
            (
                drive_screenshot.run_if(in_state(AppState::Ready)),
                exit_on_failure.run_if(in_state(AppState::Failed)),
            ),
        );
    }
}

#[derive(Resource)]
struct ScreenshotQueue {
    path: String,
    frame: u32,
}

fn drive_screenshot(
    mut commands: Commands,
    mut queue: ResMut<ScreenshotQueue>,
    mut exit: EventWriter<AppExit>,
) {
    queue.frame += 1;

    if queue.frame == SETTLE_FRAMES {
        info!("Capturing map to {}", queue.path);
        commands
            .spawn(Screenshot::primary_window())
            .observe(save_to_disk(queue.path.clone()));
    } else if queue.frame == SETTLE_FRAMES + EXIT_FRAMES {
        exit.send(AppExit::Success);
    }
}

fn exit_on_failure(mut exit: EventWriter<AppExit>) {
    error!("Startup failed, no screenshot taken");
    exit.send(AppExit::error());
}
