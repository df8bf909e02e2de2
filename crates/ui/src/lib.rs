use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use coverage::app_state::AppState;
use coverage::edit::EditSet;
use rendering::MapInputSet;

pub mod edit_panel;
pub mod filter_controls;
pub mod legend;
pub mod popup;
pub mod startup_alert;
pub mod theme;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<popup::OpenPopup>()
            .init_resource::<startup_alert::LoadingAnimation>()
            .add_systems(Startup, theme::apply_map_theme)
            .add_systems(
                Update,
                startup_alert::loading_indicator_ui.run_if(in_state(AppState::Loading)),
            )
            .add_systems(
                Update,
                startup_alert::startup_failure_ui.run_if(in_state(AppState::Failed)),
            )
            .add_systems(
                Update,
                (
                    filter_controls::filter_controls_ui,
                    edit_panel::edit_panel_ui,
                )
                    .before(MapInputSet)
                    .before(EditSet)
                    .run_if(in_state(AppState::Ready)),
            )
            .add_systems(
                Update,
                popup::track_popup_clicks
                    .after(MapInputSet)
                    .before(EditSet)
                    .run_if(in_state(AppState::Ready)),
            )
            .add_systems(
                Update,
                (
                    popup::refresh_popup,
                    popup::popup_ui,
                    legend::legend_ui,
                )
                    .chain()
                    .after(EditSet)
                    .run_if(in_state(AppState::Ready)),
            );
    }
}
