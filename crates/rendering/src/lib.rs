use bevy::prelude::*;

use coverage::app_state::AppState;
use coverage::edit::EditSet;

pub mod borders;
pub mod camera;
pub mod picking;
pub mod projection;
pub mod regions;
pub mod restyle;
pub mod style;

use borders::{BoldBorderGizmos, HoverBorderGizmos, ThinBorderGizmos};
use camera::{LeftClickDrag, MapCamera};
use picking::{CursorWorldPos, HoveredRegion, MapClickEvent};

/// Map pointer handling that feeds the edit controller.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct MapInputSet;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MapCamera>()
            .init_resource::<LeftClickDrag>()
            .init_resource::<HoveredRegion>()
            .init_resource::<CursorWorldPos>()
            .add_event::<MapClickEvent>()
            .init_gizmo_group::<ThinBorderGizmos>()
            .init_gizmo_group::<BoldBorderGizmos>()
            .init_gizmo_group::<HoverBorderGizmos>()
            .insert_resource(ClearColor(Color::srgb(0.93, 0.94, 0.92)))
            .add_systems(
                Startup,
                (camera::setup_camera, borders::configure_border_gizmos),
            )
            .add_systems(
                Update,
                (
                    camera::camera_pan_keyboard,
                    camera::camera_left_drag,
                    camera::camera_zoom,
                    camera::apply_map_camera,
                )
                    .chain(),
            )
            .add_systems(OnEnter(AppState::Ready), regions::spawn_regions)
            .add_systems(
                Update,
                (
                    picking::update_cursor_world_pos,
                    picking::update_hovered_region,
                    picking::detect_region_click.after(camera::camera_left_drag),
                    picking::open_editor_on_click,
                )
                    .chain()
                    .in_set(MapInputSet)
                    .before(EditSet)
                    .run_if(in_state(AppState::Ready)),
            )
            .add_systems(
                Update,
                (
                    restyle::restyle_on_filter_change,
                    restyle::restyle_on_coverage_change,
                    restyle::sync_region_materials,
                    borders::draw_region_borders,
                )
                    .chain()
                    .after(EditSet)
                    .run_if(in_state(AppState::Ready)),
            );
    }
}
