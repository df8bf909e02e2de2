//! Hover and click on map regions.
//!
//! The cursor is projected onto the world plane through the 2D camera and
//! tested against region outlines (bounding box first, then the polygon).
//! Hovering emphasizes the region's border; a click that was not a pan opens
//! the editor on the region under the cursor.

use bevy::prelude::*;
use bevy_egui::EguiContexts;
use geo::{Contains, Point};

use coverage::edit::SelectAreaEvent;
use coverage::AreaCode;

use crate::camera::LeftClickDrag;
use crate::regions::{AreaRegion, RegionShape};

/// The region currently under the cursor, if any.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HoveredRegion(pub Option<Entity>);

/// World position of the cursor this frame, `None` when it is off the map
/// or over a UI panel.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct CursorWorldPos(pub Option<Vec2>);

/// A click on the map. `region`/`code` are `None` for clicks on empty map.
#[derive(Event, Debug, Clone)]
pub struct MapClickEvent {
    pub region: Option<Entity>,
    pub code: Option<AreaCode>,
    /// Cursor position in logical window pixels.
    pub screen_pos: Vec2,
}

/// True while egui has the pointer (over a panel, popup or legend, or in the
/// middle of a UI drag). Map hover, click, pan and zoom skip that frame.
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    let ctx = contexts.ctx_mut();
    ctx.is_pointer_over_area() || ctx.wants_pointer_input()
}

/// Finds the first region whose outline contains `world_pos`.
pub fn region_at<'a>(
    world_pos: Vec2,
    regions: impl IntoIterator<Item = (Entity, &'a AreaRegion, &'a RegionShape)>,
) -> Option<(Entity, &'a AreaRegion)> {
    let point = Point::new(world_pos.x as f64, world_pos.y as f64);
    regions
        .into_iter()
        .find(|(_, _, shape)| shape.bounds.contains(world_pos) && shape.outline.contains(&point))
        .map(|(entity, region, _)| (entity, region))
}

pub fn update_cursor_world_pos(
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    mut contexts: EguiContexts,
    mut cursor: ResMut<CursorWorldPos>,
) {
    let world_pos = if egui_wants_pointer(&mut contexts) {
        None
    } else {
        let window = windows.get_single().ok();
        let camera = camera_q.get_single().ok();
        match (window, camera) {
            (Some(window), Some((camera, cam_transform))) => window
                .cursor_position()
                .and_then(|pos| camera.viewport_to_world_2d(cam_transform, pos).ok()),
            _ => None,
        }
    };
    if cursor.0 != world_pos {
        cursor.0 = world_pos;
    }
}

pub fn update_hovered_region(
    cursor: Res<CursorWorldPos>,
    regions: Query<(Entity, &AreaRegion, &RegionShape)>,
    mut hovered: ResMut<HoveredRegion>,
) {
    let hit = cursor
        .0
        .and_then(|pos| region_at(pos, regions.iter()))
        .map(|(entity, _)| entity);
    if hovered.0 != hit {
        hovered.0 = hit;
    }
}

/// Emits a [`MapClickEvent`] when the left button is released without having
/// panned the map.
pub fn detect_region_click(
    buttons: Res<ButtonInput<MouseButton>>,
    left_drag: Res<LeftClickDrag>,
    windows: Query<&Window>,
    cursor: Res<CursorWorldPos>,
    regions: Query<(Entity, &AreaRegion, &RegionShape)>,
    mut clicks: EventWriter<MapClickEvent>,
) {
    if !buttons.just_released(MouseButton::Left) || left_drag.is_dragging {
        return;
    }
    let Some(world_pos) = cursor.0 else {
        return;
    };
    let Some(screen_pos) = windows.get_single().ok().and_then(|w| w.cursor_position()) else {
        return;
    };

    let hit = region_at(world_pos, regions.iter());
    clicks.send(MapClickEvent {
        region: hit.map(|(entity, _)| entity),
        code: hit.map(|(_, region)| region.code.clone()),
        screen_pos,
    });
}

/// Forwards region clicks to the edit controller.
pub fn open_editor_on_click(
    mut clicks: EventReader<MapClickEvent>,
    mut select: EventWriter<SelectAreaEvent>,
) {
    for click in clicks.read() {
        if let Some(code) = &click.code {
            select.send(SelectAreaEvent {
                code: code.clone(),
                region: click.region,
            });
        }
    }
}
