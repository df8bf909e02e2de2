use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::picking::egui_wants_pointer;
use crate::projection::world_bounds;

const PAN_SPEED: f32 = 600.0;
const ZOOM_SPEED: f32 = 0.15;
/// World units per screen pixel at the closest zoom.
const MIN_SCALE: f32 = 0.01;
/// World units per screen pixel at the widest zoom.
const MAX_SCALE: f32 = 1.5;
const DEFAULT_SCALE: f32 = 0.6;
const LEFT_DRAG_THRESHOLD: f32 = 5.0;

/// 2D map camera model: a focus point on the world plane and a zoom scale.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct MapCamera {
    pub focus: Vec2,
    /// World units per screen pixel.
    pub scale: f32,
}

impl Default for MapCamera {
    fn default() -> Self {
        Self {
            focus: Vec2::ZERO,
            scale: DEFAULT_SCALE,
        }
    }
}

impl MapCamera {
    /// Centred on the map with the whole of `bounds` visible in a viewport
    /// of `viewport` pixels.
    pub fn fit(bounds: Rect, viewport: Vec2) -> Self {
        let scale = if viewport.x > 0.0 && viewport.y > 0.0 {
            (bounds.width() / viewport.x).max(bounds.height() / viewport.y)
        } else {
            DEFAULT_SCALE
        };
        Self {
            focus: Vec2::ZERO,
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
        }
    }

    /// Keeps the focus inside the map bounds.
    pub fn clamp_focus(&mut self) {
        let bounds = world_bounds();
        self.focus = self.focus.clamp(bounds.min, bounds.max);
    }

    /// Multiplies the scale by `factor`, clamped to the zoom limits.
    pub fn zoom_by(&mut self, factor: f32) {
        self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
    }
}

/// Tracks left-button drag state: differentiates click from drag.
/// When the mouse moves beyond `LEFT_DRAG_THRESHOLD` pixels from the initial
/// press it becomes a map pan, and the release is not treated as a click.
#[derive(Resource, Default)]
pub struct LeftClickDrag {
    pub pressed: bool,
    pub start_pos: Vec2,
    pub last_pos: Vec2,
    /// Set once the press turned into a pan; cleared on the next press.
    pub is_dragging: bool,
}

pub fn setup_camera(mut commands: Commands, windows: Query<&Window>) {
    let viewport = windows
        .get_single()
        .map(|w| Vec2::new(w.width(), w.height()))
        .unwrap_or(Vec2::ZERO);
    let map_camera = MapCamera::fit(world_bounds(), viewport);

    commands.spawn((
        Camera2d,
        Transform::from_translation(map_camera.focus.extend(0.0)),
    ));
    commands.insert_resource(map_camera);
}

/// System: apply MapCamera state to the camera Transform and projection.
pub fn apply_map_camera(
    map_camera: Res<MapCamera>,
    mut query: Query<(&mut Transform, &mut OrthographicProjection), With<Camera2d>>,
) {
    if !map_camera.is_changed() {
        return;
    }
    let Ok((mut transform, mut projection)) = query.get_single_mut() else {
        return;
    };
    transform.translation.x = map_camera.focus.x;
    transform.translation.y = map_camera.focus.y;
    projection.scale = map_camera.scale;
}

/// WASD/Arrow keys: pan.
pub fn camera_pan_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut map_camera: ResMut<MapCamera>,
) {
    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        dir.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        dir.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        dir.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        dir.x += 1.0;
    }

    if dir != Vec2::ZERO {
        let delta = PAN_SPEED * map_camera.scale * time.delta_secs();
        map_camera.focus += dir.normalize() * delta;
        map_camera.clamp_focus();
    }
}

/// Left-mouse drag: pan (with threshold to distinguish from clicks).
pub fn camera_left_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut contexts: EguiContexts,
    mut left_drag: ResMut<LeftClickDrag>,
    mut map_camera: ResMut<MapCamera>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Left) && !egui_wants_pointer(&mut contexts) {
        if let Some(pos) = window.cursor_position() {
            left_drag.pressed = true;
            left_drag.start_pos = pos;
            left_drag.last_pos = pos;
            left_drag.is_dragging = false;
        }
    }

    if buttons.just_released(MouseButton::Left) {
        left_drag.pressed = false;
    }

    if left_drag.pressed {
        if let Some(pos) = window.cursor_position() {
            if !left_drag.is_dragging && (pos - left_drag.start_pos).length() > LEFT_DRAG_THRESHOLD
            {
                left_drag.is_dragging = true;
                left_drag.last_pos = pos;
            }

            if left_drag.is_dragging {
                // Screen Y grows downward, world Y grows north.
                let delta = pos - left_drag.last_pos;
                let scale = map_camera.scale;
                map_camera.focus += Vec2::new(-delta.x, delta.y) * scale;
                map_camera.clamp_focus();
                left_drag.last_pos = pos;
            }
        }
    }
}

/// Scroll wheel: zoom.
pub fn camera_zoom(
    mut scroll_evts: EventReader<MouseWheel>,
    mut contexts: EguiContexts,
    mut map_camera: ResMut<MapCamera>,
) {
    if egui_wants_pointer(&mut contexts) {
        scroll_evts.read().for_each(drop);
        return;
    }
    for evt in scroll_evts.read() {
        let dy = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        };
        map_camera.zoom_by(1.0 - dy * ZOOM_SPEED);
    }
}
