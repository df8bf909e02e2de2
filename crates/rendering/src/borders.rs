//! Region borders drawn with gizmos.
//!
//! Gizmo line width is per config group, so each border weight tier gets its
//! own group. Dashed borders are cut into segments here because the dash
//! length is specified in screen pixels and must follow the zoom.

use bevy::prelude::*;
use geo::LineString;

use crate::camera::MapCamera;
use crate::picking::HoveredRegion;
use crate::regions::{RegionShape, RegionStyle};

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct ThinBorderGizmos;

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct BoldBorderGizmos;

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct HoverBorderGizmos;

/// Which gizmo group a border weight is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderTier {
    Thin,
    Bold,
    Hover,
}

impl BorderTier {
    pub fn for_weight(weight: f32) -> Self {
        if weight >= 3.0 {
            Self::Hover
        } else if weight >= 1.0 {
            Self::Bold
        } else {
            Self::Thin
        }
    }
}

pub fn configure_border_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (thin, _) = config_store.config_mut::<ThinBorderGizmos>();
    thin.line_width = 1.0;
    let (bold, _) = config_store.config_mut::<BoldBorderGizmos>();
    bold.line_width = 1.5;
    let (hover, _) = config_store.config_mut::<HoverBorderGizmos>();
    hover.line_width = 4.0;
}

/// Splits a polyline into dash segments of `dash` length separated by gaps of
/// the same length. The pattern carries over vertices.
pub fn dash_segments(points: &[Vec2], dash: f32) -> Vec<(Vec2, Vec2)> {
    let mut segments = Vec::new();
    if dash <= 0.0 {
        return segments;
    }

    // Distance left in the current dash (drawing) or gap (not drawing).
    let mut remaining = dash;
    let mut drawing = true;

    for pair in points.windows(2) {
        let (mut start, end) = (pair[0], pair[1]);
        let mut edge_left = start.distance(end);
        if edge_left == 0.0 {
            continue;
        }
        let dir = (end - start) / edge_left;

        while edge_left > 0.0 {
            let step = remaining.min(edge_left);
            let next = start + dir * step;
            if drawing {
                segments.push((start, next));
            }
            start = next;
            edge_left -= step;
            remaining -= step;
            if remaining <= 0.0 {
                drawing = !drawing;
                remaining = dash;
            }
        }
    }

    segments
}

fn ring_points(ring: &LineString<f64>) -> Vec<Vec2> {
    ring.0
        .iter()
        .map(|c| Vec2::new(c.x as f32, c.y as f32))
        .collect()
}

/// Draws every region border each frame, emphasizing the hovered one.
pub fn draw_region_borders(
    regions: Query<(Entity, &RegionShape, &RegionStyle)>,
    hovered: Res<HoveredRegion>,
    map_camera: Res<MapCamera>,
    mut thin: Gizmos<ThinBorderGizmos>,
    mut bold: Gizmos<BoldBorderGizmos>,
    mut hover: Gizmos<HoverBorderGizmos>,
) {
    for (entity, shape, style) in &regions {
        let style = if hovered.0 == Some(entity) {
            style.0.hovered()
        } else {
            style.0
        };
        let color = style.border();
        let dash_world = style.dash.map(|px| px * map_camera.scale);

        for polygon in &shape.outline.0 {
            for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
                let points = ring_points(ring);
                match (BorderTier::for_weight(style.weight), dash_world) {
                    (tier, Some(dash)) => {
                        for (a, b) in dash_segments(&points, dash) {
                            match tier {
                                BorderTier::Thin => thin.line_2d(a, b, color),
                                BorderTier::Bold => bold.line_2d(a, b, color),
                                BorderTier::Hover => hover.line_2d(a, b, color),
                            }
                        }
                    }
                    (BorderTier::Thin, None) => thin.linestrip_2d(points, color),
                    (BorderTier::Bold, None) => bold.linestrip_2d(points, color),
                    (BorderTier::Hover, None) => hover.linestrip_2d(points, color),
                }
            }
        }
    }
}
