//! Postcode area regions on the map.
//!
//! Every boundary becomes one entity: a triangulated fill mesh with its own
//! `ColorMaterial`, the projected outline used for borders and hit testing,
//! and the [`RegionStyle`] currently resolved for it.

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use geo::{BoundingRect, MultiPolygon, TriangulateEarcut};

use coverage::boundaries::Boundaries;
use coverage::filter::FilterState;
use coverage::{AreaCode, CoverageStore};

use crate::projection::project_shape;
use crate::style::{resolve_style, AreaStyle};

/// Marks a map region and names the postcode area it shows.
#[derive(Component, Debug, Clone)]
pub struct AreaRegion {
    pub code: AreaCode,
}

/// Region outline in world coordinates plus its bounding box.
#[derive(Component, Debug, Clone)]
pub struct RegionShape {
    pub outline: MultiPolygon<f64>,
    pub bounds: Rect,
}

impl RegionShape {
    pub fn new(outline: MultiPolygon<f64>) -> Self {
        let bounds = outline
            .bounding_rect()
            .map(|r| {
                Rect::new(
                    r.min().x as f32,
                    r.min().y as f32,
                    r.max().x as f32,
                    r.max().y as f32,
                )
            })
            .unwrap_or_default();
        Self { outline, bounds }
    }
}

/// The resolver's current output for this region. Hover emphasis is drawn on
/// top of it and never written here.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct RegionStyle(pub AreaStyle);

/// Triangulates every polygon of `outline` into one flat mesh.
pub fn region_mesh(outline: &MultiPolygon<f64>) -> Mesh {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for polygon in &outline.0 {
        let raw = polygon.earcut_triangles_raw();
        let base = positions.len() as u32;
        positions.extend(
            raw.vertices
                .chunks_exact(2)
                .map(|xy| [xy[0] as f32, xy[1] as f32, 0.0]),
        );
        indices.extend(raw.triangle_indices.iter().map(|&i| base + i as u32));
    }

    let normals = vec![[0.0, 0.0, 1.0]; positions.len()];
    let uvs = vec![[0.0, 0.0]; positions.len()];

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(indices))
}

/// Runs on entering `Ready`: one entity per boundary, styled from the store.
pub fn spawn_regions(
    mut commands: Commands,
    boundaries: Res<Boundaries>,
    store: Res<CoverageStore>,
    filter: Res<FilterState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for boundary in &boundaries.0 {
        let outline = project_shape(&boundary.shape);
        let style = resolve_style(store.get(&boundary.code), &filter);

        commands.spawn((
            AreaRegion {
                code: boundary.code.clone(),
            },
            Mesh2d(meshes.add(region_mesh(&outline))),
            MeshMaterial2d(materials.add(ColorMaterial::from(style.fill()))),
            Transform::default(),
            RegionShape::new(outline),
            RegionStyle(style),
        ));
    }
    info!("Spawned {} map regions", boundaries.0.len());
}
