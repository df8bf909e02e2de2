use bevy::prelude::*;

use coverage::edit::CoverageChangedEvent;
use coverage::filter::FilterState;
use coverage::CoverageStore;

use crate::regions::{AreaRegion, RegionStyle};
use crate::style::resolve_style;

/// Full re-style pass whenever a filter toggle changes.
pub fn restyle_on_filter_change(
    filter: Res<FilterState>,
    store: Res<CoverageStore>,
    mut regions: Query<(&AreaRegion, &mut RegionStyle)>,
) {
    if !filter.is_changed() {
        return;
    }
    for (region, mut style) in &mut regions {
        let resolved = resolve_style(store.get(&region.code), &filter);
        style.set_if_neq(RegionStyle(resolved));
    }
}

/// Re-styles the regions of areas whose record was edited.
pub fn restyle_on_coverage_change(
    mut events: EventReader<CoverageChangedEvent>,
    filter: Res<FilterState>,
    store: Res<CoverageStore>,
    mut regions: Query<(&AreaRegion, &mut RegionStyle)>,
) {
    for event in events.read() {
        let resolved = resolve_style(store.get(&event.code), &filter);
        for (region, mut style) in &mut regions {
            if region.code == event.code {
                style.set_if_neq(RegionStyle(resolved));
            }
        }
    }
}

/// Pushes changed region styles into their fill materials.
pub fn sync_region_materials(
    regions: Query<(&RegionStyle, &MeshMaterial2d<ColorMaterial>), Changed<RegionStyle>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (style, material) in &regions {
        if let Some(material) = materials.get_mut(&material.0) {
            material.color = style.0.fill();
        }
    }
}
