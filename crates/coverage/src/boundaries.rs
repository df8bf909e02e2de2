//! Postcode area boundary polygons.
//!
//! Parses a GeoJSON `FeatureCollection` whose features carry a `name`
//! property equal to the postcode area code and a `Polygon` or
//! `MultiPolygon` geometry in lon/lat degrees. The dataset is read-only: it
//! is parsed once at startup and shared through the [`Boundaries`] resource.

use bevy::prelude::*;
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::Deserialize;

use crate::area_code::AreaCode;
use crate::error::LoadError;

// =============================================================================
// GeoJSON wire types
// =============================================================================

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

/// Positions are kept as `Vec<f64>` so 3D coordinates (with altitude) parse.
#[derive(Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Vec<f64>>>> },
    #[serde(other)]
    Unsupported,
}

// =============================================================================
// Domain types
// =============================================================================

/// The outline of one postcode area in lon/lat degrees.
#[derive(Debug, Clone)]
pub struct AreaBoundary {
    pub code: AreaCode,
    pub shape: MultiPolygon<f64>,
}

/// All boundaries loaded at startup, in file order.
#[derive(Resource, Debug, Clone, Default)]
pub struct Boundaries(pub Vec<AreaBoundary>);

/// Parses the GeoJSON text. Individual unusable features are skipped with a
/// warning; only a document that is not a feature collection is an error.
pub fn parse_boundaries(text: &str) -> Result<Vec<AreaBoundary>, LoadError> {
    let collection: FeatureCollection =
        serde_json::from_str(text).map_err(|e| LoadError::Boundaries(e.to_string()))?;

    let mut areas = Vec::with_capacity(collection.features.len());
    for (idx, feature) in collection.features.into_iter().enumerate() {
        let name = feature
            .properties
            .as_ref()
            .and_then(|props| props.get("name"))
            .and_then(|v| v.as_str());
        let Some(code) = name.and_then(AreaCode::parse) else {
            warn!("Boundary feature {idx} has no usable 'name' property; skipped");
            continue;
        };

        let shape = match feature.geometry {
            Some(Geometry::Polygon { coordinates }) => {
                MultiPolygon::new(polygon_from_rings(&coordinates).into_iter().collect())
            }
            Some(Geometry::MultiPolygon { coordinates }) => MultiPolygon::new(
                coordinates
                    .iter()
                    .filter_map(|rings| polygon_from_rings(rings))
                    .collect(),
            ),
            Some(Geometry::Unsupported) | None => {
                warn!("Boundary feature '{code}' has no polygon geometry; skipped");
                continue;
            }
        };
        if shape.0.is_empty() {
            warn!("Boundary feature '{code}' has an empty outline; skipped");
            continue;
        }

        areas.push(AreaBoundary { code, shape });
    }

    Ok(areas)
}

fn ring(positions: &[Vec<f64>]) -> LineString<f64> {
    positions
        .iter()
        .filter(|p| p.len() >= 2)
        .map(|p| Coord { x: p[0], y: p[1] })
        .collect()
}

/// First ring is the exterior, the rest are holes. Exteriors with fewer than
/// three positions are degenerate and dropped.
fn polygon_from_rings(rings: &[Vec<Vec<f64>>]) -> Option<Polygon<f64>> {
    let (exterior, holes) = rings.split_first()?;
    let exterior = ring(exterior);
    if exterior.0.len() < 3 {
        return None;
    }
    let interiors = holes.iter().map(|h| ring(h)).collect();
    Some(Polygon::new(exterior, interiors))
}
