//! Lon/lat to world-plane projection.
//!
//! Spherical Web Mercator, the projection slippy maps use, recentred on the
//! map centre so world coordinates stay small. World +Y is north.

use bevy::prelude::*;
use geo::{Coord, MapCoords, MultiPolygon};

use coverage::config::{MAP_BOUNDS, MAP_CENTER};

/// World units per radian of longitude.
pub const WORLD_SCALE: f64 = 1000.0;

fn mercator_y(lat_deg: f64) -> f64 {
    let phi = lat_deg.to_radians();
    (std::f64::consts::FRAC_PI_4 + phi / 2.0).tan().ln()
}

/// Projects a lon/lat coordinate (degrees) to the world plane.
pub fn project(lon: f64, lat: f64) -> Coord<f64> {
    let (center_lon, center_lat) = MAP_CENTER;
    Coord {
        x: (lon - center_lon).to_radians() * WORLD_SCALE,
        y: (mercator_y(lat) - mercator_y(center_lat)) * WORLD_SCALE,
    }
}

pub fn project_shape(shape: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    shape.map_coords(|c| project(c.x, c.y))
}

/// World-space rectangle covering the map bounds.
pub fn world_bounds() -> Rect {
    let (min_lon, min_lat, max_lon, max_lat) = MAP_BOUNDS;
    let min = project(min_lon, min_lat);
    let max = project(max_lon, max_lat);
    Rect::new(min.x as f32, min.y as f32, max.x as f32, max.y as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_projects_to_origin() {
        let (lon, lat) = MAP_CENTER;
        let c = project(lon, lat);
        assert!(c.x.abs() < 1e-9);
        assert!(c.y.abs() < 1e-9);
    }

    #[test]
    fn test_north_is_up_and_east_is_right() {
        let (lon, lat) = MAP_CENTER;
        assert!(project(lon, lat + 1.0).y > 0.0);
        assert!(project(lon + 1.0, lat).x > 0.0);
    }

    #[test]
    fn test_mercator_stretches_towards_pole() {
        let (lon, _) = MAP_CENTER;
        let south = project(lon, 51.0).y - project(lon, 50.0).y;
        let north = project(lon, 60.0).y - project(lon, 59.0).y;
        assert!(north > south);
    }

    #[test]
    fn test_world_bounds_contain_center() {
        let bounds = world_bounds();
        assert!(bounds.contains(Vec2::ZERO));
        assert!(bounds.width() > 0.0 && bounds.height() > 0.0);
    }
}
