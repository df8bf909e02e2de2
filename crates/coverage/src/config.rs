pub const DEFAULT_CSV_PATH: &str = "assets/data/coverage.csv";
pub const DEFAULT_BOUNDARIES_PATH: &str = "assets/data/postcode_areas.geojson";

/// Native override for the coverage table location.
pub const CSV_PATH_ENV: &str = "COVERAGE_CSV";
/// Native override for the GeoJSON boundary file location.
pub const BOUNDARIES_PATH_ENV: &str = "COVERAGE_BOUNDARIES";
/// Native override for the directory the exported CSV is written into.
pub const EXPORT_DIR_ENV: &str = "COVERAGE_EXPORT_DIR";

pub const REGION_COLUMN: &str = "Region";
pub const SOLAR_COLUMN: &str = "Solar Panels";
pub const HEAT_PUMP_COLUMN: &str = "Heat Pumps";
pub const EV_COLUMN: &str = "Ev Chargers";

/// First column of the exported table.
pub const EXPORT_AREA_COLUMN: &str = "Area";
pub const EXPORT_FILE_NAME: &str = "updated_service_coverage.csv";

/// The only flag value that counts as "service present".
pub const FLAG_TRUE: &str = "1";
pub const FLAG_FALSE: &str = "0";

/// Geographic extent of the map in degrees: (min_lon, min_lat, max_lon, max_lat).
pub const MAP_BOUNDS: (f64, f64, f64, f64) = (-8.5, 49.5, 2.0, 61.0);
/// Initial map centre in degrees (lon, lat).
pub const MAP_CENTER: (f64, f64) = (-2.5, 54.8);
