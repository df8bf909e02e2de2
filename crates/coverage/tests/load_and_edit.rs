//! End-to-end tests of the coverage plugin: startup load from disk, then
//! edits through the event API.
//!
//! Run: cargo test -p coverage --test load_and_edit

use std::fs;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use coverage::app_state::AppState;
use coverage::boundaries::Boundaries;
use coverage::data_load::{CoverageSource, LastIngest, StartupFailure};
use coverage::edit::{CloseEditEvent, EditingSelection, SelectAreaEvent, ToggleServiceEvent};
use coverage::{AreaCode, CoveragePlugin, CoverageRecord, CoverageStore, ServiceKind};

const CSV: &str = "\
Region,Solar Panels,Heat Pumps,Ev Chargers,Notes
AB12 3CD,1,0,0,
AB10 1AA,0,0,1,
EH1 1YZ,0,0,0,
B1 1AA,0,1,0,
12 BAD,1,1,1,
";

const GEOJSON: &str = r#"{"type":"FeatureCollection","features":[
  {"type":"Feature","properties":{"name":"AB"},"geometry":{"type":"Polygon","coordinates":[[[-2.6,57.0],[-1.8,57.0],[-1.8,57.6],[-2.6,57.6],[-2.6,57.0]]]}},
  {"type":"Feature","properties":{"name":"EH"},"geometry":{"type":"Polygon","coordinates":[[[-3.4,55.8],[-2.9,55.8],[-2.9,56.0],[-3.4,56.0],[-3.4,55.8]]]}},
  {"type":"Feature","properties":{"name":"ZE"},"geometry":{"type":"MultiPolygon","coordinates":[[[[-1.4,59.8],[-1.0,59.8],[-1.0,60.8],[-1.4,59.8]]]]}}
]}"#;

/// Helper to create a unique temp directory for each test.
fn test_dir(name: &str) -> String {
    let dir = format!("/tmp/coverage_map_load_test_{}", name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn app_with_files(dir: &str, csv: impl AsRef<[u8]>, geojson: Option<&str>) -> App {
    let csv_path = format!("{}/coverage.csv", dir);
    let geo_path = format!("{}/areas.geojson", dir);
    fs::write(&csv_path, csv).unwrap();
    if let Some(geojson) = geojson {
        fs::write(&geo_path, geojson).unwrap();
    }

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(StatesPlugin)
        .insert_resource(CoverageSource {
            csv: csv_path,
            boundaries: geo_path,
        })
        .add_plugins(CoveragePlugin);
    // Startup load, then the state transition.
    app.update();
    app.update();
    app
}

fn code(s: &str) -> AreaCode {
    AreaCode::parse(s).unwrap()
}

fn state(app: &App) -> AppState {
    *app.world().resource::<State<AppState>>().get()
}

#[test]
fn test_startup_load_populates_store() {
    let dir = test_dir("populates");
    let app = app_with_files(&dir, CSV, Some(GEOJSON));

    assert_eq!(state(&app), AppState::Ready);
    let store = app.world().resource::<CoverageStore>();
    assert_eq!(
        store.get(&code("AB")),
        Some(&CoverageRecord::new(true, false, true))
    );
    assert_eq!(store.get(&code("EH")), Some(&CoverageRecord::default()));
    assert_eq!(
        store.get(&code("B")),
        Some(&CoverageRecord::new(false, true, false))
    );
    assert_eq!(store.len(), 3);
    // ZE has a boundary but no record: a lookup miss, not an error.
    assert!(store.get(&code("ZE")).is_none());
    assert_eq!(app.world().resource::<Boundaries>().0.len(), 3);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_missing_boundary_file_fails_startup() {
    let dir = test_dir("missing_geo");
    let app = app_with_files(&dir, CSV, None);

    assert_eq!(state(&app), AppState::Failed);
    let failure = app.world().resource::<StartupFailure>();
    assert!(failure.0.contains("areas.geojson"));
    assert!(app.world().get_resource::<Boundaries>().is_none());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_invalid_utf8_row_does_not_fail_startup() {
    let dir = test_dir("invalid_utf8");
    let csv: &[u8] =
        b"Region,Solar Panels,Heat Pumps,Ev Chargers\nAB1,1,0,0\nCD1,\xff,0,0\nEF1,0,0,1\n";
    let app = app_with_files(&dir, csv, Some(GEOJSON));

    assert_eq!(state(&app), AppState::Ready);
    assert!(app.world().get_resource::<StartupFailure>().is_none());
    let store = app.world().resource::<CoverageStore>();
    assert!(store.get_or_default(&code("AB")).has_solar);
    assert!(store.get_or_default(&code("EF")).has_ev);
    assert!(!store.contains(&code("CD")));
    assert_eq!(app.world().resource::<LastIngest>().0.warnings.len(), 1);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_edit_session_on_unlisted_area() {
    let dir = test_dir("edit_session");
    let mut app = app_with_files(&dir, CSV, Some(GEOJSON));

    app.world_mut().send_event(SelectAreaEvent {
        code: code("ZE"),
        region: None,
    });
    app.update();
    assert_eq!(
        app.world().resource::<CoverageStore>().get(&code("ZE")),
        Some(&CoverageRecord::default())
    );

    app.world_mut().send_event(ToggleServiceEvent {
        service: ServiceKind::Ev,
        enabled: true,
    });
    app.update();
    assert!(
        app.world()
            .resource::<CoverageStore>()
            .get_or_default(&code("ZE"))
            .has_ev
    );

    app.world_mut().send_event(CloseEditEvent);
    app.update();
    assert!(!app.world().resource::<EditingSelection>().is_editing());

    let _ = fs::remove_dir_all(&dir);
}
