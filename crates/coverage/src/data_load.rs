//! Startup data load.
//!
//! The map needs two inputs before it can draw anything: the coverage CSV and
//! the GeoJSON boundary file. On native both are read from disk during
//! `Startup`; on WASM they are fetched over HTTP from an async task that
//! fills a shared slot. Either way [`finish_load`] polls the slot while in
//! [`AppState::Loading`], ingests the data and moves to `Ready`, or records a
//! [`StartupFailure`] and moves to `Failed`.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use crate::app_state::AppState;
use crate::boundaries::{parse_boundaries, Boundaries};
use crate::config::{DEFAULT_BOUNDARIES_PATH, DEFAULT_CSV_PATH};
use crate::csv_ingest::{ingest_csv, IngestReport};
use crate::error::LoadError;
use crate::store::CoverageStore;

// =============================================================================
// Resources
// =============================================================================

/// Where the startup inputs come from.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct CoverageSource {
    pub csv: String,
    pub boundaries: String,
}

impl Default for CoverageSource {
    fn default() -> Self {
        Self {
            csv: DEFAULT_CSV_PATH.to_string(),
            boundaries: DEFAULT_BOUNDARIES_PATH.to_string(),
        }
    }
}

impl CoverageSource {
    /// Defaults, overridden by `COVERAGE_CSV` / `COVERAGE_BOUNDARIES`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        use crate::config::{BOUNDARIES_PATH_ENV, CSV_PATH_ENV};

        let mut source = Self::default();
        if let Ok(path) = std::env::var(CSV_PATH_ENV) {
            source.csv = path;
        }
        if let Ok(path) = std::env::var(BOUNDARIES_PATH_ENV) {
            source.boundaries = path;
        }
        source
    }

    /// Defaults, overridden by `?csv=...&boundaries=...` in the page URL.
    #[cfg(target_arch = "wasm32")]
    pub fn from_query() -> Self {
        let mut source = Self::default();
        let Some(params) = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok())
        else {
            return source;
        };
        if let Some(csv) = params.get("csv").filter(|v| !v.trim().is_empty()) {
            source.csv = csv;
        }
        if let Some(boundaries) = params.get("boundaries").filter(|v| !v.trim().is_empty()) {
            source.boundaries = boundaries;
        }
        source
    }
}

/// Raw contents of both startup inputs. The CSV stays as bytes; encoding
/// problems are reported per row by the ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedData {
    pub csv_data: Vec<u8>,
    pub boundaries_text: String,
}

/// Shared slot used to bridge the (possibly async) load into the ECS world.
#[derive(Resource, Default, Clone)]
pub struct LoadBuffer(pub Arc<Mutex<Option<Result<LoadedData, LoadError>>>>);

impl LoadBuffer {
    pub fn fill(&self, result: Result<LoadedData, LoadError>) {
        if let Ok(mut guard) = self.0.lock() {
            *guard = Some(result);
        }
    }
}

/// Message of the load failure that stopped startup.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct StartupFailure(pub String);

/// Outcome of ingesting the CSV, kept for the UI status line.
#[derive(Resource, Debug, Clone, Default)]
pub struct LastIngest(pub IngestReport);

// =============================================================================
// Systems
// =============================================================================

/// Startup system (native): read both inputs from disk.
#[cfg(not(target_arch = "wasm32"))]
pub fn begin_load(source: Res<CoverageSource>, buffer: Res<LoadBuffer>) {
    info!(
        "Loading coverage from '{}' and boundaries from '{}'",
        source.csv, source.boundaries
    );
    let result = read_bytes(&source.csv).and_then(|csv_data| {
        Ok(LoadedData {
            csv_data,
            boundaries_text: read_text(&source.boundaries)?,
        })
    });
    buffer.fill(result);
}

/// Startup system (WASM): fetch both inputs, then fill the buffer.
#[cfg(target_arch = "wasm32")]
pub fn begin_load(source: Res<CoverageSource>, buffer: Res<LoadBuffer>) {
    info!(
        "Fetching coverage from '{}' and boundaries from '{}'",
        source.csv, source.boundaries
    );
    let source = source.clone();
    let buffer = buffer.clone();

    wasm_bindgen_futures::spawn_local(async move {
        let result = async {
            let csv_data = fetch_bytes(&source.csv).await?;
            let boundaries_text = fetch_text(&source.boundaries).await?;
            Ok::<_, LoadError>(LoadedData {
                csv_data,
                boundaries_text,
            })
        }
        .await;
        buffer.fill(result);
    });
}

/// Poll the load slot; ingest on success, record the failure otherwise.
pub fn finish_load(
    mut commands: Commands,
    buffer: Res<LoadBuffer>,
    mut store: ResMut<CoverageStore>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Ok(mut slot) = buffer.0.lock() else {
        return;
    };
    let Some(result) = slot.take() else {
        return;
    };

    match result.and_then(|data| apply_loaded(&data, &mut store)) {
        Ok((report, boundaries)) => {
            report.log();
            info!(
                "Map data ready: {} areas with coverage records, {} boundaries",
                store.len(),
                boundaries.0.len()
            );
            commands.insert_resource(LastIngest(report));
            commands.insert_resource(boundaries);
            next_state.set(AppState::Ready);
        }
        Err(e) => {
            error!("Map initialization error: {e}");
            commands.insert_resource(StartupFailure(e.to_string()));
            next_state.set(AppState::Failed);
        }
    }
}

/// Parses the boundaries first so a bad boundary file leaves the store
/// untouched, then merges the CSV into `store`.
pub fn apply_loaded(
    data: &LoadedData,
    store: &mut CoverageStore,
) -> Result<(IngestReport, Boundaries), LoadError> {
    let boundaries = parse_boundaries(&data.boundaries_text)?;
    let report = ingest_csv(&data.csv_data, store);
    Ok((report, Boundaries(boundaries)))
}

// =============================================================================
// I/O helpers
// =============================================================================

#[cfg(not(target_arch = "wasm32"))]
fn read_bytes(path: &str) -> Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn read_text(path: &str) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })
}

#[cfg(target_arch = "wasm32")]
async fn fetch_response(url: &str) -> Result<web_sys::Response, LoadError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window =
        web_sys::window().ok_or_else(|| LoadError::Fetch("window not available".to_string()))?;
    let response_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| LoadError::Fetch(format!("{url}: {e:?}")))?;

    let response: web_sys::Response = response_value
        .dyn_into()
        .map_err(|_| LoadError::Fetch("failed to cast fetch response".to_string()))?;

    if !response.ok() {
        return Err(LoadError::Http {
            status: response.status(),
            url: url.to_string(),
        });
    }

    Ok(response)
}

#[cfg(target_arch = "wasm32")]
async fn fetch_text(url: &str) -> Result<String, LoadError> {
    use wasm_bindgen_futures::JsFuture;

    let response = fetch_response(url).await?;
    let text_promise = response
        .text()
        .map_err(|e| LoadError::Fetch(format!("response.text() failed: {e:?}")))?;
    let text_value = JsFuture::from(text_promise)
        .await
        .map_err(|e| LoadError::Fetch(format!("await response text failed: {e:?}")))?;
    text_value
        .as_string()
        .ok_or_else(|| LoadError::Fetch("response text was not a string".to_string()))
}

#[cfg(target_arch = "wasm32")]
async fn fetch_bytes(url: &str) -> Result<Vec<u8>, LoadError> {
    use wasm_bindgen_futures::JsFuture;

    let response = fetch_response(url).await?;
    let buffer_promise = response
        .array_buffer()
        .map_err(|e| LoadError::Fetch(format!("response.arrayBuffer() failed: {e:?}")))?;
    let buffer = JsFuture::from(buffer_promise)
        .await
        .map_err(|e| LoadError::Fetch(format!("await response body failed: {e:?}")))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area_code::AreaCode;
    use bevy::state::app::StatesPlugin;

    const CSV: &str = "Region,Solar Panels,Heat Pumps,Ev Chargers\nAB12 3CD,1,0,0\n";
    const GEOJSON: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"name":"AB"},
         "geometry":{"type":"Polygon","coordinates":[[[-2.5,57.0],[-1.8,57.0],[-1.8,57.5],[-2.5,57.0]]]}}
    ]}"#;

    fn load_app() -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<AppState>()
            .init_resource::<CoverageStore>()
            .init_resource::<LoadBuffer>()
            .add_systems(Update, finish_load.run_if(in_state(AppState::Loading)));
        app
    }

    fn loaded() -> LoadedData {
        LoadedData {
            csv_data: CSV.as_bytes().to_vec(),
            boundaries_text: GEOJSON.to_string(),
        }
    }

    #[test]
    fn test_apply_loaded_fills_store_and_boundaries() {
        let mut store = CoverageStore::new();
        let (report, boundaries) = apply_loaded(&loaded(), &mut store).unwrap();
        assert_eq!(report.rows_ingested, 1);
        assert_eq!(boundaries.0.len(), 1);
        assert!(store.get_or_default(&AreaCode::parse("AB").unwrap()).has_solar);
    }

    #[test]
    fn test_bad_boundaries_leave_store_untouched() {
        let mut store = CoverageStore::new();
        let data = LoadedData {
            csv_data: CSV.as_bytes().to_vec(),
            boundaries_text: "{}".to_string(),
        };
        assert!(apply_loaded(&data, &mut store).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_stays_loading_until_buffer_filled() {
        let mut app = load_app();
        app.update();
        app.update();
        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::Loading
        );
    }

    #[test]
    fn test_successful_load_moves_to_ready() {
        let mut app = load_app();
        app.world().resource::<LoadBuffer>().fill(Ok(loaded()));
        app.update();
        app.update();

        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::Ready
        );
        assert_eq!(app.world().resource::<Boundaries>().0.len(), 1);
        assert_eq!(app.world().resource::<CoverageStore>().len(), 1);
        assert!(app.world().get_resource::<StartupFailure>().is_none());
    }

    #[test]
    fn test_fetch_failure_moves_to_failed() {
        let mut app = load_app();
        app.world().resource::<LoadBuffer>().fill(Err(LoadError::Http {
            status: 404,
            url: "./data/coverage.csv".to_string(),
        }));
        app.update();
        app.update();

        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::Failed
        );
        let failure = app.world().resource::<StartupFailure>();
        assert!(failure.0.contains("404"));
        assert!(app.world().get_resource::<Boundaries>().is_none());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_missing_file_is_io_error() {
        let mut app = App::new();
        app.insert_resource(CoverageSource {
            csv: "/nonexistent/coverage_map_test/coverage.csv".to_string(),
            boundaries: DEFAULT_BOUNDARIES_PATH.to_string(),
        })
        .init_resource::<LoadBuffer>()
        .add_systems(Startup, begin_load);
        app.update();

        let buffer = app.world().resource::<LoadBuffer>().clone();
        let result = buffer.0.lock().unwrap().take();
        assert!(matches!(result, Some(Err(LoadError::Io { .. }))));
    }
}
