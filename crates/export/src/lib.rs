use bevy::prelude::*;

use coverage::config::EXPORT_FILE_NAME;
use coverage::CoverageStore;

#[cfg(not(target_arch = "wasm32"))]
mod atomic_write;
pub mod csv_export;
#[cfg(target_arch = "wasm32")]
mod download;
mod export_error;

pub use csv_export::{export_csv, export_header, exported_row_count};
pub use export_error::ExportError;

// ---------------------------------------------------------------------------
// Events and resources
// ---------------------------------------------------------------------------

/// Request to export the current coverage table.
#[derive(Event)]
pub struct ExportCoverageEvent;

/// Result of the most recent export, shown next to the download button.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub enum ExportStatus {
    #[default]
    Idle,
    Done {
        rows: usize,
        destination: String,
    },
    Failed(String),
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct ExportPlugin;

impl Plugin for ExportPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ExportCoverageEvent>()
            .init_resource::<ExportStatus>()
            .add_systems(Update, handle_export_requests);
    }
}

/// Serializes the store and hands it to the platform delivery for every
/// request this frame (repeated clicks collapse into one export).
fn handle_export_requests(
    mut events: EventReader<ExportCoverageEvent>,
    store: Res<CoverageStore>,
    mut status: ResMut<ExportStatus>,
) {
    if events.read().last().is_none() {
        return;
    }

    let rows = exported_row_count(&store);
    *status = match export_csv(&store).and_then(|text| deliver(&text)) {
        Ok(destination) => {
            info!("Exported {rows} areas to {destination}");
            ExportStatus::Done { rows, destination }
        }
        Err(e) => {
            error!("Export failed: {e}");
            ExportStatus::Failed(e.to_string())
        }
    };
}

#[cfg(not(target_arch = "wasm32"))]
fn deliver(text: &str) -> Result<String, ExportError> {
    let path = atomic_write::write_export(
        &atomic_write::export_dir(),
        EXPORT_FILE_NAME,
        text.as_bytes(),
    )?;
    Ok(path.display().to_string())
}

#[cfg(target_arch = "wasm32")]
fn deliver(text: &str) -> Result<String, ExportError> {
    download::trigger_download(text, EXPORT_FILE_NAME)?;
    Ok(EXPORT_FILE_NAME.to_string())
}
