use bevy::prelude::*;

pub mod app_state;
pub mod area_code;
pub mod boundaries;
pub mod config;
pub mod csv_ingest;
pub mod data_load;
pub mod edit;
pub mod error;
pub mod filter;
pub mod record;
pub mod store;

pub use area_code::AreaCode;
pub use record::{CoverageRecord, ServiceKind};
pub use store::CoverageStore;

use app_state::AppState;
use data_load::{CoverageSource, LoadBuffer};
use edit::{
    CloseEditEvent, CoverageChangedEvent, EditSet, EditingSelection, SelectAreaEvent,
    ToggleServiceEvent,
};
use filter::FilterState;

pub struct CoveragePlugin;

impl Plugin for CoveragePlugin {
    fn build(&self, app: &mut App) {
        // Callers (tests, embedders) may insert their own source first.
        if !app.world().contains_resource::<CoverageSource>() {
            #[cfg(not(target_arch = "wasm32"))]
            app.insert_resource(CoverageSource::from_env());
            #[cfg(target_arch = "wasm32")]
            app.insert_resource(CoverageSource::from_query());
        }

        app.init_state::<AppState>()
            .init_resource::<CoverageStore>()
            .init_resource::<FilterState>()
            .init_resource::<EditingSelection>()
            .init_resource::<LoadBuffer>()
            .add_event::<SelectAreaEvent>()
            .add_event::<ToggleServiceEvent>()
            .add_event::<CloseEditEvent>()
            .add_event::<CoverageChangedEvent>()
            .add_systems(Startup, data_load::begin_load)
            .add_systems(
                Update,
                data_load::finish_load.run_if(in_state(AppState::Loading)),
            )
            .add_systems(
                Update,
                (
                    edit::open_editor,
                    edit::apply_service_toggles,
                    edit::close_editor,
                )
                    .chain()
                    .in_set(EditSet)
                    .run_if(in_state(AppState::Ready)),
            );
    }
}
