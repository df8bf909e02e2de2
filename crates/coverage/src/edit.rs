//! Edit controller.
//!
//! A two-state machine: `Idle` (no selection) and `Editing` (one area
//! selected). Selecting an area opens the editor on it and guarantees the
//! area has a record in the [`CoverageStore`], so opening the panel alone can
//! add an all-false entry. Every toggle is applied to the store immediately
//! and announced with a [`CoverageChangedEvent`] so the region style and popup
//! follow in the same frame; there is no draft to commit.

use bevy::prelude::*;

use crate::area_code::AreaCode;
use crate::record::ServiceKind;
use crate::store::CoverageStore;

// =============================================================================
// State
// =============================================================================

/// The area currently under edit and the map region it was opened from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    pub code: AreaCode,
    pub region: Option<Entity>,
}

/// `None` is Idle, `Some` is Editing.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct EditingSelection(pub Option<EditTarget>);

impl EditingSelection {
    pub fn is_editing(&self) -> bool {
        self.0.is_some()
    }

    pub fn code(&self) -> Option<&AreaCode> {
        self.0.as_ref().map(|t| &t.code)
    }
}

// =============================================================================
// Events
// =============================================================================

/// Open the editor on an area (Idle→Editing, or switch area while Editing).
#[derive(Event, Debug, Clone)]
pub struct SelectAreaEvent {
    pub code: AreaCode,
    pub region: Option<Entity>,
}

/// Set one service flag of the area under edit.
#[derive(Event, Debug, Clone, Copy)]
pub struct ToggleServiceEvent {
    pub service: ServiceKind,
    pub enabled: bool,
}

/// Close the editor (Editing→Idle).
#[derive(Event, Debug, Clone, Copy)]
pub struct CloseEditEvent;

/// A record in the store changed; dependants of `code` must refresh.
#[derive(Event, Debug, Clone)]
pub struct CoverageChangedEvent {
    pub code: AreaCode,
    pub region: Option<Entity>,
}

/// Systems that mutate the store in response to edits. UI input runs before
/// this set; restyling and popup refresh run after it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct EditSet;

// =============================================================================
// Systems
// =============================================================================

/// Creating the default record is not announced: an all-false record draws
/// like a missing one, and an open popup keeps the text it was built with.
pub fn open_editor(
    mut events: EventReader<SelectAreaEvent>,
    mut selection: ResMut<EditingSelection>,
    mut store: ResMut<CoverageStore>,
) {
    // Only the last selection of the frame matters.
    let Some(event) = events.read().last() else {
        return;
    };

    if !store.contains(&event.code) {
        store.entry_or_default(&event.code);
    }

    debug!("Editing services for {}", event.code);
    selection.0 = Some(EditTarget {
        code: event.code.clone(),
        region: event.region,
    });
}

pub fn apply_service_toggles(
    mut events: EventReader<ToggleServiceEvent>,
    selection: Res<EditingSelection>,
    mut store: ResMut<CoverageStore>,
    mut changed: EventWriter<CoverageChangedEvent>,
) {
    let Some(target) = selection.0.as_ref() else {
        // Toggles while Idle have nothing to apply to.
        events.read().for_each(drop);
        return;
    };

    for event in events.read() {
        let record = store.entry_or_default(&target.code);
        if record.get(event.service) == event.enabled {
            continue;
        }
        record.set(event.service, event.enabled);
        info!(
            "{}: {} {}",
            target.code,
            event.service.label(),
            if event.enabled { "enabled" } else { "disabled" }
        );
        changed.send(CoverageChangedEvent {
            code: target.code.clone(),
            region: target.region,
        });
    }
}

pub fn close_editor(
    mut events: EventReader<CloseEditEvent>,
    mut selection: ResMut<EditingSelection>,
) {
    if events.read().last().is_some() {
        selection.0 = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CoverageRecord;

    fn edit_app() -> App {
        let mut app = App::new();
        app.init_resource::<CoverageStore>()
            .init_resource::<EditingSelection>()
            .add_event::<SelectAreaEvent>()
            .add_event::<ToggleServiceEvent>()
            .add_event::<CloseEditEvent>()
            .add_event::<CoverageChangedEvent>()
            .add_systems(
                Update,
                (open_editor, apply_service_toggles, close_editor).chain(),
            );
        app
    }

    fn code(s: &str) -> AreaCode {
        AreaCode::parse(s).unwrap()
    }

    fn changed_codes(app: &mut App) -> Vec<String> {
        app.world_mut()
            .resource_mut::<Events<CoverageChangedEvent>>()
            .drain()
            .map(|e| e.code.to_string())
            .collect()
    }

    #[test]
    fn test_opening_unknown_area_creates_default_record() {
        let mut app = edit_app();
        app.world_mut().send_event(SelectAreaEvent {
            code: code("ZE"),
            region: None,
        });
        app.update();

        let store = app.world().resource::<CoverageStore>();
        assert_eq!(store.get(&code("ZE")), Some(&CoverageRecord::default()));
        let selection = app.world().resource::<EditingSelection>();
        assert_eq!(selection.code(), Some(&code("ZE")));
        assert!(changed_codes(&mut app).is_empty());
    }

    #[test]
    fn test_opening_known_area_leaves_record_alone() {
        let mut app = edit_app();
        app.world_mut()
            .resource_mut::<CoverageStore>()
            .entry_or_default(&code("AB"))
            .has_solar = true;
        app.world_mut().send_event(SelectAreaEvent {
            code: code("AB"),
            region: None,
        });
        app.update();

        let store = app.world().resource::<CoverageStore>();
        assert!(store.get_or_default(&code("AB")).has_solar);
        assert!(changed_codes(&mut app).is_empty());
    }

    #[test]
    fn test_toggle_applies_immediately() {
        let mut app = edit_app();
        app.world_mut().send_event(SelectAreaEvent {
            code: code("AB"),
            region: None,
        });
        app.update();
        changed_codes(&mut app);

        app.world_mut().send_event(ToggleServiceEvent {
            service: ServiceKind::HeatPump,
            enabled: true,
        });
        app.update();

        let record = app
            .world()
            .resource::<CoverageStore>()
            .get_or_default(&code("AB"));
        assert_eq!(record, CoverageRecord::new(false, true, false));
        assert_eq!(changed_codes(&mut app), vec!["AB".to_string()]);
        // Still editing: no commit step.
        assert!(app.world().resource::<EditingSelection>().is_editing());
    }

    #[test]
    fn test_toggle_can_clear_a_flag() {
        let mut app = edit_app();
        app.world_mut()
            .resource_mut::<CoverageStore>()
            .entry_or_default(&code("EH"))
            .has_ev = true;
        app.world_mut().send_event(SelectAreaEvent {
            code: code("EH"),
            region: None,
        });
        app.world_mut().send_event(ToggleServiceEvent {
            service: ServiceKind::Ev,
            enabled: false,
        });
        app.update();

        let store = app.world().resource::<CoverageStore>();
        assert!(!store.get_or_default(&code("EH")).has_ev);
        assert!(store.contains(&code("EH")));
    }

    #[test]
    fn test_toggle_while_idle_is_ignored() {
        let mut app = edit_app();
        app.world_mut().send_event(ToggleServiceEvent {
            service: ServiceKind::Solar,
            enabled: true,
        });
        app.update();

        assert!(app.world().resource::<CoverageStore>().is_empty());
        assert!(changed_codes(&mut app).is_empty());
    }

    #[test]
    fn test_close_returns_to_idle() {
        let mut app = edit_app();
        app.world_mut().send_event(SelectAreaEvent {
            code: code("AB"),
            region: None,
        });
        app.update();
        app.world_mut().send_event(CloseEditEvent);
        app.update();

        assert!(!app.world().resource::<EditingSelection>().is_editing());
        // The record created by opening survives the close.
        assert!(app.world().resource::<CoverageStore>().contains(&code("AB")));
    }

    #[test]
    fn test_selecting_another_area_switches_target() {
        let mut app = edit_app();
        app.world_mut().send_event(SelectAreaEvent {
            code: code("AB"),
            region: None,
        });
        app.update();
        app.world_mut().send_event(SelectAreaEvent {
            code: code("CD"),
            region: None,
        });
        app.world_mut().send_event(ToggleServiceEvent {
            service: ServiceKind::Solar,
            enabled: true,
        });
        app.update();

        let store = app.world().resource::<CoverageStore>();
        assert!(!store.get_or_default(&code("AB")).has_solar);
        assert!(store.get_or_default(&code("CD")).has_solar);
    }
}
