use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use coverage::edit::{CloseEditEvent, EditingSelection, ToggleServiceEvent};
use coverage::{CoverageStore, ServiceKind};

use crate::theme;

/// Service edit form for the area under edit. Every checkbox change is sent
/// straight to the edit controller; there is no draft state here.
pub fn edit_panel_ui(
    mut contexts: EguiContexts,
    selection: Res<EditingSelection>,
    store: Res<CoverageStore>,
    mut toggles: EventWriter<ToggleServiceEvent>,
    mut close: EventWriter<CloseEditEvent>,
) {
    let Some(code) = selection.code() else {
        return;
    };
    let record = store.get_or_default(code);
    let ctx = contexts.ctx_mut();

    egui::Window::new("edit_services")
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 12.0))
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("Edit Services for {code}"))
                    .strong()
                    .size(theme::FONT_BODY + 2.0)
                    .color(theme::TEXT_HEADING),
            );
            ui.add_space(6.0);

            for service in ServiceKind::PRIORITY {
                let mut enabled = record.get(service);
                if ui.checkbox(&mut enabled, service.label()).changed() {
                    toggles.send(ToggleServiceEvent { service, enabled });
                }
            }

            ui.add_space(6.0);
            if ui.button("Close").clicked() {
                close.send(CloseEditEvent);
            }
        });
}
