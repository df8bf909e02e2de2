//! Area summary popup.
//!
//! Opened at the cursor when a region is clicked, closed by a click on empty
//! map. The text is built from the store before the editor opens, so an area
//! missing from the data says so, and is rebuilt in the same frame a toggle
//! lands. Filter toggles never affect it.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use coverage::edit::CoverageChangedEvent;
use coverage::{AreaCode, CoverageRecord, CoverageStore};
use rendering::picking::MapClickEvent;

use crate::theme;

/// Rendered popup text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupContent {
    pub title: String,
    pub lines: Vec<String>,
}

/// The popup currently shown, if any.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct OpenPopup(pub Option<ShownPopup>);

#[derive(Debug, Clone, PartialEq)]
pub struct ShownPopup {
    pub code: AreaCode,
    /// Anchor in logical window pixels.
    pub screen_pos: Vec2,
    pub content: PopupContent,
}

pub fn popup_content(code: &AreaCode, record: Option<&CoverageRecord>) -> PopupContent {
    let mut lines = Vec::new();
    match record {
        Some(record) => {
            lines.push("Services Available:".to_string());
            let mut any = false;
            for service in record.active_services() {
                lines.push(format!("✔ {}", service.label()));
                any = true;
            }
            if !any {
                lines.push("None".to_string());
            }
        }
        None => lines.push("No services defined in your data.".to_string()),
    }
    lines.push("Click to edit services.".to_string());

    PopupContent {
        title: format!("Postcode Area: {code}"),
        lines,
    }
}

/// Opens the popup on region clicks and closes it on empty-map clicks.
pub fn track_popup_clicks(
    mut clicks: EventReader<MapClickEvent>,
    store: Res<CoverageStore>,
    mut popup: ResMut<OpenPopup>,
) {
    let Some(click) = clicks.read().last() else {
        return;
    };
    popup.0 = click.code.as_ref().map(|code| ShownPopup {
        code: code.clone(),
        screen_pos: click.screen_pos,
        content: popup_content(code, store.get(code)),
    });
}

/// Rebuilds the popup text when the shown area's record changed.
pub fn refresh_popup(
    mut changes: EventReader<CoverageChangedEvent>,
    store: Res<CoverageStore>,
    mut popup: ResMut<OpenPopup>,
) {
    let Some(shown) = popup.0.as_mut() else {
        changes.read().for_each(drop);
        return;
    };
    if changes.read().any(|c| c.code == shown.code) {
        shown.content = popup_content(&shown.code, store.get(&shown.code));
    }
}

pub fn popup_ui(mut contexts: EguiContexts, popup: Res<OpenPopup>) {
    let Some(shown) = &popup.0 else {
        return;
    };
    let ctx = contexts.ctx_mut();

    egui::Area::new(egui::Id::new("area_popup"))
        .fixed_pos(egui::pos2(shown.screen_pos.x, shown.screen_pos.y))
        .pivot(egui::Align2::CENTER_BOTTOM)
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .inner_margin(egui::Margin::same(10))
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(&shown.content.title)
                            .strong()
                            .size(theme::FONT_BODY + 1.0)
                            .color(theme::TEXT_HEADING),
                    );
                    ui.add_space(4.0);
                    let (hint, body) = shown
                        .content
                        .lines
                        .split_last()
                        .map(|(last, rest)| (Some(last), rest))
                        .unwrap_or((None, &[]));
                    for line in body {
                        ui.label(egui::RichText::new(line).size(theme::FONT_BODY));
                    }
                    if let Some(hint) = hint {
                        ui.add_space(4.0);
                        ui.label(
                            egui::RichText::new(hint)
                                .italics()
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_MUTED),
                        );
                    }
                });
        });
}
