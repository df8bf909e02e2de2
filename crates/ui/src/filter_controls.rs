//! Service filter checkboxes, the download button and the data status line.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use coverage::data_load::LastIngest;
use coverage::filter::FilterState;
use coverage::ServiceKind;
use export::{ExportCoverageEvent, ExportStatus};

use crate::theme;

/// Status line under the download button, `None` before the first export.
pub fn export_status_text(status: &ExportStatus) -> Option<String> {
    match status {
        ExportStatus::Idle => None,
        ExportStatus::Done { rows, destination } => {
            Some(format!("Saved {rows} areas to {destination}"))
        }
        ExportStatus::Failed(message) => Some(format!("Export failed: {message}")),
    }
}

pub fn filter_controls_ui(
    mut contexts: EguiContexts,
    mut filter: ResMut<FilterState>,
    export_status: Res<ExportStatus>,
    last_ingest: Option<Res<LastIngest>>,
    mut export: EventWriter<ExportCoverageEvent>,
) {
    let ctx = contexts.ctx_mut();
    let mut edited = *filter;

    egui::Window::new("service_filters")
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new("Show services")
                    .strong()
                    .color(theme::TEXT_HEADING),
            );
            for service in ServiceKind::PRIORITY {
                let mut shown = edited.shows(service);
                if ui.checkbox(&mut shown, service.label()).changed() {
                    edited.set(service, shown);
                }
            }

            ui.separator();
            if ui.button("Download updated CSV").clicked() {
                export.send(ExportCoverageEvent);
            }
            if let Some(text) = export_status_text(&export_status) {
                let color = match *export_status {
                    ExportStatus::Failed(_) => theme::TEXT_ERROR,
                    _ => theme::TEXT_MUTED,
                };
                ui.label(
                    egui::RichText::new(text)
                        .size(theme::FONT_SMALL)
                        .color(color),
                );
            }

            if let Some(ingest) = &last_ingest {
                let report = &ingest.0;
                let mut line = format!("{} rows loaded", report.rows_ingested);
                if !report.warnings.is_empty() {
                    line.push_str(&format!(", {} skipped (see log)", report.warnings.len()));
                }
                ui.label(
                    egui::RichText::new(line)
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_MUTED),
                );
            }
        });

    // Only touch the resource on a real change so the full restyle pass
    // does not run every frame.
    filter.set_if_neq(edited);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(export_status_text(&ExportStatus::Idle), None);
        assert_eq!(
            export_status_text(&ExportStatus::Done {
                rows: 3,
                destination: "./updated_service_coverage.csv".to_string(),
            })
            .as_deref(),
            Some("Saved 3 areas to ./updated_service_coverage.csv")
        );
        assert_eq!(
            export_status_text(&ExportStatus::Failed("disk full".to_string())).as_deref(),
            Some("Export failed: disk full")
        );
    }
}
