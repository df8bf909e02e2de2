use bevy_egui::{egui, EguiContexts};

use coverage::ServiceKind;
use rendering::style::{palette, service_color};

use crate::theme;

const MARGIN: f32 = 12.0;
const SWATCH: f32 = 14.0;

pub(crate) fn bevy_color_to_egui(color: bevy::prelude::Color) -> egui::Color32 {
    let s = color.to_srgba();
    egui::Color32::from_rgba_unmultiplied(
        (s.red * 255.0) as u8,
        (s.green * 255.0) as u8,
        (s.blue * 255.0) as u8,
        (s.alpha * 255.0) as u8,
    )
}

/// Swatches in priority order, then the fallback.
pub fn legend_entries() -> Vec<(egui::Color32, &'static str)> {
    ServiceKind::PRIORITY
        .iter()
        .map(|&service| {
            (
                bevy_color_to_egui(service_color(service)),
                service.short_label(),
            )
        })
        .chain(std::iter::once((
            bevy_color_to_egui(palette::INACTIVE),
            "Inactive/Other",
        )))
        .collect()
}

pub fn legend_ui(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let screen = ctx.screen_rect();

    egui::Area::new(egui::Id::new("service_legend"))
        .fixed_pos(egui::pos2(screen.max.x - MARGIN, screen.max.y - MARGIN))
        .pivot(egui::Align2::RIGHT_BOTTOM)
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(egui::Color32::from_rgba_unmultiplied(250, 250, 248, 230))
                .corner_radius(egui::CornerRadius::same(6))
                .inner_margin(egui::Margin::same(8))
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new("Service Colour Key (Priority Order)")
                            .strong()
                            .size(theme::FONT_BODY)
                            .color(theme::TEXT_HEADING),
                    );
                    ui.add_space(4.0);

                    for (color, label) in legend_entries() {
                        ui.horizontal(|ui| {
                            let (rect, _) = ui.allocate_exact_size(
                                egui::vec2(SWATCH, SWATCH),
                                egui::Sense::hover(),
                            );
                            ui.painter().rect_filled(rect, 2.0, color);
                            ui.label(egui::RichText::new(label).size(theme::FONT_SMALL));
                        });
                    }
                });
        });
}
