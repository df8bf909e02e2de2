use bevy_egui::{egui, EguiContexts};

pub const FONT_HEADING: f32 = 18.0;
pub const FONT_BODY: f32 = 13.0;
pub const FONT_SMALL: f32 = 11.0;

pub const TEXT_HEADING: egui::Color32 = egui::Color32::from_rgb(30, 34, 42);
pub const TEXT_MUTED: egui::Color32 = egui::Color32::from_rgb(96, 102, 112);
pub const TEXT_ERROR: egui::Color32 = egui::Color32::from_rgb(176, 40, 32);

/// Light panels over the map.
pub fn apply_map_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();
    style.visuals = egui::Visuals::light();

    let panel = egui::Color32::from_rgb(250, 250, 248);
    let inactive = egui::Color32::from_rgb(228, 230, 232);
    let hover = egui::Color32::from_rgb(210, 218, 228);
    let active = egui::Color32::from_rgb(52, 152, 219);

    style.visuals.widgets.noninteractive.bg_fill = panel;
    style.visuals.widgets.inactive.bg_fill = inactive;
    style.visuals.widgets.hovered.bg_fill = hover;
    style.visuals.widgets.active.bg_fill = active;
    style.visuals.widgets.inactive.weak_bg_fill = inactive;
    style.visuals.widgets.hovered.weak_bg_fill = hover;
    style.visuals.widgets.active.weak_bg_fill = active;

    style.visuals.window_fill = panel;
    style.visuals.panel_fill = panel;

    style.visuals.selection.bg_fill = active;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, active);

    let window_rounding = egui::CornerRadius::same(6);
    let widget_rounding = egui::CornerRadius::same(4);

    style.visuals.window_corner_radius = window_rounding;
    style.visuals.widgets.noninteractive.corner_radius = widget_rounding;
    style.visuals.widgets.inactive.corner_radius = widget_rounding;
    style.visuals.widgets.hovered.corner_radius = widget_rounding;
    style.visuals.widgets.active.corner_radius = widget_rounding;

    ctx.set_style(style);
}
