//! Loading indicator and the blocking startup error.
//!
//! While the inputs load a small animated message is shown. If loading fails
//! the map stays empty and a modal with the failure message covers it.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use coverage::data_load::StartupFailure;

use crate::theme;

/// Animated dots for the loading message.
#[derive(Resource)]
pub struct LoadingAnimation {
    /// 1 -> 2 -> 3 -> 1 ...
    pub dots: usize,
    pub timer: Timer,
}

impl Default for LoadingAnimation {
    fn default() -> Self {
        Self {
            dots: 1,
            timer: Timer::from_seconds(0.4, TimerMode::Repeating),
        }
    }
}

pub fn failure_message(failure: &StartupFailure) -> String {
    format!("Error initializing map: {}", failure.0)
}

/// Runs in `AppState::Loading`.
pub fn loading_indicator_ui(
    mut contexts: EguiContexts,
    time: Res<Time>,
    mut animation: ResMut<LoadingAnimation>,
) {
    animation.timer.tick(time.delta());
    if animation.timer.just_finished() {
        animation.dots = animation.dots % 3 + 1;
    }
    let text = format!("Loading coverage data{}", ".".repeat(animation.dots));

    egui::Window::new("loading_indicator")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(contexts.ctx_mut(), |ui| {
            ui.label(
                egui::RichText::new(text)
                    .size(theme::FONT_HEADING)
                    .color(theme::TEXT_HEADING),
            );
        });
}

/// Runs in `AppState::Failed`.
pub fn startup_failure_ui(mut contexts: EguiContexts, failure: Option<Res<StartupFailure>>) {
    let message = failure
        .map(|f| failure_message(&f))
        .unwrap_or_else(|| "Error initializing map".to_string());

    let ctx = contexts.ctx_mut();
    let screen_rect = ctx.screen_rect();

    // Backdrop that swallows all map input.
    egui::Area::new(egui::Id::new("startup_failure_backdrop"))
        .fixed_pos(screen_rect.min)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.painter().rect_filled(
                screen_rect,
                egui::CornerRadius::ZERO,
                egui::Color32::from_black_alpha(120),
            );
            ui.allocate_rect(screen_rect, egui::Sense::click_and_drag());
        });

    egui::Window::new("startup_failure")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .default_width(360.0)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new(message)
                        .size(theme::FONT_BODY + 1.0)
                        .color(theme::TEXT_ERROR),
                );
                ui.add_space(8.0);
            });
        });
}
