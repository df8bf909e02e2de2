//! Region style resolution.
//!
//! A region's look is a pure function of its coverage record and the filter
//! toggles. Services are checked in fixed priority (solar, heat pump, EV);
//! the first one that is both present and shown decides the fill. With no
//! match the region falls back to the faint, dashed inactive style.

use bevy::prelude::*;

use coverage::filter::FilterState;
use coverage::{CoverageRecord, ServiceKind};

pub mod palette {
    use bevy::prelude::Color;

    pub const SOLAR: Color = Color::srgb(0.96, 0.65, 0.14);
    pub const HEAT_PUMP: Color = Color::srgb(0.91, 0.30, 0.24);
    pub const EV: Color = Color::srgb(0.20, 0.60, 0.86);
    pub const INACTIVE: Color = Color::srgb(0.62, 0.62, 0.62);

    /// Region outline (#444).
    pub const BORDER: Color = Color::srgb(0.267, 0.267, 0.267);
    /// Outline of the region under the cursor (#333).
    pub const BORDER_HOVER: Color = Color::srgb(0.2, 0.2, 0.2);
}

const ACTIVE_FILL_OPACITY: f32 = 0.65;
const ACTIVE_WEIGHT: f32 = 1.5;
const INACTIVE_FILL_OPACITY: f32 = 0.15;
const INACTIVE_WEIGHT: f32 = 0.5;
const INACTIVE_DASH: f32 = 2.0;
const HOVER_WEIGHT: f32 = 4.0;

/// Everything needed to draw one region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaStyle {
    pub fill_color: Color,
    pub fill_opacity: f32,
    pub border_color: Color,
    /// Border opacity.
    pub opacity: f32,
    /// Border width in screen pixels.
    pub weight: f32,
    /// Dash length in screen pixels; `None` draws a solid border.
    pub dash: Option<f32>,
}

impl AreaStyle {
    pub fn active(fill_color: Color) -> Self {
        Self {
            fill_color,
            fill_opacity: ACTIVE_FILL_OPACITY,
            border_color: palette::BORDER,
            opacity: 1.0,
            weight: ACTIVE_WEIGHT,
            dash: None,
        }
    }

    pub fn inactive() -> Self {
        Self {
            fill_color: palette::INACTIVE,
            fill_opacity: INACTIVE_FILL_OPACITY,
            border_color: palette::BORDER,
            opacity: 1.0,
            weight: INACTIVE_WEIGHT,
            dash: Some(INACTIVE_DASH),
        }
    }

    /// Same fill, emphasized solid border.
    pub fn hovered(self) -> Self {
        Self {
            border_color: palette::BORDER_HOVER,
            weight: HOVER_WEIGHT,
            dash: None,
            ..self
        }
    }

    /// Fill color with the fill opacity applied as alpha.
    pub fn fill(&self) -> Color {
        self.fill_color.with_alpha(self.fill_opacity)
    }

    /// Border color with the border opacity applied as alpha.
    pub fn border(&self) -> Color {
        self.border_color.with_alpha(self.opacity)
    }
}

impl Default for AreaStyle {
    fn default() -> Self {
        Self::inactive()
    }
}

pub fn service_color(service: ServiceKind) -> Color {
    match service {
        ServiceKind::Solar => palette::SOLAR,
        ServiceKind::HeatPump => palette::HEAT_PUMP,
        ServiceKind::Ev => palette::EV,
    }
}

/// The service that decides the color, if any. A missing record behaves
/// exactly like an all-false one.
pub fn display_service(
    record: Option<&CoverageRecord>,
    filter: &FilterState,
) -> Option<ServiceKind> {
    let record = record?;
    ServiceKind::PRIORITY
        .into_iter()
        .find(|&service| filter.shows(service) && record.get(service))
}

pub fn resolve_style(record: Option<&CoverageRecord>, filter: &FilterState) -> AreaStyle {
    match display_service(record, filter) {
        Some(service) => AreaStyle::active(service_color(service)),
        None => AreaStyle::inactive(),
    }
}
