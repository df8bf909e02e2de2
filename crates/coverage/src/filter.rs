use bevy::prelude::*;

use crate::record::ServiceKind;

/// Which service categories are allowed to color the map.
///
/// Written by the filter checkboxes, read by the style resolver. Filters only
/// change what is drawn; popups and exports always show the stored data.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterState {
    pub show_solar: bool,
    pub show_heat_pump: bool,
    pub show_ev: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            show_solar: true,
            show_heat_pump: true,
            show_ev: true,
        }
    }
}

impl FilterState {
    pub fn all_off() -> Self {
        Self {
            show_solar: false,
            show_heat_pump: false,
            show_ev: false,
        }
    }

    pub fn shows(&self, service: ServiceKind) -> bool {
        match service {
            ServiceKind::Solar => self.show_solar,
            ServiceKind::HeatPump => self.show_heat_pump,
            ServiceKind::Ev => self.show_ev,
        }
    }

    pub fn set(&mut self, service: ServiceKind, shown: bool) {
        match service {
            ServiceKind::Solar => self.show_solar = shown,
            ServiceKind::HeatPump => self.show_heat_pump = shown,
            ServiceKind::Ev => self.show_ev = shown,
        }
    }
}
