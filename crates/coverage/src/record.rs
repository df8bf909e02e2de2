use crate::config::{EV_COLUMN, HEAT_PUMP_COLUMN, SOLAR_COLUMN};

// =============================================================================
// Service kinds
// =============================================================================

/// The three services tracked per postcode area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Solar,
    HeatPump,
    Ev,
}

impl ServiceKind {
    /// Display precedence when more than one service is active.
    pub const PRIORITY: [ServiceKind; 3] =
        [ServiceKind::Solar, ServiceKind::HeatPump, ServiceKind::Ev];

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Solar => "Solar Panels",
            Self::HeatPump => "Heat Pumps",
            Self::Ev => "EV Chargers",
        }
    }

    /// Short name used in the legend.
    pub fn short_label(self) -> &'static str {
        match self {
            Self::Solar => "Solar",
            Self::HeatPump => "Heat Pump",
            Self::Ev => "EV",
        }
    }

    /// Column header in both the imported and exported CSV.
    pub fn column(self) -> &'static str {
        match self {
            Self::Solar => SOLAR_COLUMN,
            Self::HeatPump => HEAT_PUMP_COLUMN,
            Self::Ev => EV_COLUMN,
        }
    }
}

// =============================================================================
// Coverage record
// =============================================================================

/// Service flags for one postcode area. All-false when first referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoverageRecord {
    pub has_solar: bool,
    pub has_heat_pump: bool,
    pub has_ev: bool,
}

impl CoverageRecord {
    pub fn new(has_solar: bool, has_heat_pump: bool, has_ev: bool) -> Self {
        Self {
            has_solar,
            has_heat_pump,
            has_ev,
        }
    }

    pub fn get(&self, service: ServiceKind) -> bool {
        match service {
            ServiceKind::Solar => self.has_solar,
            ServiceKind::HeatPump => self.has_heat_pump,
            ServiceKind::Ev => self.has_ev,
        }
    }

    pub fn set(&mut self, service: ServiceKind, enabled: bool) {
        match service {
            ServiceKind::Solar => self.has_solar = enabled,
            ServiceKind::HeatPump => self.has_heat_pump = enabled,
            ServiceKind::Ev => self.has_ev = enabled,
        }
    }

    /// True when at least one service is present.
    pub fn any(&self) -> bool {
        self.has_solar || self.has_heat_pump || self.has_ev
    }

    /// Active services in priority order.
    pub fn active_services(&self) -> impl Iterator<Item = ServiceKind> + '_ {
        ServiceKind::PRIORITY
            .into_iter()
            .filter(move |&service| self.get(service))
    }
}
