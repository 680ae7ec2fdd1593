use serde::Serialize;
use std::fmt;
use tabled::Tabled;

/// The four tracked alternative-energy categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum EnergyType {
    Hydropower,
    SolarEnergy,
    WindEnergy,
    OtherEnergy,
}

impl EnergyType {
    pub const ALL: [EnergyType; 4] = [
        EnergyType::Hydropower,
        EnergyType::SolarEnergy,
        EnergyType::WindEnergy,
        EnergyType::OtherEnergy,
    ];

    /// Semantic column name, also used as the chart label.
    pub fn name(self) -> &'static str {
        match self {
            EnergyType::Hydropower => "Hydropower",
            EnergyType::SolarEnergy => "SolarEnergy",
            EnergyType::WindEnergy => "WindEnergy",
            EnergyType::OtherEnergy => "OtherEnergy",
        }
    }

    /// Case-insensitive lookup by semantic name.
    pub fn from_name(s: &str) -> Option<EnergyType> {
        let s = s.trim();
        EnergyType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for EnergyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AltEnergyStatus {
    #[serde(rename = "Exists")]
    Exists,
    #[serde(rename = "Not Exists")]
    NotExists,
}

impl AltEnergyStatus {
    pub fn label(self) -> &'static str {
        match self {
            AltEnergyStatus::Exists => "Exists",
            AltEnergyStatus::NotExists => "Not Exists",
        }
    }
}

impl fmt::Display for AltEnergyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Three mutually exclusive state flags, shared by the lighting network and
/// the power grid columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StateIndicators {
    pub bad: f64,
    pub acceptable: f64,
    pub good: f64,
}

impl StateIndicators {
    fn add(self, other: StateIndicators) -> StateIndicators {
        StateIndicators {
            bad: self.bad + other.bad,
            acceptable: self.acceptable + other.acceptable,
            good: self.good + other.good,
        }
    }

    pub fn total<'a, I: IntoIterator<Item = &'a StateIndicators>>(items: I) -> StateIndicators {
        items
            .into_iter()
            .fold(StateIndicators::default(), |acc, s| acc.add(*s))
    }
}

/// One town after renaming, status derivation and region extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub region: String,
    pub town: String,
    pub lighting: StateIndicators,
    pub grid: StateIndicators,
    pub alt_energy_status: AltEnergyStatus,
    pub hydropower: f64,
    pub solar_energy: f64,
    pub wind_energy: f64,
    pub other_energy: f64,
}

impl NormalizedRow {
    pub fn energy(&self, kind: EnergyType) -> f64 {
        match kind {
            EnergyType::Hydropower => self.hydropower,
            EnergyType::SolarEnergy => self.solar_energy,
            EnergyType::WindEnergy => self.wind_energy,
            EnergyType::OtherEnergy => self.other_energy,
        }
    }
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct GlobalTotalRow {
    #[serde(rename = "Energy Type")]
    #[tabled(rename = "Energy Type")]
    pub energy_type: String,
    #[serde(rename = "Total")]
    #[tabled(rename = "Total")]
    pub total: f64,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct RegionCountRow {
    #[serde(rename = "Region")]
    #[tabled(rename = "Region")]
    pub region: String,
    #[serde(rename = "Towns")]
    #[tabled(rename = "Towns")]
    pub towns: usize,
}

#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub total_towns: usize,
    pub total_regions: usize,
    pub towns_with_alt_energy: usize,
    pub towns_without_alt_energy: usize,
    /// Sum of each lighting-network state flag across towns.
    pub lighting: StateIndicators,
    pub grid: StateIndicators,
    pub selected_energy_types: Vec<EnergyType>,
    pub selected_totals: Vec<GlobalTotalRow>,
    pub data_issues: usize,
}
