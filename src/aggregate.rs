use crate::error::DashboardError;
use crate::normalize::Dataset;
use crate::types::{
    AltEnergyStatus, EnergyType, GlobalTotalRow, NormalizedRow, RegionCountRow, StateIndicators,
    SummaryStats,
};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Ordered, de-duplicated subset of the four energy types. Empty is a valid
/// selection: aggregates come back without value columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    types: Vec<EnergyType>,
}

impl Default for Selection {
    fn default() -> Self {
        Self::all()
    }
}

impl Selection {
    pub fn all() -> Self {
        Self { types: EnergyType::ALL.to_vec() }
    }

    pub fn none() -> Self {
        Self { types: Vec::new() }
    }

    pub fn new<I: IntoIterator<Item = EnergyType>>(types: I) -> Self {
        let mut seen = BTreeSet::new();
        let types = types.into_iter().filter(|t| seen.insert(*t)).collect();
        Self { types }
    }

    /// Build a selection from semantic names, failing on anything outside the
    /// four known energy types.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, DashboardError> {
        let mut types = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let kind = EnergyType::from_name(name)
                .ok_or_else(|| DashboardError::UnknownEnergyType(name.trim().to_string()))?;
            types.push(kind);
        }
        Ok(Self::new(types))
    }

    pub fn types(&self) -> &[EnergyType] {
        &self.types
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.types.is_empty() {
            return f.write_str("(none)");
        }
        let names: Vec<&str> = self.types.iter().map(|t| t.name()).collect();
        f.write_str(&names.join(", "))
    }
}

/// Energy type to total, in selection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalAggregate {
    pub totals: Vec<(EnergyType, f64)>,
}

impl GlobalAggregate {
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn grand_total(&self) -> f64 {
        self.totals.iter().map(|(_, v)| v).sum()
    }

    pub fn to_rows(&self) -> Vec<GlobalTotalRow> {
        self.totals
            .iter()
            .map(|(t, v)| GlobalTotalRow {
                energy_type: t.name().to_string(),
                total: *v,
            })
            .collect()
    }
}

/// Region to per-type totals. `columns` mirrors the selection, so an empty
/// selection yields regions with no value columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionAggregate {
    pub columns: Vec<EnergyType>,
    pub regions: BTreeMap<String, BTreeMap<EnergyType, f64>>,
}

impl RegionAggregate {
    pub fn get(&self, region: &str, kind: EnergyType) -> Option<f64> {
        self.regions.get(region)?.get(&kind).copied()
    }

    /// Height of the tallest stacked bar. Negative segments are not stacked.
    pub fn max_stack(&self) -> f64 {
        self.regions
            .values()
            .map(|m| m.values().map(|v| v.max(0.0)).sum::<f64>())
            .fold(0.0, f64::max)
    }
}

pub fn aggregate_global(rows: &[NormalizedRow], selected: &Selection) -> GlobalAggregate {
    let totals = selected
        .types()
        .iter()
        .map(|&kind| (kind, rows.iter().map(|r| r.energy(kind)).sum()))
        .collect();
    GlobalAggregate { totals }
}

pub fn aggregate_by_region(rows: &[NormalizedRow], selected: &Selection) -> RegionAggregate {
    let mut regions: BTreeMap<String, BTreeMap<EnergyType, f64>> = BTreeMap::new();
    for r in rows {
        let e = regions.entry(r.region.clone()).or_default();
        for &kind in selected.types() {
            *e.entry(kind).or_insert(0.0) += r.energy(kind);
        }
    }
    RegionAggregate {
        columns: selected.types().to_vec(),
        regions,
    }
}

/// Distinct region names in order of first appearance.
pub fn distinct_regions(rows: &[NormalizedRow]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    rows.iter()
        .filter(|r| seen.insert(r.region.as_str()))
        .map(|r| r.region.clone())
        .collect()
}

pub fn towns_per_region(rows: &[NormalizedRow]) -> Vec<RegionCountRow> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in rows {
        *counts.entry(r.region.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(region, towns)| RegionCountRow {
            region: region.to_string(),
            towns,
        })
        .collect()
}

pub fn status_breakdown(rows: &[NormalizedRow]) -> BTreeMap<AltEnergyStatus, usize> {
    let mut map = BTreeMap::new();
    for r in rows {
        *map.entry(r.alt_energy_status).or_default() += 1;
    }
    map
}

pub fn summarize(data: &Dataset, selected: &Selection) -> SummaryStats {
    let rows = data.rows();
    let breakdown = status_breakdown(rows);
    SummaryStats {
        total_towns: rows.len(),
        total_regions: distinct_regions(rows).len(),
        towns_with_alt_energy: breakdown.get(&AltEnergyStatus::Exists).copied().unwrap_or(0),
        towns_without_alt_energy: breakdown
            .get(&AltEnergyStatus::NotExists)
            .copied()
            .unwrap_or(0),
        lighting: StateIndicators::total(rows.iter().map(|r| &r.lighting)),
        grid: StateIndicators::total(rows.iter().map(|r| &r.grid)),
        selected_energy_types: selected.types().to_vec(),
        selected_totals: aggregate_global(rows, selected).to_rows(),
        data_issues: data.report().issues.len(),
    }
}
