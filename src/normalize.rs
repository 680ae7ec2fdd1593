// Schema normalization: raw spreadsheet labels become semantic fields, the two
// existence flags collapse into `AltEnergyStatus`, and the region identifier
// is reduced to its display name.
use crate::error::DashboardError;
use crate::loader::RawTable;
use crate::region::extract_region;
use crate::types::{AltEnergyStatus, EnergyType, NormalizedRow, StateIndicators};
use crate::util::{is_truthy, parse_f64_safe, parse_flag_safe};
use serde::Serialize;
use tracing::{info, warn};

const COLUMN_COUNT: usize = 14;

/// Raw column label to semantic name.
pub const RENAMES: [(&str, &str); COLUMN_COUNT] = [
    ("Type of alternative energy used - hydropower (water use)", "Hydropower"),
    ("State of the lighting network - bad", "Lighting_Bad"),
    ("State of the lighting network - acceptable", "Lighting_Acceptable"),
    ("State of the lighting network - good", "Lighting_Good"),
    ("State of the power grid - good", "Grid_Good"),
    ("State of the power grid - acceptable", "Grid_Acceptable"),
    ("State of the power grid - bad", "Grid_Bad"),
    ("Existence of alternative energy - exists", "AltEnergy_Exists"),
    ("Existence of alternative energy - does not exist", "AltEnergy_NotExists"),
    ("Type of alternative energy used - solar energy", "SolarEnergy"),
    ("Type of alternative energy used - wind energy", "WindEnergy"),
    ("Type of alternative energy used - other", "OtherEnergy"),
    ("refArea", "Region"),
    ("Town", "Town"),
];

/// Per-row anomaly that does not abort the load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DataIssue {
    /// Region identifier had no usable segment; row kept under `""`.
    RegionExtraction { row: usize, raw: String },
    /// Blank or non-numeric cell summed as zero.
    NumericCoercion { row: usize, column: &'static str, raw: String },
    /// Existence flags were both set or both clear.
    ExclusivityViolation { row: usize, exists: f64, not_exists: f64 },
    /// Energy count below zero; kept as read, but charts skip it.
    NegativeValue { row: usize, column: &'static str, value: f64 },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub total_rows: usize,
    pub issues: Vec<DataIssue>,
}

impl LoadReport {
    pub fn region_warnings(&self) -> usize {
        self.count(|i| matches!(i, DataIssue::RegionExtraction { .. }))
    }

    pub fn coercions(&self) -> usize {
        self.count(|i| matches!(i, DataIssue::NumericCoercion { .. }))
    }

    pub fn negative_values(&self) -> usize {
        self.count(|i| matches!(i, DataIssue::NegativeValue { .. }))
    }

    pub fn exclusivity_violations(&self) -> usize {
        self.count(|i| matches!(i, DataIssue::ExclusivityViolation { .. }))
    }

    fn count(&self, pred: impl Fn(&DataIssue) -> bool) -> usize {
        self.issues.iter().filter(|i| pred(i)).count()
    }
}

/// Normalized rows plus the report describing how they were built. Immutable
/// once constructed.
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Vec<NormalizedRow>,
    report: LoadReport,
}

impl Dataset {
    pub fn rows(&self) -> &[NormalizedRow] {
        &self.rows
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }
}

/// Column positions resolved once against the header row.
struct ColumnIndex {
    positions: [usize; COLUMN_COUNT],
}

impl ColumnIndex {
    fn resolve(raw: &RawTable) -> Result<Self, DashboardError> {
        let mut positions = [0usize; COLUMN_COUNT];
        for (slot, (label, _)) in positions.iter_mut().zip(RENAMES.iter()) {
            *slot = raw
                .column_index(label)
                .ok_or_else(|| DashboardError::SchemaMismatch {
                    column: (*label).to_string(),
                })?;
        }
        Ok(Self { positions })
    }

    fn position(&self, semantic: &str) -> usize {
        let slot = RENAMES
            .iter()
            .position(|(_, name)| *name == semantic)
            .unwrap_or_else(|| unreachable!("unknown semantic column {semantic}"));
        self.positions[slot]
    }
}

struct RowReader<'a> {
    record: &'a csv::StringRecord,
    index: &'a ColumnIndex,
    row: usize,
    issues: &'a mut Vec<DataIssue>,
}

impl RowReader<'_> {
    fn text(&self, semantic: &str) -> &str {
        self.record
            .get(self.index.position(semantic))
            .unwrap_or("")
            .trim()
    }

    /// Energy count: blank or non-numeric reads as 0, negatives are flagged.
    fn number(&mut self, semantic: &'static str) -> f64 {
        let value = self.parsed(semantic, parse_f64_safe);
        if value < 0.0 {
            warn!(row = self.row, column = semantic, value, "negative energy count");
            self.record_issue(DataIssue::NegativeValue {
                row: self.row,
                column: semantic,
                value,
            });
        }
        value
    }

    /// Indicator flag: numbers or `true`/`false`/`yes`/`no`.
    fn flag(&mut self, semantic: &'static str) -> f64 {
        self.parsed(semantic, parse_flag_safe)
    }

    fn parsed(&mut self, semantic: &'static str, parse: fn(Option<&str>) -> Option<f64>) -> f64 {
        let raw = self.text(semantic);
        match parse(Some(raw)) {
            Some(v) => v,
            None => {
                let raw = raw.to_string();
                warn!(row = self.row, column = semantic, value = %raw, "non-numeric value counted as 0");
                self.record_issue(DataIssue::NumericCoercion {
                    row: self.row,
                    column: semantic,
                    raw,
                });
                0.0
            }
        }
    }

    fn record_issue(&mut self, issue: DataIssue) {
        self.issues.push(issue);
    }
}

/// Apply the renaming table, derive `AltEnergyStatus` and extract regions.
///
/// Fails with [`DashboardError::SchemaMismatch`] on the first raw label that
/// is absent from the header row. Per-row anomalies are logged and recorded
/// in the [`LoadReport`].
pub fn normalize(raw: &RawTable) -> Result<Dataset, DashboardError> {
    let index = ColumnIndex::resolve(raw)?;
    let mut issues = Vec::new();
    let mut rows = Vec::with_capacity(raw.rows.len());

    // Row numbers are 1-based data rows (header excluded).
    for (i, record) in raw.rows.iter().enumerate() {
        let mut reader = RowReader {
            record,
            index: &index,
            row: i + 1,
            issues: &mut issues,
        };

        let raw_region = reader.text("Region").to_string();
        let town = reader.text("Town").to_string();

        let lighting = StateIndicators {
            bad: reader.flag("Lighting_Bad"),
            acceptable: reader.flag("Lighting_Acceptable"),
            good: reader.flag("Lighting_Good"),
        };
        let grid = StateIndicators {
            bad: reader.flag("Grid_Bad"),
            acceptable: reader.flag("Grid_Acceptable"),
            good: reader.flag("Grid_Good"),
        };

        let exists = reader.flag("AltEnergy_Exists");
        let not_exists = reader.flag("AltEnergy_NotExists");
        let alt_energy_status = derive_status(exists);
        if is_truthy(exists) == is_truthy(not_exists) {
            warn!(row = reader.row, exists, not_exists, "alternative energy flags are not mutually exclusive");
            reader.record_issue(DataIssue::ExclusivityViolation {
                row: reader.row,
                exists,
                not_exists,
            });
        }

        let hydropower = reader.number(EnergyType::Hydropower.name());
        let solar_energy = reader.number(EnergyType::SolarEnergy.name());
        let wind_energy = reader.number(EnergyType::WindEnergy.name());
        let other_energy = reader.number(EnergyType::OtherEnergy.name());

        let region = match extract_region(&raw_region) {
            Ok(name) => name,
            Err(warning) => {
                warn!(row = reader.row, town = %town, "{}", warning);
                reader.record_issue(DataIssue::RegionExtraction {
                    row: reader.row,
                    raw: warning.raw,
                });
                String::new()
            }
        };

        rows.push(NormalizedRow {
            region,
            town,
            lighting,
            grid,
            alt_energy_status,
            hydropower,
            solar_energy,
            wind_energy,
            other_energy,
        });
    }

    let report = LoadReport {
        total_rows: rows.len(),
        issues,
    };
    info!(
        rows = report.total_rows,
        region_warnings = report.region_warnings(),
        coercions = report.coercions(),
        negative_values = report.negative_values(),
        exclusivity_violations = report.exclusivity_violations(),
        "dataset normalized"
    );
    Ok(Dataset { rows, report })
}

/// `Exists` when the row's own exists-indicator is non-zero.
pub fn derive_status(exists: f64) -> AltEnergyStatus {
    if is_truthy(exists) {
        AltEnergyStatus::Exists
    } else {
        AltEnergyStatus::NotExists
    }
}
