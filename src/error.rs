use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Schema mismatch: expected column '{column}' is missing from the dataset")]
    SchemaMismatch { column: String },

    #[error("Unknown energy type: '{0}' (expected one of Hydropower, SolarEnergy, WindEnergy, OtherEnergy)")]
    UnknownEnergyType(String),

    #[error("Chart rendering failed: {0}")]
    Chart(String),
}

/// Non-fatal: the region identifier held no usable segment. The row is kept
/// under an empty region name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not extract a region name from '{raw}'")]
pub struct RegionExtractionWarning {
    pub raw: String,
}
