use crate::aggregate::{GlobalAggregate, RegionAggregate};
use crate::error::DashboardError;
use crate::util::format_number;
use serde::Serialize;
use std::path::Path;
use tabled::{builder::Builder, settings::Style, Table, Tabled};

/// Totals in both exports share this rendering (`8`, `2.5`).
fn csv_number(v: f64) -> String {
    v.to_string()
}

pub fn write_global_csv(path: &Path, global: &GlobalAggregate) -> Result<(), DashboardError> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["Energy Type", "Total"])?;
    for (kind, total) in &global.totals {
        wtr.write_record([kind.name().to_string(), csv_number(*total)])?;
    }
    wtr.flush()?;
    Ok(())
}

/// The per-region table has one column per selected type, so it is written
/// record by record instead of through a fixed struct.
pub fn write_region_csv(path: &Path, regional: &RegionAggregate) -> Result<(), DashboardError> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(region_header(regional))?;
    for region in regional.regions.keys() {
        let mut record = vec![region.clone()];
        record.extend(
            regional
                .columns
                .iter()
                .map(|c| csv_number(regional.get(region, *c).unwrap_or(0.0))),
        );
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), DashboardError> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    println!("{}", render_table(rows, max_rows));
}

pub fn render_table<T>(rows: &[T], max_rows: usize) -> String
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        return "(no rows)\n".to_string();
    }
    format!("{}\n", Table::new(slice).with(Style::markdown()))
}

pub fn render_region_table(regional: &RegionAggregate, max_rows: usize) -> String {
    if regional.regions.is_empty() {
        return "(no rows)\n".to_string();
    }
    let mut builder = Builder::default();
    builder.push_record(region_header(regional));
    for (region, values) in regional.regions.iter().take(max_rows) {
        let mut record = vec![display_region(region)];
        record.extend(
            regional
                .columns
                .iter()
                .map(|c| format_number(values.get(c).copied().unwrap_or(0.0), 0)),
        );
        builder.push_record(record);
    }
    let mut table = builder.build();
    table.with(Style::markdown());
    format!("{}\n", table)
}

fn region_header(regional: &RegionAggregate) -> Vec<String> {
    let mut header = vec!["Region".to_string()];
    header.extend(regional.columns.iter().map(|c| c.name().to_string()));
    header
}

/// The empty-region bucket holds rows whose identifier could not be parsed.
pub fn display_region(region: &str) -> String {
    if region.is_empty() {
        "(unknown)".to_string()
    } else {
        region.to_string()
    }
}
