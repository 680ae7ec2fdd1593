// Entry point and interactive menu.
//
// - Option [1] loads and normalizes the CSV, listing the regions found.
// - Option [2] changes which energy types feed the charts.
// - Option [3] aggregates, previews and writes both charts plus exports.
mod aggregate;
mod charts;
mod config;
mod error;
mod loader;
mod normalize;
mod output;
mod region;
mod types;
mod util;

use aggregate::{aggregate_by_region, aggregate_global, distinct_regions, summarize, Selection};
use config::AppConfig;
use error::DashboardError;
use normalize::Dataset;
use std::io::{self, Write};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use types::EnergyType;

/// One user session: the loaded dataset is immutable and replaced wholesale
/// on reload; the selection drives every recomputation.
struct Session {
    config: AppConfig,
    dataset: Option<Dataset>,
    selection: Selection,
}

/// Print `prompt` and read one trimmed line. `None` on end of input.
fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

/// Parse the multi-select input: comma/space separated names or 1-based
/// numbers. Blank restores the default (all four); `none` clears it.
fn parse_selection(input: &str) -> Result<Selection, DashboardError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Selection::default());
    }
    if input.eq_ignore_ascii_case("none") {
        return Ok(Selection::none());
    }
    let mut names = Vec::new();
    for token in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        match token.parse::<usize>() {
            Ok(n) if (1..=EnergyType::ALL.len()).contains(&n) => {
                names.push(EnergyType::ALL[n - 1].name().to_string())
            }
            Ok(_) => return Err(DashboardError::UnknownEnergyType(token.to_string())),
            Err(_) => names.push(token.to_string()),
        }
    }
    Selection::from_names(&names)
}

fn load_dataset(config: &AppConfig) -> Result<Dataset, DashboardError> {
    let raw = loader::load_raw(&config.dataset_path)?;
    normalize::normalize(&raw)
}

/// Handle option [1]: load and normalize the CSV file.
fn handle_load(session: &mut Session) {
    match load_dataset(&session.config) {
        Ok(dataset) => {
            let report = dataset.report();
            println!(
                "Processing dataset... ({} rows loaded)",
                util::format_int(report.total_rows)
            );
            if report.region_warnings() > 0 {
                println!(
                    "Warning: {} rows have an unreadable region and are grouped under (unknown).",
                    util::format_int(report.region_warnings())
                );
                for issue in &report.issues {
                    if let normalize::DataIssue::RegionExtraction { row, raw } = issue {
                        let town = dataset.rows().get(row - 1).map(|r| r.town.as_str()).unwrap_or("");
                        println!("  row {}: town '{}', refArea '{}'", row, town, raw);
                    }
                }
            }
            if report.coercions() > 0 {
                println!(
                    "Note: {} blank or non-numeric cells were counted as 0.",
                    util::format_int(report.coercions())
                );
            }
            if report.negative_values() > 0 {
                println!(
                    "Warning: {} negative energy counts are left out of the charts.",
                    util::format_int(report.negative_values())
                );
            }
            if report.exclusivity_violations() > 0 {
                println!(
                    "Note: {} rows have inconsistent alternative energy flags.",
                    util::format_int(report.exclusivity_violations())
                );
            }

            println!("\nList of the regions in Lebanon:");
            for region in distinct_regions(dataset.rows()) {
                println!("  - {}", output::display_region(&region));
            }
            println!();
            output::preview_table_rows(
                &aggregate::towns_per_region(dataset.rows()),
                session.config.preview_rows,
            );
            session.dataset = Some(dataset);
        }
        Err(e) => {
            error!(error = %e, "load failed");
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

/// Handle option [2]: the energy-type multi-select.
fn handle_select(session: &mut Session) -> bool {
    println!("\nSelect energy types for the charts (current: {})", session.selection);
    for (i, kind) in EnergyType::ALL.iter().enumerate() {
        println!("[{}] {}", i + 1, kind);
    }
    println!("Enter numbers or names separated by commas, blank for all, 'none' for no types.");
    let Some(input) = read_line("Selection: ") else {
        return false;
    };
    match parse_selection(&input) {
        Ok(selection) => {
            info!(selection = %selection, "selection changed");
            if selection.is_empty() {
                println!("No energy types selected; charts will be empty.\n");
            } else {
                println!("Selected: {}\n", selection);
            }
            session.selection = selection;
        }
        Err(e) => println!("{}. Selection unchanged.\n", e),
    }
    true
}

/// Handle option [3]: aggregate for the current selection and write the
/// charts and exports.
fn handle_generate(session: &Session) {
    let Some(dataset) = session.dataset.as_ref() else {
        println!("Error: No data loaded. Please load the CSV file first (option 1).\n");
        return;
    };
    if let Err(e) = generate(session, dataset) {
        error!(error = %e, "chart generation failed");
        eprintln!("Write error: {}\n", e);
    }
}

fn generate(session: &Session, dataset: &Dataset) -> Result<(), DashboardError> {
    let cfg = &session.config;
    let selection = &session.selection;
    std::fs::create_dir_all(&cfg.output_dir)?;

    let global = aggregate_global(dataset.rows(), selection);
    let regional = aggregate_by_region(dataset.rows(), selection);

    println!("\nOverall Proportion of Selected Energy Types ({})\n", selection);
    output::preview_table_rows(&global.to_rows(), cfg.preview_rows);
    let pie = cfg.output_path("energy_proportion.svg");
    charts::render_pie(&global, &pie)?;
    output::write_global_csv(&cfg.output_path("global_energy_totals.csv"), &global)?;
    println!("(Chart saved to {})\n", pie.display());

    println!("Distribution of Selected Energy Types by Region\n");
    print!("{}", output::render_region_table(&regional, cfg.preview_rows));
    let bar = cfg.output_path("energy_by_region.svg");
    charts::render_stacked_bar(&regional, &bar)?;
    output::write_region_csv(&cfg.output_path("energy_by_region.csv"), &regional)?;
    println!("(Chart saved to {})\n", bar.display());

    let summary = summarize(dataset, selection);
    output::write_json(&cfg.output_path("summary.json"), &summary)?;
    println!("Summary Stats (summary.json):");
    println!(
        "{{\"towns\": {}, \"regions\": {}, \"with_alt_energy\": {}, \"selected_total\": {}}}\n",
        util::format_int(summary.total_towns),
        util::format_int(summary.total_regions),
        util::format_int(summary.towns_with_alt_energy),
        util::format_number(global.grand_total(), 0)
    );
    info!(selection = %selection, regions = regional.regions.len(), "charts generated");
    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();

    let config = AppConfig::from_env();
    info!(dataset = %config.dataset_path.display(), output = %config.output_dir.display(), "starting dashboard");
    let mut session = Session {
        config,
        dataset: None,
        selection: Selection::default(),
    };

    loop {
        println!("Lebanon Electricity Dashboard");
        println!("[1] Load the file");
        println!("[2] Select energy types");
        println!("[3] Generate charts");
        println!("[0] Exit\n");
        let Some(choice) = read_line("Enter choice: ") else {
            break;
        };
        match choice.as_str() {
            "1" => handle_load(&mut session),
            "2" => {
                if !handle_select(&mut session) {
                    break;
                }
            }
            "3" => handle_generate(&session),
            "0" => break,
            _ => println!("Invalid choice. Please enter 0, 1, 2 or 3.\n"),
        }
    }
    println!("Exiting the program.");
}
