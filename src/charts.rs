// SVG rendering of the two dashboard charts.
use crate::aggregate::{GlobalAggregate, RegionAggregate};
use crate::error::DashboardError;
use crate::output::display_region;
use crate::util::format_number;
use plotters::prelude::*;
use std::f64::consts::PI;
use std::path::Path;
use tracing::debug;

pub const PIE_TITLE: &str = "Overall Proportion of Selected Energy Types";
pub const BAR_TITLE: &str = "Distribution of Selected Energy Types by Region";

const COLOR_BLUE: RGBColor = RGBColor(59, 130, 246);
const COLOR_AMBER: RGBColor = RGBColor(245, 158, 11);
const COLOR_TEAL: RGBColor = RGBColor(20, 184, 166);
const COLOR_SLATE: RGBColor = RGBColor(100, 116, 139);

// Indexed by `EnergyType` declaration order so a type keeps its color across
// both charts and any selection.
const ENERGY_COLORS: [RGBColor; 4] = [COLOR_BLUE, COLOR_AMBER, COLOR_TEAL, COLOR_SLATE];

fn chart_err<E: std::error::Error>(e: E) -> DashboardError {
    DashboardError::Chart(e.to_string())
}

fn energy_color(kind: crate::types::EnergyType) -> RGBColor {
    ENERGY_COLORS[kind as usize]
}

fn placeholder(
    root: &DrawingArea<SVGBackend, plotters::coord::Shift>,
    message: &str,
) -> Result<(), DashboardError> {
    let (w, h) = root.dim_in_pixel();
    root.draw_text(
        message,
        &TextStyle::from(("sans-serif", 20).into_font()).color(&COLOR_SLATE),
        (w as i32 / 2 - 120, h as i32 / 2),
    )
    .map_err(chart_err)
}

/// Proportion chart over the global aggregate. Zero-valued types get no
/// slice but keep their legend entry.
pub fn render_pie(global: &GlobalAggregate, path: &Path) -> Result<(), DashboardError> {
    let root = SVGBackend::new(path, (900, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;
    root.draw_text(
        PIE_TITLE,
        &TextStyle::from(("sans-serif", 26).into_font()).color(&BLACK),
        (30, 25),
    )
    .map_err(chart_err)?;

    // Negative counts are recorded as data issues at load and get no share.
    let total: f64 = global.totals.iter().map(|(_, v)| v.max(0.0)).sum();
    if global.is_empty() {
        placeholder(&root, "No energy types selected")?;
    } else if total <= 0.0 {
        placeholder(&root, "No data for the selected energy types")?;
    } else {
        let center = (320.0, 330.0);
        let radius = 220.0;
        let mut angle = -PI / 2.0;
        for (kind, value) in &global.totals {
            if *value <= 0.0 {
                continue;
            }
            let sweep = value / total * 2.0 * PI;
            // One vertex per degree keeps the arc smooth.
            let steps = ((sweep.to_degrees().ceil()) as usize).max(2);
            let mut points = vec![(center.0 as i32, center.1 as i32)];
            for s in 0..=steps {
                let a = angle + sweep * s as f64 / steps as f64;
                points.push((
                    (center.0 + radius * a.cos()).round() as i32,
                    (center.1 + radius * a.sin()).round() as i32,
                ));
            }
            root.draw(&Polygon::new(points, energy_color(*kind).filled()))
                .map_err(chart_err)?;
            angle += sweep;
        }

        for (i, (kind, value)) in global.totals.iter().enumerate() {
            let y = 140 + i as i32 * 40;
            root.draw(&Rectangle::new(
                [(600, y), (620, y + 20)],
                energy_color(*kind).filled(),
            ))
            .map_err(chart_err)?;
            let share = value.max(0.0) / total * 100.0;
            root.draw_text(
                &format!("{}: {} ({}%)", kind, format_number(*value, 0), format_number(share, 1)),
                &TextStyle::from(("sans-serif", 16).into_font()),
                (630, y + 3),
            )
            .map_err(chart_err)?;
        }
    }

    root.present().map_err(chart_err)?;
    debug!(path = %path.display(), "pie chart written");
    Ok(())
}

/// Stacked comparison chart: one bar per region, one segment per selected
/// type, stacked in selection order.
pub fn render_stacked_bar(regional: &RegionAggregate, path: &Path) -> Result<(), DashboardError> {
    let root = SVGBackend::new(path, (1400, 750)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let max = regional.max_stack();
    if regional.columns.is_empty() || regional.regions.is_empty() || max <= 0.0 {
        root.draw_text(
            BAR_TITLE,
            &TextStyle::from(("sans-serif", 26).into_font()).color(&BLACK),
            (30, 25),
        )
        .map_err(chart_err)?;
        let message = if regional.columns.is_empty() {
            "No energy types selected"
        } else {
            "No data for the selected energy types"
        };
        placeholder(&root, message)?;
        root.present().map_err(chart_err)?;
        return Ok(());
    }

    let names: Vec<String> = regional.regions.keys().map(|r| display_region(r)).collect();
    let n = names.len() as i32;

    let mut chart = ChartBuilder::on(&root)
        .caption(BAR_TITLE, ("sans-serif", 26).into_font())
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d((0..n).into_segmented(), 0f64..max * 1.1)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(names.len())
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => names.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .x_label_style(("sans-serif", 11).into_font())
        .x_desc("Region")
        .y_desc("Number of Towns")
        .draw()
        .map_err(chart_err)?;

    // Running top of each bar as segments are stacked.
    let mut tops = vec![0f64; names.len()];
    for &kind in &regional.columns {
        let color = energy_color(kind);
        let mut bars = Vec::with_capacity(names.len());
        for (i, values) in regional.regions.values().enumerate() {
            let value = values.get(&kind).copied().unwrap_or(0.0);
            let base = tops[i];
            if value > 0.0 {
                tops[i] += value;
                let x = i as i32;
                bars.push(Rectangle::new(
                    [(SegmentValue::Exact(x), base), (SegmentValue::Exact(x + 1), base + value)],
                    color.filled(),
                ));
            }
        }
        chart
            .draw_series(bars)
            .map_err(chart_err)?
            .label(kind.name())
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    debug!(path = %path.display(), regions = names.len(), "stacked bar chart written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate_by_region, aggregate_global, Selection};
    use crate::types::{AltEnergyStatus, EnergyType, NormalizedRow, StateIndicators};

    fn rows() -> Vec<NormalizedRow> {
        vec![("Akkar", 2.0, 5.0), ("Zahle", 1.0, 0.0), ("Bint Jbeil", 0.0, 3.0)]
            .into_iter()
            .map(|(region, hydro, solar)| NormalizedRow {
                region: region.to_string(),
                town: String::new(),
                lighting: StateIndicators::default(),
                grid: StateIndicators::default(),
                alt_energy_status: AltEnergyStatus::Exists,
                hydropower: hydro,
                solar_energy: solar,
                wind_energy: 0.0,
                other_energy: 1.0,
            })
            .collect()
    }

    #[test]
    fn pie_chart_lists_each_selected_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pie.svg");
        let global = aggregate_global(&rows(), &Selection::all());
        render_pie(&global, &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains(PIE_TITLE));
        for kind in EnergyType::ALL {
            assert!(svg.contains(kind.name()), "missing legend for {kind}");
        }
    }

    #[test]
    fn stacked_bar_names_every_region() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bar.svg");
        let sel = Selection::new([EnergyType::Hydropower, EnergyType::SolarEnergy]);
        render_stacked_bar(&aggregate_by_region(&rows(), &sel), &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains(BAR_TITLE));
        for region in ["Akkar", "Zahle", "Bint Jbeil"] {
            assert!(svg.contains(region), "missing label for {region}");
        }
        assert!(svg.contains("Hydropower"));
        assert!(!svg.contains("WindEnergy"));
    }

    #[test]
    fn empty_selection_renders_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        let pie = dir.path().join("pie.svg");
        let bar = dir.path().join("bar.svg");
        render_pie(&aggregate_global(&rows(), &Selection::none()), &pie).unwrap();
        render_stacked_bar(&aggregate_by_region(&rows(), &Selection::none()), &bar).unwrap();

        assert!(std::fs::read_to_string(&pie).unwrap().contains("No energy types selected"));
        assert!(std::fs::read_to_string(&bar).unwrap().contains("No energy types selected"));
    }

    #[test]
    fn negative_totals_get_no_share() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pie.svg");
        let global = GlobalAggregate {
            totals: vec![(EnergyType::Hydropower, -2.0), (EnergyType::SolarEnergy, 4.0)],
        };
        render_pie(&global, &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("SolarEnergy: 4 (100.0%)"));
        assert!(svg.contains("Hydropower: -2 (0.0%)"));
    }

    #[test]
    fn all_zero_totals_render_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pie.svg");
        let global = aggregate_global(&rows(), &Selection::new([EnergyType::WindEnergy]));
        render_pie(&global, &path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("No data"));
    }
}
