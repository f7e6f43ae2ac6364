//! Command implementations for the WDI CLI.
//!
//! Each subcommand loads the source files, runs the same core queries the
//! dashboard renderers consume, and prints plain text (or JSON for the
//! detail view, which is exactly the serialized renderer contract).

use anyhow::Context;
use clap::Subcommand;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use wdi_core::{Iso3, SelectionState, YearSpec};
use wdi_data::Dataset;

#[derive(Subcommand)]
pub enum Command {
    /// Print the mappable one-row-per-country snapshot for a year
    Snapshot {
        /// Path to the indicator CSV
        #[arg(short, long)]
        data: PathBuf,

        /// Path to the boundary GeoJSON
        #[arg(short, long)]
        boundaries: PathBuf,

        /// Optional path to the country/iso_alpha/hex color table CSV
        #[arg(long)]
        colors: Option<PathBuf>,

        /// Snapshot year (defaults to the latest year in the data)
        #[arg(short, long)]
        year: Option<i32>,

        /// Indicator column to display
        #[arg(long, default_value = "GDP_per_capita")]
        indicator: String,
    },

    /// Print the time series for one country
    Series {
        /// Path to the indicator CSV
        #[arg(short, long)]
        data: PathBuf,

        /// ISO3 code of the country
        #[arg(short, long)]
        country: String,

        /// Inclusive start year
        #[arg(long)]
        from: Option<i32>,

        /// Inclusive end year
        #[arg(long)]
        to: Option<i32>,

        /// Indicator column to display
        #[arg(long, default_value = "GDP_per_capita")]
        indicator: String,
    },

    /// Run the selection state machine and print the detail view as JSON
    Detail {
        /// Path to the indicator CSV
        #[arg(short, long)]
        data: PathBuf,

        /// Path to the boundary GeoJSON
        #[arg(short, long)]
        boundaries: PathBuf,

        /// Optional path to the color table CSV
        #[arg(long)]
        colors: Option<PathBuf>,

        /// ISO3 code of the country (as a map click would supply it)
        #[arg(short, long)]
        country: String,

        /// Focus year (defaults to the latest year in the data)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Load everything and print the validation report
    Validate {
        /// Path to the indicator CSV
        #[arg(short, long)]
        data: PathBuf,

        /// Path to the boundary GeoJSON
        #[arg(short, long)]
        boundaries: PathBuf,

        /// Optional path to the color table CSV
        #[arg(long)]
        colors: Option<PathBuf>,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Snapshot {
            data,
            boundaries,
            colors,
            year,
            indicator,
        } => run_snapshot(&data, &boundaries, colors.as_deref(), year, &indicator),
        Command::Series {
            data,
            country,
            from,
            to,
            indicator,
        } => run_series(&data, &country, from, to, &indicator),
        Command::Detail {
            data,
            boundaries,
            colors,
            country,
            year,
        } => run_detail(&data, &boundaries, colors.as_deref(), &country, year),
        Command::Validate {
            data,
            boundaries,
            colors,
        } => run_validate(&data, &boundaries, colors.as_deref()),
    }
}

fn load_dataset(
    data: &Path,
    boundaries: &Path,
    colors: Option<&Path>,
) -> anyhow::Result<Dataset> {
    let indicator_csv = fs::read_to_string(data)
        .with_context(|| format!("reading indicator CSV {}", data.display()))?;
    let boundary_geojson = fs::read_to_string(boundaries)
        .with_context(|| format!("reading boundary GeoJSON {}", boundaries.display()))?;
    let color_csv = match colors {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("reading color table {}", path.display()))?,
        ),
        None => None,
    };

    let dataset = Dataset::assemble(&indicator_csv, color_csv.as_deref(), &boundary_geojson)?;
    if !dataset.report.is_clean() {
        warn!("{}", dataset.report.summary());
    }
    Ok(dataset)
}

fn run_snapshot(
    data: &Path,
    boundaries: &Path,
    colors: Option<&Path>,
    year: Option<i32>,
    indicator: &str,
) -> anyhow::Result<()> {
    let dataset = load_dataset(data, boundaries, colors)?;

    let year = match year.or_else(|| dataset.store.latest_year()) {
        Some(year) => year,
        None => {
            println!("No data available.");
            return Ok(());
        }
    };

    let snapshot = dataset.mappable_snapshot(year);
    info!("snapshot for {}: {} mappable countries", year, snapshot.len());
    if snapshot.is_empty() {
        println!("No data for {year}.");
        return Ok(());
    }

    println!("{:<6} {:<32} {:<9} {}", "ISO3", "Country", "Fill", indicator);
    for record in snapshot {
        let iso3 = record.iso3.as_ref().expect("mappable records are keyed");
        let value = record
            .indicator(indicator)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<6} {:<32} {:<9} {}",
            iso3.as_str(),
            record.country_name,
            record.fill_color_or_default().as_str(),
            value
        );
    }
    Ok(())
}

fn run_series(
    data: &Path,
    country: &str,
    from: Option<i32>,
    to: Option<i32>,
    indicator: &str,
) -> anyhow::Result<()> {
    let indicator_csv = fs::read_to_string(data)
        .with_context(|| format!("reading indicator CSV {}", data.display()))?;
    let outcome = wdi_data::loader::load_indicators(&indicator_csv)?;
    if !outcome.report.is_clean() {
        warn!("{}", outcome.report.summary());
    }
    let store = wdi_core::IndicatorStore::build(outcome.records);

    let iso3 = Iso3::parse(country)
        .map_err(|e| anyhow::anyhow!("{e}: expected a 3-letter country code"))?;
    let series = match (from, to) {
        (Some(from), Some(to)) => store.series_in_range(&iso3, (from, to)),
        _ => store.series_for(&iso3),
    };

    if series.is_empty() {
        println!("No data for {iso3}.");
        return Ok(());
    }
    println!("{:<6} {}", "Year", indicator);
    for record in series {
        let value = record
            .indicator(indicator)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<6} {}", record.year, value);
    }
    Ok(())
}

fn run_detail(
    data: &Path,
    boundaries: &Path,
    colors: Option<&Path>,
    country: &str,
    year: Option<i32>,
) -> anyhow::Result<()> {
    let dataset = load_dataset(data, boundaries, colors)?;

    let iso3 = match dataset.resolve_click(country) {
        Some(iso3) => iso3,
        None => {
            println!("'{country}' is not a drawable country in the boundary data.");
            return Ok(());
        }
    };

    let years = match year.or_else(|| dataset.store.latest_year()) {
        Some(year) => YearSpec::Single(year),
        None => {
            println!("No data available.");
            return Ok(());
        }
    };

    let mut selection = SelectionState::new();
    selection.select(iso3, years);
    let detail = selection
        .current_detail(&dataset.store)
        .expect("a selection was just made");

    println!("{}", serde_json::to_string_pretty(&detail)?);
    Ok(())
}

fn run_validate(data: &Path, boundaries: &Path, colors: Option<&Path>) -> anyhow::Result<()> {
    let dataset = load_dataset(data, boundaries, colors)?;

    println!("{}", dataset.report.summary());
    for invalid in &dataset.report.invalid_iso3 {
        println!("  invalid ISO3 at line {}: {:?}", invalid.line, invalid.value);
    }
    for invalid in &dataset.report.invalid_hex {
        println!("  invalid hex at line {}: {:?}", invalid.line, invalid.value);
    }
    for invalid in &dataset.report.skipped_rows {
        println!("  skipped row at line {}: {:?}", invalid.line, invalid.value);
    }
    println!(
        "{} records loaded, {} boundary features indexed.",
        dataset.store.len(),
        dataset.boundaries.len()
    );
    Ok(())
}
