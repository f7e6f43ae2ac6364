//! CSV loaders for the indicator table and the per-country color table.
//!
//! Headers are resolved through the alias table in [`crate::aliases`], so
//! the one loader handles every source layout instead of per-variant column
//! guessing. Each loader returns its parsed rows together with a
//! [`ValidationReport`]; bad values are reported and excluded from the
//! affected join only, never escalated into a failed load.
//!
//! # CSV Formats
//!
//! - **Indicators** (with headers): country, year, optional ISO3, optional
//!   hex, plus any number of numeric indicator columns.
//! - **Colors** (with headers): country/iso_alpha/hex triples.

use crate::aliases::{self, ColumnSpec};
use crate::report::{InvalidValue, ValidationReport};
use std::collections::BTreeMap;
use wdi_core::iso3::clean;
use wdi_core::{CountryRecord, HexColor, Iso3, WdiError};

/// Parsed indicator rows plus the diagnostics gathered along the way.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub records: Vec<CountryRecord>,
    pub report: ValidationReport,
}

/// Per-country fill colors from the separate color table, keyed by ISO3.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ColorTable {
    colors: BTreeMap<Iso3, HexColor>,
}

impl ColorTable {
    pub fn get(&self, iso3: &Iso3) -> Option<&HexColor> {
        self.colors.get(iso3)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Fill in `fill_color` on records that do not already carry one.
    pub fn apply(&self, records: &mut [CountryRecord]) {
        for record in records.iter_mut() {
            if record.fill_color.is_none() {
                if let Some(iso3) = &record.iso3 {
                    record.fill_color = self.colors.get(iso3).cloned();
                }
            }
        }
    }
}

/// Parsed color table plus diagnostics.
#[derive(Debug, Clone)]
pub struct ColorOutcome {
    pub table: ColorTable,
    pub report: ValidationReport,
}

fn missing_column(spec: &ColumnSpec) -> WdiError {
    WdiError::MissingColumn {
        column: spec.canonical.to_string(),
        aliases: spec.accepted.join(", "),
    }
}

/// Parse a numeric indicator cell. Empty cells and the usual null tokens
/// become missing values, never a sentinel number.
fn parse_number(cell: &str) -> Option<f64> {
    let cleaned = clean(cell).to_ascii_lowercase();
    match cleaned.as_str() {
        "" | "null" | "n/a" | "na" | "nan" => None,
        s => s.parse::<f64>().ok(),
    }
}

/// Load the indicator table from CSV.
///
/// Requires a country column and a year column (under any accepted alias);
/// an ISO3 column and a hex color column are picked up when present. Every
/// remaining column is treated as a numeric indicator under its canonical
/// name.
///
/// Row handling:
/// - unparseable year: row skipped, reported;
/// - bad ISO3 value: row kept without a key (name-joinable only), reported;
/// - bad hex value: row falls back to the default fill, reported;
/// - missing numeric cell: indicator simply absent for that row.
pub fn load_indicators(csv_data: &str) -> wdi_core::Result<LoadOutcome> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());
    let headers = rdr.headers()?.clone();

    let country_idx = aliases::COUNTRY
        .find(&headers)
        .ok_or_else(|| missing_column(&aliases::COUNTRY))?;
    let year_idx = aliases::YEAR
        .find(&headers)
        .ok_or_else(|| missing_column(&aliases::YEAR))?;
    let iso3_idx = aliases::ISO3.find(&headers);
    let hex_idx = aliases::HEX.find(&headers);

    let reserved = [Some(country_idx), Some(year_idx), iso3_idx, hex_idx];
    let indicator_cols: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| !reserved.contains(&Some(*idx)))
        .map(|(idx, header)| (idx, aliases::canonical_indicator(header)))
        .collect();

    let mut records = Vec::new();
    let mut report = ValidationReport::default();

    for (row_idx, result) in rdr.records().enumerate() {
        let row = result?;
        let line = row_idx + 2; // line 1 is the header

        let year_cell = row.get(year_idx).unwrap_or("");
        let year = match clean(year_cell).parse::<i32>() {
            Ok(year) => year,
            Err(_) => {
                report.skipped_rows.push(InvalidValue {
                    line,
                    value: year_cell.to_string(),
                });
                continue;
            }
        };

        let iso3 = match iso3_idx {
            Some(idx) => {
                let cell = row.get(idx).unwrap_or("");
                match Iso3::parse(cell) {
                    Ok(code) => Some(code),
                    Err(_) => {
                        report.invalid_iso3.push(InvalidValue {
                            line,
                            value: cell.to_string(),
                        });
                        None
                    }
                }
            }
            None => None,
        };

        let fill_color = hex_idx.and_then(|idx| {
            let cell = row.get(idx).unwrap_or("");
            if clean(cell).is_empty() {
                return None;
            }
            match HexColor::parse(cell) {
                Ok(color) => Some(color),
                Err(_) => {
                    report.invalid_hex.push(InvalidValue {
                        line,
                        value: cell.to_string(),
                    });
                    Some(HexColor::default())
                }
            }
        });

        let mut indicators = BTreeMap::new();
        for (idx, name) in &indicator_cols {
            if let Some(value) = row.get(*idx).and_then(parse_number) {
                indicators.insert(name.clone(), value);
            }
        }

        records.push(CountryRecord {
            country_name: clean(row.get(country_idx).unwrap_or("")),
            iso3,
            year,
            indicators,
            fill_color,
        });
    }

    log::info!(
        "loader: loaded {} indicator rows ({} reported)",
        records.len(),
        report.invalid_iso3.len() + report.invalid_hex.len() + report.skipped_rows.len()
    );
    Ok(LoadOutcome { records, report })
}

/// Load the separate country/iso_alpha/hex color table.
///
/// Rows whose ISO3 cannot be normalized have no usable key and are dropped
/// from the color join (reported); rows with a bad hex value keep their key
/// but map to the default fill (reported).
pub fn load_colors(csv_data: &str) -> wdi_core::Result<ColorOutcome> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());
    let headers = rdr.headers()?.clone();

    let iso3_idx = aliases::ISO3
        .find(&headers)
        .ok_or_else(|| missing_column(&aliases::ISO3))?;
    let hex_idx = aliases::HEX
        .find(&headers)
        .ok_or_else(|| missing_column(&aliases::HEX))?;

    let mut table = ColorTable::default();
    let mut report = ValidationReport::default();

    for (row_idx, result) in rdr.records().enumerate() {
        let row = result?;
        let line = row_idx + 2;

        let iso3_cell = row.get(iso3_idx).unwrap_or("");
        let iso3 = match Iso3::parse(iso3_cell) {
            Ok(code) => code,
            Err(_) => {
                report.invalid_iso3.push(InvalidValue {
                    line,
                    value: iso3_cell.to_string(),
                });
                continue;
            }
        };

        let hex_cell = row.get(hex_idx).unwrap_or("");
        let color = match HexColor::parse(hex_cell) {
            Ok(color) => color,
            Err(_) => {
                report.invalid_hex.push(InvalidValue {
                    line,
                    value: hex_cell.to_string(),
                });
                HexColor::default()
            }
        };
        table.colors.insert(iso3, color);
    }

    log::info!("loader: loaded {} color rows", table.len());
    Ok(ColorOutcome { table, report })
}
