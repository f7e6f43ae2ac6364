//! Non-fatal diagnostics collected during a load.
//!
//! Malformed identifiers and colors are surfaced to the user as a warning
//! banner, never as a failed load: the affected row is excluded from the
//! join it cannot participate in and everything else proceeds.

use serde::Serialize;

/// One offending source value and where it was found (1-based CSV line, or
/// 0-based feature index for GeoJSON input).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidValue {
    pub line: usize,
    pub value: String,
}

/// Side list of everything that failed validation during a load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Country identifiers that could not be coerced to ISO3; the rows are
    /// kept, but only name-joinable.
    pub invalid_iso3: Vec<InvalidValue>,
    /// Color values that were not `#RRGGBB`; the rows fall back to the
    /// default neutral fill.
    pub invalid_hex: Vec<InvalidValue>,
    /// Rows dropped entirely (e.g. unparseable year).
    pub skipped_rows: Vec<InvalidValue>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.invalid_iso3.is_empty() && self.invalid_hex.is_empty() && self.skipped_rows.is_empty()
    }

    /// Fold another report into this one, e.g. when combining the indicator
    /// table, color table, and boundary loads.
    pub fn merge(&mut self, other: ValidationReport) {
        self.invalid_iso3.extend(other.invalid_iso3);
        self.invalid_hex.extend(other.invalid_hex);
        self.skipped_rows.extend(other.skipped_rows);
    }

    /// One-paragraph summary suitable for a warning banner.
    pub fn summary(&self) -> String {
        if self.is_clean() {
            return "All rows loaded cleanly.".to_string();
        }
        let mut parts = Vec::new();
        if !self.invalid_iso3.is_empty() {
            parts.push(format!("{} invalid ISO3 value(s)", self.invalid_iso3.len()));
        }
        if !self.invalid_hex.is_empty() {
            parts.push(format!("{} invalid HEX value(s)", self.invalid_hex.len()));
        }
        if !self.skipped_rows.is_empty() {
            parts.push(format!("{} row(s) skipped", self.skipped_rows.len()));
        }
        format!(
            "Invalid ISO3 or HEX values found: {}. Affected rows are excluded \
             from the map join but retained where possible.",
            parts.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{InvalidValue, ValidationReport};

    #[test]
    fn empty_report_is_clean() {
        let report = ValidationReport::default();
        assert!(report.is_clean());
        assert_eq!(report.summary(), "All rows loaded cleanly.");
    }

    #[test]
    fn merge_concatenates_all_sections() {
        let mut a = ValidationReport::default();
        a.invalid_iso3.push(InvalidValue {
            line: 2,
            value: "US".to_string(),
        });
        let mut b = ValidationReport::default();
        b.invalid_hex.push(InvalidValue {
            line: 5,
            value: "zzzzzz".to_string(),
        });
        a.merge(b);
        assert!(!a.is_clean());
        assert_eq!(a.invalid_iso3.len(), 1);
        assert_eq!(a.invalid_hex.len(), 1);
        let summary = a.summary();
        assert!(summary.contains("1 invalid ISO3 value(s)"));
        assert!(summary.contains("1 invalid HEX value(s)"));
    }
}
