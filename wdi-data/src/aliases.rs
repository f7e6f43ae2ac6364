//! Declarative column alias table.
//!
//! The source tables spell their headers a dozen different ways ("Entity"
//! vs "Country", "iso_alpha" vs "ISO3", "GiniIndex" vs "Gini_Index").
//! Instead of per-variant conditional renames, ingestion consults this one
//! table: each canonical column name lists the source spellings it accepts.
//! Header cells are cleaned of whitespace and invisible characters and
//! matched case-insensitively.

use wdi_core::iso3::clean;

/// A canonical column and the source header spellings it accepts.
pub struct ColumnSpec {
    pub canonical: &'static str,
    pub accepted: &'static [&'static str],
}

impl ColumnSpec {
    /// Whether a cleaned header cell names this column.
    pub fn matches(&self, header: &str) -> bool {
        let cleaned = clean(header);
        self.canonical.eq_ignore_ascii_case(&cleaned)
            || self
                .accepted
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(&cleaned))
    }

    /// Index of this column within a header row, if present.
    pub fn find(&self, headers: &csv::StringRecord) -> Option<usize> {
        headers.iter().position(|h| self.matches(h))
    }
}

/// Country display name column.
pub const COUNTRY: ColumnSpec = ColumnSpec {
    canonical: "Country",
    accepted: &["entity", "country or entity", "country_name", "name"],
};

/// ISO3 code column.
pub const ISO3: ColumnSpec = ColumnSpec {
    canonical: "ISO3",
    accepted: &["iso_alpha", "iso_a3", "iso3_code", "code"],
};

/// Observation year column.
pub const YEAR: ColumnSpec = ColumnSpec {
    canonical: "Year",
    accepted: &[],
};

/// Fill color column (present in single-file "Hex.csv" layouts and in the
/// separate color table).
pub const HEX: ColumnSpec = ColumnSpec {
    canonical: "hex",
    accepted: &["color", "fill", "fill_color", "hex_color"],
};

/// Known indicator columns and their observed source spellings. Columns not
/// listed here are still loaded, under their cleaned original name.
pub const INDICATORS: &[ColumnSpec] = &[
    ColumnSpec {
        canonical: "GDP_per_capita",
        accepted: &["gdp per capita", "gdppercapita", "gdp_pc"],
    },
    ColumnSpec {
        canonical: "Gini_Index",
        accepted: &["giniindex", "gini index", "gini"],
    },
    ColumnSpec {
        canonical: "Life_Expectancy",
        accepted: &["lifeexpectancy", "life expectancy"],
    },
    ColumnSpec {
        canonical: "PM25",
        accepted: &["pm2.5", "pm_25"],
    },
    ColumnSpec {
        canonical: "Health_Insurance",
        accepted: &["healthinsurance", "health insurance coverage"],
    },
    ColumnSpec {
        canonical: "Median_Age_Est",
        accepted: &["medianageest", "median age (estimated)"],
    },
    ColumnSpec {
        canonical: "Median_Age_Mid",
        accepted: &["medianagemid", "median age (mid)"],
    },
    ColumnSpec {
        canonical: "COVID_Deaths",
        accepted: &["coviddeaths", "covid deaths per million"],
    },
    ColumnSpec {
        canonical: "COVID_Cases",
        accepted: &["covidcases", "covid cases per million"],
    },
    ColumnSpec {
        canonical: "Population_Density",
        accepted: &["populationdensity", "population density"],
    },
    ColumnSpec {
        canonical: "Total_Population",
        accepted: &["totalpopulation", "total population", "population"],
    },
    ColumnSpec {
        canonical: "HDI",
        accepted: &["human development index"],
    },
];

/// Canonical name for an indicator header: the alias-table name when the
/// spelling is known, otherwise the cleaned header itself.
pub fn canonical_indicator(header: &str) -> String {
    for spec in INDICATORS {
        if spec.matches(header) {
            return spec.canonical.to_string();
        }
    }
    clean(header)
}

#[cfg(test)]
mod tests {
    use super::{canonical_indicator, COUNTRY, ISO3, YEAR};

    #[test]
    fn country_column_accepts_entity_spelling() {
        assert!(COUNTRY.matches("Entity"));
        assert!(COUNTRY.matches(" country "));
        assert!(COUNTRY.matches("Country or Entity"));
        assert!(!COUNTRY.matches("Continent"));
    }

    #[test]
    fn iso3_column_accepts_plotly_spelling() {
        assert!(ISO3.matches("iso_alpha"));
        assert!(ISO3.matches("ISO3"));
        assert!(!ISO3.matches("iso2"));
    }

    #[test]
    fn year_matching_is_case_insensitive() {
        assert!(YEAR.matches("YEAR"));
        assert!(YEAR.matches("year\u{200B}"));
    }

    #[test]
    fn indicator_aliases_map_to_canonical_names() {
        assert_eq!(canonical_indicator("GiniIndex"), "Gini_Index");
        assert_eq!(canonical_indicator("gini"), "Gini_Index");
        assert_eq!(canonical_indicator("GDP per capita"), "GDP_per_capita");
        assert_eq!(canonical_indicator("HDI"), "HDI");
    }

    #[test]
    fn unknown_indicator_keeps_cleaned_original_name() {
        assert_eq!(canonical_indicator(" Literacy_Rate \u{200B}"), "Literacy_Rate");
    }
}
