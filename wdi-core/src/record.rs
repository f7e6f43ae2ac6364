//! The merged country/year/indicator row type.

use crate::hex_color::HexColor;
use crate::iso3::Iso3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the merged dataset: one country in one year, with whatever
/// indicator values the sources carried for it.
///
/// `iso3` is `None` when the source identifier failed normalization; such
/// rows stay queryable by display name but never appear in map-joinable
/// views. Missing indicator values are simply absent from `indicators`, so
/// consumers can tell "zero" from "unknown" via [`CountryRecord::indicator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// Display name; not guaranteed unique across sources without normalization.
    pub country_name: String,
    /// Canonical join key, when the source value normalized cleanly.
    pub iso3: Option<Iso3>,
    /// Calendar year of observation.
    pub year: i32,
    /// Indicator name to value; absent key means missing data, never a sentinel.
    pub indicators: BTreeMap<String, f64>,
    /// Precomputed map fill color, if the source supplied a valid one.
    pub fill_color: Option<HexColor>,
}

impl CountryRecord {
    /// Value of a single indicator, or `None` if this country/year has no
    /// data for it.
    pub fn indicator(&self, name: &str) -> Option<f64> {
        self.indicators.get(name).copied()
    }

    /// Fill color for map rendering, falling back to the documented neutral
    /// default when the row carries none.
    pub fn fill_color_or_default(&self) -> HexColor {
        self.fill_color.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::CountryRecord;
    use crate::hex_color::{HexColor, DEFAULT_FILL};
    use crate::iso3::Iso3;
    use std::collections::BTreeMap;

    fn record() -> CountryRecord {
        let mut indicators = BTreeMap::new();
        indicators.insert("GDP_per_capita".to_string(), 60000.0);
        indicators.insert("Gini_Index".to_string(), 0.0);
        CountryRecord {
            country_name: "United States".to_string(),
            iso3: Some(Iso3::parse("USA").unwrap()),
            year: 2020,
            indicators,
            fill_color: None,
        }
    }

    #[test]
    fn indicator_distinguishes_zero_from_missing() {
        let r = record();
        assert_eq!(r.indicator("Gini_Index"), Some(0.0));
        assert_eq!(r.indicator("HDI"), None);
    }

    #[test]
    fn fill_color_falls_back_to_default() {
        let mut r = record();
        assert_eq!(r.fill_color_or_default().as_str(), DEFAULT_FILL);
        r.fill_color = Some(HexColor::parse("#102030").unwrap());
        assert_eq!(r.fill_color_or_default().as_str(), "#102030");
    }
}
