//! Fill-color validation for map rendering.
//!
//! Color values arrive as `#RRGGBB` strings with or without the leading `#`
//! and in any case. Invalid values never fail a load; the ingestion layer
//! substitutes [`HexColor::default`] and records the offending value in the
//! validation report.

use crate::iso3::clean;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Neutral light gray used when a row carries no usable color.
pub const DEFAULT_FILL: &str = "#D3D3D3";

/// A raw color value that is not a 6-digit hex color.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid hex color: {0:?}")]
pub struct HexColorParseError(pub String);

/// A validated `#RRGGBB` fill color, uppercase with leading `#`.
///
/// Purely presentational; carried through the store untouched so the map
/// layer can use precomputed per-country colors where the source supplies
/// them. Deserialization goes through [`HexColor::parse`], so only valid
/// colors can round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct HexColor(String);

impl TryFrom<String> for HexColor {
    type Error = HexColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HexColor::parse(&value)
    }
}

impl HexColor {
    /// Normalize a raw color value to canonical `#RRGGBB` form.
    ///
    /// Accepts an optional leading `#` and any case; requires exactly six
    /// hex digits after cleaning.
    pub fn parse(raw: &str) -> Result<HexColor, HexColorParseError> {
        let cleaned = clean(raw);
        let digits = cleaned.strip_prefix('#').unwrap_or(&cleaned);
        if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(HexColor(format!("#{}", digits.to_ascii_uppercase())))
        } else {
            Err(HexColorParseError(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HexColor {
    fn default() -> Self {
        HexColor(DEFAULT_FILL.to_string())
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
