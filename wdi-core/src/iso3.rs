//! ISO3 country code normalization.
//!
//! The indicator table, the color table, and the boundary GeoJSON are
//! independently sourced, and their country identifiers arrive with stray
//! whitespace, zero-width characters, and mixed case. Everything joins on
//! the canonical form produced here: exactly three ASCII letters, uppercase.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Invisible Unicode formatting characters seen in exported spreadsheet data:
/// zero-width space/non-joiner/joiner, word joiner, and the BOM.
const INVISIBLE: [char; 5] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{FEFF}'];

/// Strip invisible formatting characters and surrounding whitespace from a
/// raw identifier or header cell.
pub fn clean(raw: &str) -> String {
    raw.chars()
        .filter(|c| !INVISIBLE.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// A raw country identifier that could not be coerced to an ISO3 code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid ISO3 code: {0:?}")]
pub struct Iso3ParseError(pub String);

/// Canonical three-letter country code, uppercase (e.g. "USA", "IND").
///
/// Primary join key across the indicator table, the color table, and the
/// boundary GeoJSON. Construct via [`Iso3::parse`]; the inner string is
/// guaranteed to be exactly three ASCII uppercase letters. Deserialization
/// goes through [`Iso3::parse`] too, so the invariant survives round-trips.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Iso3(String);

impl TryFrom<String> for Iso3 {
    type Error = Iso3ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Iso3::parse(&value)
    }
}

impl Iso3 {
    /// Normalize a raw country identifier into a canonical ISO3 code.
    ///
    /// Input is cleaned of whitespace and invisible formatting characters
    /// and matched case-insensitively. Anything that is not exactly three
    /// ASCII letters after cleaning is rejected, never truncated or padded;
    /// 2-letter codes and numeric codes are errors.
    pub fn parse(raw: &str) -> Result<Iso3, Iso3ParseError> {
        let cleaned = clean(raw);
        if cleaned.len() == 3 && cleaned.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Iso3(cleaned.to_ascii_uppercase()))
        } else {
            Err(Iso3ParseError(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Iso3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
