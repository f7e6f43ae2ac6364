/// Error types for the WDI core and ingestion crates.
use thiserror::Error;

/// Main error type for WDI operations.
///
/// Malformed ISO3 codes and hex colors inside individual rows are
/// deliberately *not* represented here: they are collected into a
/// validation report and the affected row is dropped from the relevant
/// join only. This type covers failures that make a whole input
/// unusable (unreadable CSV, no recognizable columns, bad GeoJSON).
#[derive(Error, Debug)]
pub enum WdiError {
    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A required column was not found under any accepted alias
    #[error("Missing required column '{column}' (accepted names: {aliases})")]
    MissingColumn { column: String, aliases: String },

    /// Failed to parse GeoJSON boundary data
    #[error("Failed to parse boundary GeoJSON: {0}")]
    GeoJsonParse(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

/// Type alias for Results using WdiError
pub type Result<T> = std::result::Result<T, WdiError>;
