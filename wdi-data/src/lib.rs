//! Ingestion layer for the WDI dashboard core.
//!
//! Loads the three independently-formatted sources every dashboard variant
//! juggles (the indicator table, the per-country color table, and the world
//! boundary GeoJSON), normalizes their identifiers through `wdi-core`, and
//! assembles them into an immutable [`Dataset`].
//!
//! Malformed values are never fatal: bad ISO3 codes and hex colors are
//! collected into a [`report::ValidationReport`] for a UI warning banner
//! while the load carries on, and rows that cannot be keyed stay reachable
//! by display name.
//!
//! # Usage
//!
//! ```rust
//! use wdi_data::Dataset;
//!
//! let indicators = "Country,ISO3,Year,GDP_per_capita\nIndia,IND,2021,2100\n";
//! let boundaries = r#"{"type":"FeatureCollection","features":[
//!     {"type":"Feature","id":"IND","properties":{"name":"India"},"geometry":null}]}"#;
//!
//! let dataset = Dataset::assemble(indicators, None, boundaries).unwrap();
//! assert_eq!(dataset.store.latest_year(), Some(2021));
//! assert_eq!(dataset.mappable_snapshot(2021).len(), 1);
//! ```

pub mod aliases;
pub mod boundary;
pub mod dataset;
pub mod loader;
pub mod report;

pub use boundary::BoundaryIndex;
pub use dataset::Dataset;
pub use loader::{ColorTable, LoadOutcome};
pub use report::{InvalidValue, ValidationReport};
