//! Core data model for country-indicator dashboards.
//!
//! This crate holds the pieces every dashboard variant reimplements ad hoc:
//! identifier normalization (ISO3 codes and hex fill colors), the merged
//! country/year/indicator store, and the selection state machine that derives
//! the views handed to rendering collaborators. It does no I/O and carries no
//! rendering-library types; loading CSV and GeoJSON sources lives in
//! `wdi-data`.

pub mod error;
pub mod hex_color;
pub mod iso3;
pub mod record;
pub mod selection;
pub mod store;

pub use error::{Result, WdiError};
pub use hex_color::HexColor;
pub use iso3::Iso3;
pub use record::CountryRecord;
pub use selection::{DetailView, SelectionState, YearSpec};
pub use store::IndicatorStore;
