//! Selection state machine and the derived view handed to renderers.
//!
//! One `SelectionState` value belongs to one UI session; the UI layer owns
//! it explicitly and passes it into interaction handlers instead of keeping
//! hidden process-wide session globals. The machine has exactly two states.
//! There is no loading or error state: absence of data is a property of the
//! [`DetailView`] contents, not of the machine.

use crate::iso3::Iso3;
use crate::record::CountryRecord;
use crate::store::IndicatorStore;
use serde::{Deserialize, Serialize};

/// Which slice of a country's timeline is focused: a single year for the
/// snapshot-style variants, or an inclusive year range for the range-slider
/// variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearSpec {
    Single(i32),
    Range(i32, i32),
}

/// What is currently focused in the UI, if anything.
///
/// Transitions: `select` always lands in `Selected` (replacing any prior
/// selection, never stacking), `clear` always lands in `Unselected`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Unselected,
    Selected { iso3: Iso3, years: YearSpec },
}

/// The bundle handed to rendering collaborators for the selected country:
/// one snapshot row for metric cards plus the time series for trend charts.
///
/// Plain owned data with no rendering-library types, serializable as-is,
/// so any charting layer can consume it. Both fields may be empty when the
/// selection has no data in the store; renderers show "no data".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailView {
    pub iso3: Iso3,
    /// Display name from the latest available row, if any row exists.
    pub country_name: Option<String>,
    /// The focused single-year row; for a year range, the latest row inside
    /// the range (the row the sources used for their metric cards).
    pub snapshot: Option<CountryRecord>,
    /// Time series ascending by year; full series for a single-year focus,
    /// range-bounded otherwise.
    pub series: Vec<CountryRecord>,
}

impl SelectionState {
    pub fn new() -> SelectionState {
        SelectionState::Unselected
    }

    /// Handle a "user selected country/year" event.
    ///
    /// Deliberately does not validate existence against the store: the
    /// store answers with empty results and the renderer shows "no data".
    pub fn select(&mut self, iso3: Iso3, years: YearSpec) {
        *self = SelectionState::Selected { iso3, years };
    }

    /// Handle a close/deselect event.
    pub fn clear(&mut self) {
        *self = SelectionState::Unselected;
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, SelectionState::Selected { .. })
    }

    /// Derive the view for the current selection.
    ///
    /// `None` while unselected (renderers show a "click a country" hint).
    /// While selected this always returns a view, possibly with an empty
    /// snapshot and series; it never fails on unknown countries or years.
    pub fn current_detail(&self, store: &IndicatorStore) -> Option<DetailView> {
        let (iso3, years) = match self {
            SelectionState::Unselected => return None,
            SelectionState::Selected { iso3, years } => (iso3, *years),
        };

        let (snapshot, series) = match years {
            YearSpec::Single(year) => {
                let snapshot = store.record(iso3, year).cloned();
                let series: Vec<CountryRecord> =
                    store.series_for(iso3).into_iter().cloned().collect();
                (snapshot, series)
            }
            YearSpec::Range(min, max) => {
                let series: Vec<CountryRecord> = store
                    .series_in_range(iso3, (min, max))
                    .into_iter()
                    .cloned()
                    .collect();
                let snapshot = series.last().cloned();
                (snapshot, series)
            }
        };

        let country_name = series.last().map(|r| r.country_name.clone());
        Some(DetailView {
            iso3: iso3.clone(),
            country_name,
            snapshot,
            series,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{SelectionState, YearSpec};
    use crate::iso3::Iso3;
    use crate::record::CountryRecord;
    use crate::store::IndicatorStore;
    use std::collections::BTreeMap;

    fn row(iso3: &str, year: i32, gdp: f64) -> CountryRecord {
        let mut indicators = BTreeMap::new();
        indicators.insert("GDP_per_capita".to_string(), gdp);
        CountryRecord {
            country_name: format!("Country {iso3}"),
            iso3: Some(Iso3::parse(iso3).unwrap()),
            year,
            indicators,
            fill_color: None,
        }
    }

    fn sample_store() -> IndicatorStore {
        IndicatorStore::build(vec![
            row("IND", 2019, 1900.0),
            row("IND", 2020, 2000.0),
            row("IND", 2021, 2100.0),
            row("USA", 2020, 60000.0),
        ])
    }

    #[test]
    fn unselected_state_yields_no_detail() {
        let state = SelectionState::new();
        assert!(!state.is_selected());
        assert!(state.current_detail(&sample_store()).is_none());
    }

    #[test]
    fn single_year_selection_bundles_snapshot_and_full_series() {
        let store = sample_store();
        let mut state = SelectionState::new();
        state.select(Iso3::parse("USA").unwrap(), YearSpec::Single(2020));

        let detail = state.current_detail(&store).unwrap();
        assert_eq!(detail.iso3.as_str(), "USA");
        let snapshot = detail.snapshot.unwrap();
        assert_eq!(snapshot.year, 2020);
        assert_eq!(snapshot.iso3.as_ref().unwrap().as_str(), "USA");
        assert_eq!(detail.series.len(), 1);
        assert_eq!(detail.country_name.as_deref(), Some("Country USA"));
    }

    #[test]
    fn range_selection_bounds_series_and_snapshots_latest_in_range() {
        let store = sample_store();
        let mut state = SelectionState::new();
        state.select(Iso3::parse("IND").unwrap(), YearSpec::Range(2019, 2020));

        let detail = state.current_detail(&store).unwrap();
        let years: Vec<i32> = detail.series.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2019, 2020]);
        assert_eq!(detail.snapshot.unwrap().year, 2020);
    }

    #[test]
    fn unknown_selection_yields_empty_detail_not_an_error() {
        let store = sample_store();
        let mut state = SelectionState::new();
        state.select(Iso3::parse("XXX").unwrap(), YearSpec::Single(1999));

        let detail = state.current_detail(&store).unwrap();
        assert!(detail.snapshot.is_none());
        assert!(detail.series.is_empty());
        assert!(detail.country_name.is_none());
    }

    #[test]
    fn selected_year_absent_from_store_gives_empty_snapshot_full_series() {
        let store = sample_store();
        let mut state = SelectionState::new();
        state.select(Iso3::parse("IND").unwrap(), YearSpec::Single(1950));

        let detail = state.current_detail(&store).unwrap();
        assert!(detail.snapshot.is_none());
        assert_eq!(detail.series.len(), 3);
    }

    #[test]
    fn select_replaces_prior_selection_and_clear_resets() {
        let store = sample_store();
        let mut state = SelectionState::new();
        state.select(Iso3::parse("IND").unwrap(), YearSpec::Single(2020));
        state.select(Iso3::parse("USA").unwrap(), YearSpec::Single(2020));

        let detail = state.current_detail(&store).unwrap();
        assert_eq!(detail.iso3.as_str(), "USA");

        state.clear();
        assert_eq!(state, SelectionState::Unselected);
        assert!(state.current_detail(&store).is_none());
    }
}
