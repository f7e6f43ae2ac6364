//! In-memory queryable view over the merged country/year/indicator table.
//!
//! Built once per data load and immutable afterwards; reloading source data
//! means building a fresh store and swapping the value, never mutating in
//! place. All queries return empty results rather than errors when the key
//! or year is unknown, so renderers show a "no data" state instead of
//! crashing.

use crate::iso3::{clean, Iso3};
use crate::record::CountryRecord;
use std::collections::BTreeMap;
use std::ops::Bound::Included;

/// Deduplicated, queryable store of [`CountryRecord`]s.
///
/// Rows with a normalized ISO3 code are keyed on `(iso3, year)`, which is
/// unique within the store; duplicate pairs in the input resolve last-wins.
/// Rows whose ISO3 failed normalization are retained in a name-joinable
/// side list so tables and charts can still reach them, but they never
/// appear in map-joinable views like [`IndicatorStore::snapshot`].
#[derive(Debug, Default, Clone)]
pub struct IndicatorStore {
    keyed: BTreeMap<(Iso3, i32), CountryRecord>,
    unkeyed: Vec<CountryRecord>,
}

impl IndicatorStore {
    /// Build a store from merged records, in input order.
    ///
    /// Duplicate `(iso3, year)` pairs keep the latest-inserted record; this
    /// holds across separately concatenated batches, since insertion order
    /// is the only tie-break.
    pub fn build(records: Vec<CountryRecord>) -> IndicatorStore {
        let mut store = IndicatorStore::default();
        for record in records {
            match record.iso3.clone() {
                Some(iso3) => {
                    store.keyed.insert((iso3, record.year), record);
                }
                None => store.unkeyed.push(record),
            }
        }
        log::info!(
            "store: built with {} keyed records, {} name-only rows",
            store.keyed.len(),
            store.unkeyed.len()
        );
        store
    }

    /// Number of records held, keyed and name-only alike.
    pub fn len(&self) -> usize {
        self.keyed.len() + self.unkeyed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyed.is_empty() && self.unkeyed.is_empty()
    }

    /// The maximum year present across all records, used as the default
    /// snapshot when no explicit year is selected. `None` when the store
    /// holds no data.
    pub fn latest_year(&self) -> Option<i32> {
        self.keyed
            .keys()
            .map(|(_, year)| *year)
            .chain(self.unkeyed.iter().map(|r| r.year))
            .max()
    }

    /// All keyed records for one year, at most one per country, ordered by
    /// ISO3. Empty when the year has no records; callers show "no data".
    pub fn snapshot(&self, year: i32) -> Vec<&CountryRecord> {
        self.keyed
            .iter()
            .filter(|((_, y), _)| *y == year)
            .map(|(_, record)| record)
            .collect()
    }

    /// Point query for a single country/year row.
    pub fn record(&self, iso3: &Iso3, year: i32) -> Option<&CountryRecord> {
        self.keyed.get(&(iso3.clone(), year))
    }

    /// Full time series for one country, ordered by ascending year.
    /// Empty for unknown countries.
    pub fn series_for(&self, iso3: &Iso3) -> Vec<&CountryRecord> {
        self.series_in_range(iso3, (i32::MIN, i32::MAX))
    }

    /// Time series for one country bounded inclusively by `(min, max)`.
    /// A range with `min > max` yields an empty series, never an error.
    pub fn series_in_range(&self, iso3: &Iso3, (min, max): (i32, i32)) -> Vec<&CountryRecord> {
        if min > max {
            return Vec::new();
        }
        self.keyed
            .range((
                Included((iso3.clone(), min)),
                Included((iso3.clone(), max)),
            ))
            .map(|(_, record)| record)
            .collect()
    }

    /// Time series matched on display name, ascending by year.
    ///
    /// Reaches both keyed rows and rows whose ISO3 failed normalization;
    /// this is the fallback join the country picker uses. Matching is exact
    /// after whitespace trimming.
    pub fn series_by_name(&self, name: &str) -> Vec<&CountryRecord> {
        let wanted = clean(name);
        let mut rows: Vec<&CountryRecord> = self
            .keyed
            .values()
            .chain(self.unkeyed.iter())
            .filter(|r| clean(&r.country_name) == wanted)
            .collect();
        rows.sort_by_key(|r| r.year);
        rows
    }

    /// Sorted `(iso3, display name)` list for selector widgets, one entry
    /// per country. Where names drift across years, the latest year's name
    /// wins.
    pub fn countries(&self) -> Vec<(&Iso3, &str)> {
        let mut out: Vec<(&Iso3, &str)> = Vec::new();
        // keyed is ordered by (iso3, year), so the last row of each group
        // is the latest year for that country
        for ((iso3, _), record) in &self.keyed {
            match out.last_mut() {
                Some((last, name)) if *last == iso3 => *name = record.country_name.as_str(),
                _ => out.push((iso3, record.country_name.as_str())),
            }
        }
        out
    }
}
