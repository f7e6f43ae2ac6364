//! Assembly of the three sources into one immutable, queryable value.

use crate::boundary::BoundaryIndex;
use crate::loader;
use crate::report::ValidationReport;
use wdi_core::{CountryRecord, IndicatorStore, Iso3};

/// The fully loaded dataset: the merged indicator store, the boundary index
/// the map draws from, and the diagnostics gathered while loading.
///
/// Built once per data load and treated as immutable; to reload sources,
/// assemble a fresh `Dataset` and swap the value so in-flight readers keep
/// a consistent snapshot. The store is read-only after construction and
/// safely shareable.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub store: IndicatorStore,
    pub boundaries: BoundaryIndex,
    pub report: ValidationReport,
}

impl Dataset {
    /// Load and join the indicator table, the optional color table, and the
    /// boundary GeoJSON.
    ///
    /// Only structurally unusable input fails this call (unreadable CSV,
    /// missing required columns, malformed GeoJSON). Everything row-level
    /// lands in the validation report instead.
    pub fn assemble(
        indicator_csv: &str,
        color_csv: Option<&str>,
        boundary_geojson: &str,
    ) -> wdi_core::Result<Dataset> {
        let loader::LoadOutcome {
            mut records,
            mut report,
        } = loader::load_indicators(indicator_csv)?;

        if let Some(color_csv) = color_csv {
            let outcome = loader::load_colors(color_csv)?;
            outcome.table.apply(&mut records);
            report.merge(outcome.report);
        }

        let (boundaries, boundary_report) = BoundaryIndex::from_geojson_str(boundary_geojson)?;
        report.merge(boundary_report);

        let store = IndicatorStore::build(records);
        log::info!(
            "dataset: {} records, {} boundary features",
            store.len(),
            boundaries.len()
        );
        Ok(Dataset {
            store,
            boundaries,
            report,
        })
    }

    /// The map join: one record per country for the given year, restricted
    /// to countries the boundary file can draw.
    ///
    /// Records without a boundary feature stay reachable through
    /// `store.series_for` and `store.series_by_name`; they simply cannot be
    /// rendered on the map.
    pub fn mappable_snapshot(&self, year: i32) -> Vec<&CountryRecord> {
        self.store
            .snapshot(year)
            .into_iter()
            .filter(|record| {
                record
                    .iso3
                    .as_ref()
                    .is_some_and(|iso3| self.boundaries.contains(iso3))
            })
            .collect()
    }

    /// The map click path: normalize a raw feature identifier and confirm
    /// it names a drawable boundary. The result is what the UI layer hands
    /// to `SelectionState::select`.
    pub fn resolve_click(&self, raw_feature_id: &str) -> Option<Iso3> {
        let iso3 = Iso3::parse(raw_feature_id).ok()?;
        self.boundaries.contains(&iso3).then_some(iso3)
    }
}

#[cfg(test)]
mod tests {
    use super::Dataset;
    use wdi_core::{Iso3, SelectionState, YearSpec};

    const INDICATOR_CSV: &str = "\
Country,ISO3,Year,GDP_per_capita
India,IND,2020,2000
India,IND,2021,2100
United States,USA,2020,60000
Kosovo,XKX,2020,4400
Atlantis,??,2020,123
";

    const COLOR_CSV: &str = "\
country,iso_alpha,hex
India,IND,ff9933
United States,USA,3c3b6e
";

    // XKX is in the indicator table but not in the boundary file
    const WORLD_GEOJSON: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "id": "IND", "properties": {"name": "India"}, "geometry": null},
            {"type": "Feature", "id": "USA", "properties": {"name": "United States"}, "geometry": null},
            {"type": "Feature", "id": "FRA", "properties": {"name": "France"}, "geometry": null}
        ]
    }"#;

    fn sample_dataset() -> Dataset {
        Dataset::assemble(INDICATOR_CSV, Some(COLOR_CSV), WORLD_GEOJSON).unwrap()
    }

    #[test]
    fn assemble_merges_colors_and_collects_diagnostics() {
        let dataset = sample_dataset();
        let ind = Iso3::parse("IND").unwrap();
        let record = dataset.store.record(&ind, 2020).unwrap();
        assert_eq!(record.fill_color.as_ref().unwrap().as_str(), "#FF9933");
        // the "??" identifier from the indicator table
        assert_eq!(dataset.report.invalid_iso3.len(), 1);
    }

    #[test]
    fn mappable_snapshot_excludes_countries_without_boundaries() {
        let dataset = sample_dataset();
        let snapshot = dataset.mappable_snapshot(2020);
        let codes: Vec<&str> = snapshot
            .iter()
            .map(|r| r.iso3.as_ref().unwrap().as_str())
            .collect();
        // XKX has no boundary feature and Atlantis has no key; neither maps
        assert_eq!(codes, vec!["IND", "USA"]);

        // but XKX is still fully chartable
        let xkx = Iso3::parse("XKX").unwrap();
        assert_eq!(dataset.store.series_for(&xkx).len(), 1);
    }

    #[test]
    fn resolve_click_normalizes_and_checks_boundaries() {
        let dataset = sample_dataset();
        assert_eq!(
            dataset.resolve_click(" ind ").unwrap(),
            Iso3::parse("IND").unwrap()
        );
        // drawable boundary without data still resolves; the store answers empty
        assert!(dataset.resolve_click("FRA").is_some());
        // no boundary feature means no click can originate there
        assert!(dataset.resolve_click("XKX").is_none());
        assert!(dataset.resolve_click("-99").is_none());
    }

    #[test]
    fn click_to_detail_round_trip() {
        let dataset = sample_dataset();
        let mut selection = SelectionState::new();

        let iso3 = dataset.resolve_click("IND").unwrap();
        selection.select(iso3, YearSpec::Single(2020));

        let detail = selection.current_detail(&dataset.store).unwrap();
        assert_eq!(detail.snapshot.unwrap().year, 2020);
        assert_eq!(detail.series.len(), 2);

        selection.clear();
        assert!(selection.current_detail(&dataset.store).is_none());
    }

    #[test]
    fn boundary_country_with_no_data_yields_empty_detail() {
        let dataset = sample_dataset();
        let mut selection = SelectionState::new();
        selection.select(dataset.resolve_click("FRA").unwrap(), YearSpec::Single(2020));

        let detail = selection.current_detail(&dataset.store).unwrap();
        assert!(detail.snapshot.is_none());
        assert!(detail.series.is_empty());
    }
}
