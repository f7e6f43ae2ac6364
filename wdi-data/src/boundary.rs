//! Boundary GeoJSON ingestion.
//!
//! The core never touches geometry: all the map join needs is which ISO3
//! codes the boundary file can draw, and a display name for each. Feature
//! identifiers live either in the top-level feature `id` or in a nested
//! property depending on which world file a variant shipped with; both are
//! accepted here.

use crate::report::{InvalidValue, ValidationReport};
use geojson::{feature::Id, GeoJson};
use std::collections::BTreeMap;
use wdi_core::{Iso3, WdiError};

/// Property keys consulted for a feature's country identifier, in order.
const ID_PROPERTIES: [&str; 4] = ["ISO_A3", "iso_a3", "adm0_a3", "id"];

/// Property keys consulted for a feature's display name, in order.
const NAME_PROPERTIES: [&str; 4] = ["name", "NAME", "ADMIN", "admin"];

/// Identifier-to-name mapping for every drawable boundary feature.
///
/// A record whose ISO3 is absent from this index can still be charted and
/// listed, but it is unreachable from the map click path.
#[derive(Debug, Default, Clone)]
pub struct BoundaryIndex {
    names: BTreeMap<Iso3, String>,
}

impl BoundaryIndex {
    /// Parse a boundary GeoJSON string into an index.
    ///
    /// Features whose identifier fails ISO3 normalization are reported (by
    /// feature index) and skipped; they cannot participate in the map join
    /// but do not fail the load.
    pub fn from_geojson_str(data: &str) -> wdi_core::Result<(BoundaryIndex, ValidationReport)> {
        let geojson: GeoJson = data
            .parse()
            .map_err(|e: geojson::Error| WdiError::GeoJsonParse(e.to_string()))?;
        let collection = match geojson {
            GeoJson::FeatureCollection(fc) => fc,
            _ => {
                return Err(WdiError::InvalidFormat(
                    "boundary data is not a FeatureCollection".to_string(),
                ))
            }
        };

        let mut index = BoundaryIndex::default();
        let mut report = ValidationReport::default();

        for (feature_idx, feature) in collection.features.into_iter().enumerate() {
            let raw_id = match &feature.id {
                Some(Id::String(s)) => Some(s.clone()),
                Some(Id::Number(n)) => Some(n.to_string()),
                None => feature.properties.as_ref().and_then(|props| {
                    ID_PROPERTIES
                        .iter()
                        .find_map(|key| props.get(*key).and_then(|v| v.as_str()))
                        .map(str::to_string)
                }),
            };

            let raw_id = match raw_id {
                Some(id) => id,
                None => {
                    report.invalid_iso3.push(InvalidValue {
                        line: feature_idx,
                        value: String::new(),
                    });
                    continue;
                }
            };

            let iso3 = match Iso3::parse(&raw_id) {
                Ok(code) => code,
                Err(_) => {
                    report.invalid_iso3.push(InvalidValue {
                        line: feature_idx,
                        value: raw_id,
                    });
                    continue;
                }
            };

            let name = feature
                .properties
                .as_ref()
                .and_then(|props| {
                    NAME_PROPERTIES
                        .iter()
                        .find_map(|key| props.get(*key).and_then(|v| v.as_str()))
                })
                .unwrap_or(iso3.as_str())
                .to_string();

            index.names.insert(iso3, name);
        }

        log::info!(
            "boundary: indexed {} features ({} unmatchable)",
            index.names.len(),
            report.invalid_iso3.len()
        );
        Ok((index, report))
    }

    /// Whether the map can draw this country at all.
    pub fn contains(&self, iso3: &Iso3) -> bool {
        self.names.contains_key(iso3)
    }

    /// Display name carried by the boundary feature.
    pub fn name(&self, iso3: &Iso3) -> Option<&str> {
        self.names.get(iso3).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Iso3, &str)> {
        self.names.iter().map(|(iso3, name)| (iso3, name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::BoundaryIndex;
    use wdi_core::Iso3;

    const WORLD_GEOJSON: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "id": "IND",
             "properties": {"name": "India"}, "geometry": null},
            {"type": "Feature",
             "properties": {"ISO_A3": " usa ", "ADMIN": "United States of America"},
             "geometry": null},
            {"type": "Feature", "id": "-99",
             "properties": {"name": "Somaliland"}, "geometry": null}
        ]
    }"#;

    #[test]
    fn indexes_top_level_ids_and_nested_properties() {
        let (index, report) = BoundaryIndex::from_geojson_str(WORLD_GEOJSON).unwrap();
        assert_eq!(index.len(), 2);

        let ind = Iso3::parse("IND").unwrap();
        assert!(index.contains(&ind));
        assert_eq!(index.name(&ind), Some("India"));

        // nested, unclean property id still normalizes
        let usa = Iso3::parse("USA").unwrap();
        assert_eq!(index.name(&usa), Some("United States of America"));

        // the "-99" placeholder id used for disputed territories is reported
        assert_eq!(report.invalid_iso3.len(), 1);
        assert_eq!(report.invalid_iso3[0].value, "-99");
    }

    #[test]
    fn rejects_non_feature_collection_input() {
        let err = BoundaryIndex::from_geojson_str(
            r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("FeatureCollection"));
    }

    #[test]
    fn bad_json_is_a_parse_error() {
        assert!(BoundaryIndex::from_geojson_str("{not json").is_err());
    }

    #[test]
    fn feature_without_name_falls_back_to_its_code() {
        let data = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "id": "PER", "properties": {}, "geometry": null}
        ]}"#;
        let (index, report) = BoundaryIndex::from_geojson_str(data).unwrap();
        assert!(report.is_clean());
        let per = Iso3::parse("PER").unwrap();
        assert_eq!(index.name(&per), Some("PER"));
    }
}
