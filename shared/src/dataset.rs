use std::collections::HashMap;

use geojson::{FeatureCollection, GeoJson};
use serde::{Deserialize, Serialize};

use crate::error::{DatasetKind, LoadError};

/// Raw country code -> canonical feature id.
pub type IsoLookup = HashMap<String, String>;

/// A `cases` value as it appears on the wire. Most feeds ship it as a string;
/// anything else (booleans, objects, arrays) is kept so the record survives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCount {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCaseRecord {
    pub countrycode: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cases: Option<RawCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseDocument {
    #[serde(default)]
    pub data: Vec<RawCaseRecord>,
}

/// The three parsed startup documents, produced only when all three loaded.
#[derive(Debug, Clone)]
pub struct Datasets {
    pub world: FeatureCollection,
    pub cases: CaseDocument,
    pub iso: IsoLookup,
}

pub fn parse_world(text: &str) -> Result<FeatureCollection, LoadError> {
    let geojson = text
        .parse::<GeoJson>()
        .map_err(|e| LoadError::parse(DatasetKind::WorldGeometry, e))?;
    match geojson {
        GeoJson::FeatureCollection(fc) => Ok(fc),
        _ => Err(LoadError::parse(
            DatasetKind::WorldGeometry,
            "expected a FeatureCollection",
        )),
    }
}

pub fn parse_cases(text: &str) -> Result<CaseDocument, LoadError> {
    serde_json::from_str(text).map_err(|e| LoadError::parse(DatasetKind::CaseCounts, e))
}

pub fn parse_iso_lookup(text: &str) -> Result<IsoLookup, LoadError> {
    serde_json::from_str(text).map_err(|e| LoadError::parse(DatasetKind::IsoLookup, e))
}

impl Datasets {
    /// Parse all three documents; the first malformed one fails the whole set.
    pub fn parse(world: &str, cases: &str, iso: &str) -> Result<Self, LoadError> {
        Ok(Self {
            world: parse_world(world)?,
            cases: parse_cases(cases)?,
            iso: parse_iso_lookup(iso)?,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{Datasets, RawCount, parse_cases, parse_iso_lookup, parse_world};
    use crate::error::DatasetKind;

    pub(crate) const WORLD: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "id": "AAA", "properties": {"name": "Alpha"},
             "geometry": {"type": "Polygon", "coordinates": [[[0,0],[10,0],[10,10],[0,10],[0,0]]]}},
            {"type": "Feature", "id": "BBB", "properties": {"name": "Beta"},
             "geometry": {"type": "Polygon", "coordinates": [[[20,0],[30,0],[30,10],[20,10],[20,0]]]}},
            {"type": "Feature", "id": "CCC", "properties": {"name": "Gamma"},
             "geometry": {"type": "MultiPolygon", "coordinates": [[[[40,0],[50,0],[50,10],[40,0]]]]}}
        ]
    }"#;

    pub(crate) const CASES: &str = r#"{"data": [
        {"countrycode": "A", "date": "2020-03-02", "cases": "0"},
        {"countrycode": "A", "date": "2020-03-01", "cases": "10"},
        {"countrycode": "B", "date": "2020-03-01", "cases": "50"},
        {"countrycode": "B", "date": "2020-03-02", "cases": 100},
        {"countrycode": "Z", "date": "2020-03-01", "cases": "7"}
    ]}"#;

    pub(crate) const ISO: &str = r#"{"A": "AAA", "B": "BBB", "C": "CCC"}"#;

    #[test]
    fn parses_all_three_documents() {
        let datasets = Datasets::parse(WORLD, CASES, ISO).unwrap();
        assert_eq!(datasets.world.features.len(), 3);
        assert_eq!(datasets.cases.data.len(), 5);
        assert_eq!(datasets.iso.get("B").map(String::as_str), Some("BBB"));
    }

    #[test]
    fn cases_accepts_strings_and_numbers() {
        let doc = parse_cases(CASES).unwrap();
        assert!(matches!(cases_at(&doc, 0), Some(RawCount::Text(s)) if s == "0"));
        assert!(matches!(cases_at(&doc, 3), Some(RawCount::Number(_))));
    }

    #[test]
    fn missing_cases_field_is_not_fatal() {
        let doc = parse_cases(r#"{"data": [{"countrycode": "A", "date": "2020-01-01"}]}"#).unwrap();
        assert!(doc.data[0].cases.is_none());
    }

    #[test]
    fn non_collection_world_is_rejected() {
        let err = parse_world(r#"{"type": "Point", "coordinates": [0, 0]}"#).unwrap_err();
        assert_eq!(err.dataset(), DatasetKind::WorldGeometry);
    }

    #[test]
    fn one_malformed_document_fails_the_set() {
        let err = Datasets::parse(WORLD, CASES, "[1, 2").unwrap_err();
        assert_eq!(err.dataset(), DatasetKind::IsoLookup);

        let err = parse_iso_lookup(r#"{"A": 3}"#).unwrap_err();
        assert_eq!(err.dataset(), DatasetKind::IsoLookup);
    }

    fn cases_at(doc: &super::CaseDocument, i: usize) -> Option<&RawCount> {
        doc.data.get(i).and_then(|r| r.cases.as_ref())
    }
}
