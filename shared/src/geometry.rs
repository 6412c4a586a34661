use geojson::{FeatureCollection, Value, feature::Id};

/// One linear ring as (longitude, latitude) pairs in degrees.
pub type Ring = Vec<(f64, f64)>;

/// Polygon outer ring followed by its holes.
pub type Polygon = Vec<Ring>;

/// One country from the world geometry document.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoFeature {
    /// Join key matched against `CaseRecord::id`.
    pub id: Option<String>,
    pub name: String,
    pub polygons: Vec<Polygon>,
}

fn ring_from(positions: &[Vec<f64>]) -> Ring {
    positions
        .iter()
        .filter_map(|p| match p.as_slice() {
            [lon, lat, ..] => Some((*lon, *lat)),
            _ => None,
        })
        .collect()
}

fn polygon_from(rings: &[Vec<Vec<f64>>]) -> Polygon {
    rings.iter().map(|ring| ring_from(ring)).collect()
}

fn collect_polygons(value: &Value, out: &mut Vec<Polygon>) {
    match value {
        Value::Polygon(rings) => out.push(polygon_from(rings)),
        Value::MultiPolygon(polygons) => out.extend(polygons.iter().map(|p| polygon_from(p))),
        Value::GeometryCollection(geometries) => {
            for geometry in geometries {
                collect_polygons(&geometry.value, out);
            }
        }
        // Points and lines have no area to shade.
        _ => {}
    }
}

fn id_string(id: &Id) -> String {
    match id {
        Id::String(s) => s.clone(),
        Id::Number(n) => n.to_string(),
    }
}

/// Flatten a FeatureCollection into drawable features.
///
/// Features keep their position in the collection. Ones without any polygon
/// geometry still produce an (empty) feature so their tooltip data stays
/// addressable.
pub fn features_from_collection(collection: &FeatureCollection) -> Vec<GeoFeature> {
    let features: Vec<GeoFeature> = collection
        .features
        .iter()
        .map(|feature| {
            let id = feature.id.as_ref().map(id_string).or_else(|| {
                feature
                    .property("id")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            });
            let name = feature
                .property("name")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            let mut polygons = Vec::new();
            if let Some(geometry) = &feature.geometry {
                collect_polygons(&geometry.value, &mut polygons);
            }
            GeoFeature { id, name, polygons }
        })
        .collect();

    let without_id = features.iter().filter(|f| f.id.is_none()).count();
    if without_id > 0 {
        tracing::warn!(without_id, "features without a join id always render as no data");
    }
    features
}
