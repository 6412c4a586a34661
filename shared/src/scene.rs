use std::collections::HashMap;
use std::sync::Arc;

use crate::color_scale::{ColorScale, NO_DATA_FILL};
use crate::geometry::GeoFeature;
use crate::join::CaseRecord;
use crate::projection::Projection;
use crate::selection::SelectionState;

/// A feature with its screen-space path computed once at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct MapFeature {
    pub id: Option<String>,
    pub name: String,
    pub path: Arc<str>,
}

impl MapFeature {
    pub fn project(features: &[GeoFeature], projection: &Projection) -> Vec<Self> {
        features
            .iter()
            .map(|feature| Self {
                id: feature.id.clone(),
                name: feature.name.clone(),
                path: Arc::from(projection.path(feature)),
            })
            .collect()
    }
}

/// Stroke and opacity of one country shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub stroke: &'static str,
    pub opacity: f64,
    pub stroke_width: f64,
}

impl ShapeStyle {
    pub const DEFAULT: Self = Self {
        stroke: "white",
        opacity: 0.8,
        stroke_width: 0.3,
    };

    /// Style while the pointer is over the shape.
    pub const EMPHASIZED: Self = Self {
        stroke: "white",
        opacity: 1.0,
        stroke_width: 3.0,
    };

    pub fn for_hover(hovered: bool) -> Self {
        if hovered { Self::EMPHASIZED } else { Self::DEFAULT }
    }

    pub fn css(&self, fill: &str) -> String {
        format!(
            "fill: {fill}; stroke: {}; opacity: {}; stroke-width: {};",
            self.stroke, self.opacity, self.stroke_width
        )
    }
}

/// One drawable country for the current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Position of the feature in the geometry document; stable across scenes.
    pub key: usize,
    pub id: Option<String>,
    pub name: String,
    pub path: Arc<str>,
    /// Count on the selected date, 0 without a record.
    pub cases: i64,
    /// Whether a record exists for this feature on the selected date.
    pub has_data: bool,
    pub fill: &'static str,
}

/// Text of the hover tooltip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub country: String,
    pub cases: i64,
}

impl Tooltip {
    pub fn for_shape(shape: &Shape) -> Self {
        Self {
            country: shape.name.clone(),
            cases: shape.cases,
        }
    }
}

/// Everything needed to draw the map for one selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub date: Option<String>,
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn shape(&self, key: usize) -> Option<&Shape> {
        self.shapes.get(key)
    }

    pub fn with_data(&self) -> usize {
        self.shapes.iter().filter(|s| s.has_data).count()
    }
}

/// Per-country counts on one date. A later record for the same id wins.
pub fn counts_on<'a>(records: &'a [CaseRecord], date: &str) -> HashMap<&'a str, i64> {
    records
        .iter()
        .filter(|r| r.date == date)
        .filter_map(|r| r.id.as_deref().map(|id| (id, r.cases)))
        .collect()
}

/// Build the scene for `state` from scratch.
///
/// Features whose id has a record on the selected date are colored through
/// `scale`, even when the count is 0. Everything else gets the no-data fill.
pub fn render(
    state: &SelectionState,
    records: &[CaseRecord],
    features: &[MapFeature],
    scale: &ColorScale,
) -> Scene {
    let counts = state
        .date()
        .map(|date| counts_on(records, date))
        .unwrap_or_default();

    let shapes = features
        .iter()
        .enumerate()
        .map(|(key, feature)| {
            let count = feature
                .id
                .as_deref()
                .and_then(|id| counts.get(id).copied());
            Shape {
                key,
                id: feature.id.clone(),
                name: feature.name.clone(),
                path: Arc::clone(&feature.path),
                cases: count.unwrap_or(0),
                has_data: count.is_some(),
                fill: count.map_or(NO_DATA_FILL, |c| scale.color(c)),
            }
        })
        .collect();

    Scene {
        date: state.date().map(str::to_string),
        shapes,
    }
}
