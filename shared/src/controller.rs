use crate::color_scale::ColorScale;
use crate::config::MapConfig;
use crate::dataset::Datasets;
use crate::date_index::DateIndex;
use crate::geometry::features_from_collection;
use crate::join::{CaseRecord, join_records};
use crate::projection::Projection;
use crate::scene::{MapFeature, Scene, render};
use crate::selection::{SelectionEvent, SelectionState};
use crate::slider::SliderDomain;

/// Owns the joined data and the single selection; every redraw goes through here.
#[derive(Debug, Clone, PartialEq)]
pub struct MapController {
    records: Vec<CaseRecord>,
    features: Vec<MapFeature>,
    scale: ColorScale,
    dates: DateIndex,
    selection: SelectionState,
}

impl MapController {
    /// Join, derive the scale and date index, and project geometry. Runs once per load.
    pub fn new(datasets: &Datasets, config: &MapConfig) -> Self {
        let mut records = join_records(&datasets.cases, &datasets.iso);
        let scale = ColorScale::from_records(&records);
        let dates = DateIndex::from_records(&records);
        dates.canonicalize(&mut records);
        let projection = Projection::new(config);
        let features = MapFeature::project(&features_from_collection(&datasets.world), &projection);
        let selection = SelectionState::initial(&dates);

        tracing::info!(
            features = features.len(),
            dates = dates.len(),
            min = scale.min(),
            max = scale.max(),
            "map data ready"
        );

        Self {
            records,
            features,
            scale,
            dates,
            selection,
        }
    }

    pub fn scale(&self) -> &ColorScale {
        &self.scale
    }

    pub fn dates(&self) -> &DateIndex {
        &self.dates
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn slider_domain(&self) -> Option<SliderDomain> {
        SliderDomain::for_dates(&self.dates)
    }

    /// Apply one selection event. Returns whether the selected date changed.
    pub fn dispatch(&mut self, event: SelectionEvent) -> bool {
        let changed = self.selection.apply(event, &self.dates);
        if changed {
            tracing::debug!(
                index = self.selection.index(),
                date = self.selection.date().unwrap_or_default(),
                "selection changed"
            );
        }
        changed
    }

    pub fn at_end(&self) -> bool {
        self.selection.at_end(&self.dates)
    }

    /// Full scene for the current selection.
    pub fn scene(&self) -> Scene {
        render(&self.selection, &self.records, &self.features, &self.scale)
    }
}
