pub mod color_scale;
pub mod config;
pub mod controller;
pub mod dataset;
pub mod date_index;
pub mod error;
pub mod geometry;
pub mod join;
pub mod projection;
pub mod scene;
pub mod selection;
pub mod slider;

pub use color_scale::{ColorScale, LegendEntry, NO_DATA_FILL, PALETTE};
pub use config::{DataSources, MapConfig};
pub use controller::MapController;
pub use dataset::Datasets;
pub use date_index::DateIndex;
pub use error::{DatasetKind, LoadError};
pub use join::{CaseRecord, parse_case_count};
pub use scene::{Scene, Shape, ShapeStyle, Tooltip};
pub use selection::{SelectionEvent, SelectionState};
