pub const MAP_WIDTH: f64 = 960.0;
pub const MAP_HEIGHT: f64 = 500.0;

// Robinson projection, centered slightly east so the antimeridian cut falls in the Pacific.
pub const PROJECTION_SCALE: f64 = 148.0;
pub const PROJECTION_ROTATE_DEG: f64 = 352.0;

pub const SLIDER_HEIGHT: f64 = 400.0;
pub const SLIDER_OFFSET: (f64, f64) = (30.0, 30.0);
/// Only every Nth slider tick carries a date label.
pub const TICK_LABEL_EVERY: usize = 10;

pub const TOOLTIP_OFFSET: (f64, f64) = (0.0, -10.0);

pub const DEFAULT_PLAYBACK_INTERVAL_MS: u32 = 400;
pub const MIN_PLAYBACK_INTERVAL_MS: u32 = 50;
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const DEFAULT_WORLD_URL: &str = "./data/world_countries.json";
pub const DEFAULT_CASES_URL: &str = "./data/map-data.json";
pub const DEFAULT_ISO_URL: &str = "./data/iso3.json";

pub const WORLD_URL_KEY: &str = "world-url";
pub const CASES_URL_KEY: &str = "cases-url";
pub const ISO_URL_KEY: &str = "iso-url";

/// Where the three startup documents are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    pub world: String,
    pub cases: String,
    pub iso: String,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            world: DEFAULT_WORLD_URL.to_string(),
            cases: DEFAULT_CASES_URL.to_string(),
            iso: DEFAULT_ISO_URL.to_string(),
        }
    }
}

impl DataSources {
    /// Replace each default URL with `lookup(key)` when it yields a non-blank value.
    pub fn with_overrides(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let resolve = |key: &str, default: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            world: resolve(WORLD_URL_KEY, DEFAULT_WORLD_URL),
            cases: resolve(CASES_URL_KEY, DEFAULT_CASES_URL),
            iso: resolve(ISO_URL_KEY, DEFAULT_ISO_URL),
        }
    }
}

/// Projection and canvas settings for one map instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
    pub rotate_deg: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
            scale: PROJECTION_SCALE,
            rotate_deg: PROJECTION_ROTATE_DEG,
        }
    }
}

impl MapConfig {
    pub fn translate(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}
