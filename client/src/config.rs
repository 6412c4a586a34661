use casemap_shared::DataSources;
use casemap_shared::config::DEFAULT_LOG_LEVEL;

pub const MOUNT_ID: &str = "app";
const LOG_LEVEL_KEY: &str = "log-level";

/// Reads `data-*` attributes from the mount element, the page's only
/// configuration surface.
pub struct MountConfig {
    element: Option<web_sys::Element>,
}

impl MountConfig {
    pub fn from_document() -> Self {
        let element = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(MOUNT_ID));
        Self { element }
    }

    fn attribute(&self, key: &str) -> Option<String> {
        self.element
            .as_ref()
            .and_then(|el| el.get_attribute(&data_attribute(key)))
    }

    pub fn data_sources(&self) -> DataSources {
        DataSources::with_overrides(|key| self.attribute(key))
    }

    pub fn log_level(&self) -> String {
        log_level_or_default(self.attribute(LOG_LEVEL_KEY))
    }
}

fn data_attribute(key: &str) -> String {
    format!("data-{key}")
}

fn log_level_or_default(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| matches!(v.as_str(), "error" | "warn" | "info" | "debug" | "trace"))
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

#[cfg(test)]
mod tests {
    use super::{data_attribute, log_level_or_default};

    #[test]
    fn attribute_names_are_data_prefixed() {
        assert_eq!(data_attribute("world-url"), "data-world-url");
    }

    #[test]
    fn log_level_accepts_known_levels_only() {
        assert_eq!(log_level_or_default(Some(" DEBUG ".to_string())), "debug");
        assert_eq!(log_level_or_default(Some("loud".to_string())), "info");
        assert_eq!(log_level_or_default(None), "info");
    }
}
