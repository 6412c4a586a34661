use casemap_shared::{LegendEntry, NO_DATA_FILL};
use leptos::prelude::*;

use crate::app::Controller;

fn entry_label(entry: &LegendEntry) -> String {
    format!("\u{2265} {}", entry.lower_bound.round() as i64)
}

#[component]
pub fn Legend() -> impl IntoView {
    let Controller(controller) = expect_context();
    let entries = Memo::new(move |_| {
        controller.with(|c| c.as_ref().map(|c| c.scale().legend()).unwrap_or_default())
    });

    let swatch = |color: &'static str, text: String| {
        view! {
            <div style="display: flex; align-items: center; gap: 6px; line-height: 1.4;">
                <span style=format!(
                    "display: inline-block; width: 14px; height: 10px; background: {color}; border: 1px solid #ccc;"
                ) />
                <span>{text}</span>
            </div>
        }
    };

    view! {
        <div
            class="legend"
            style="position: absolute; right: 12px; bottom: 28px; background: rgba(255,255,255,0.85); padding: 6px 8px; border-radius: 4px; font-size: 0.7rem; color: #333;"
        >
            {move || {
                entries
                    .get()
                    .iter()
                    .map(|entry| swatch(entry.color, entry_label(entry)))
                    .collect_view()
            }}
            {swatch(NO_DATA_FILL, "No data".to_string())}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use casemap_shared::ColorScale;

    use super::entry_label;

    #[test]
    fn labels_show_rounded_lower_bounds() {
        let legend = ColorScale::new(0, 90).legend();
        assert_eq!(entry_label(&legend[0]), "\u{2265} 0");
        assert_eq!(entry_label(&legend[1]), "\u{2265} 10");
        assert_eq!(entry_label(&legend[9]), "\u{2265} 90");
    }
}
