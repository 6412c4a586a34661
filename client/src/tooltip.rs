use casemap_shared::config::TOOLTIP_OFFSET;
use leptos::prelude::*;

use crate::app::{CurrentScene, Hovered, MousePos};

fn country_line(country: &str) -> String {
    format!("Country: {country}")
}

fn cases_line(cases: i64) -> String {
    format!("Confirmed cases: {cases}")
}

/// Tooltip that follows the cursor while a country is hovered.
#[component]
pub fn Tooltip() -> impl IntoView {
    let Hovered(hovered) = expect_context();
    let MousePos(mouse_pos) = expect_context();
    let CurrentScene(scene) = expect_context();

    let info = Memo::new(move |_| {
        let key = hovered.get()?;
        scene.with(|s| s.shape(key).map(casemap_shared::Tooltip::for_shape))
    });

    view! {
        {move || {
            let Some(info) = info.get() else {
                return view! { <div style="display:none;" /> }.into_any();
            };
            let (x, y) = mouse_pos.get();
            let (dx, dy) = TOOLTIP_OFFSET;
            view! {
                <div
                    class="tooltip"
                    style:left=format!("{}px", x + dx)
                    style:top=format!("{}px", y + dy)
                    style="position: fixed; pointer-events: none; z-index: 100; transform: translate(-50%, -100%); background: rgba(255,255,255,0.95); border: 1px solid #ccc; border-radius: 4px; padding: 6px 8px; font-size: 0.8rem; color: #222;"
                >
                    <div>{country_line(&info.country)}</div>
                    <div>{cases_line(info.cases)}</div>
                </div>
            }
            .into_any()
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::{cases_line, country_line};

    #[test]
    fn tooltip_lines_name_country_and_count() {
        assert_eq!(country_line("Beta"), "Country: Beta");
        assert_eq!(cases_line(0), "Confirmed cases: 0");
        assert_eq!(cases_line(1234), "Confirmed cases: 1234");
    }
}
