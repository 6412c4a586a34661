use casemap_shared::SelectionEvent;
use casemap_shared::config::{SLIDER_HEIGHT, SLIDER_OFFSET};
use casemap_shared::slider::{SliderDomain, display_label, tick_label};
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::app::{Controller, PlaybackActive, dispatch};

/// Vertical offset of `index` along the track, measured from the top.
/// The first date sits at the bottom.
fn tick_offset(domain: SliderDomain, index: usize) -> f64 {
    let span = domain.max.saturating_sub(domain.min);
    if span == 0 {
        return SLIDER_HEIGHT;
    }
    let frac = index.saturating_sub(domain.min) as f64 / span as f64;
    SLIDER_HEIGHT * (1.0 - frac)
}

/// Vertical date slider: one step per distinct date, labeled every tenth tick.
#[component]
pub fn DateSlider() -> impl IntoView {
    let Controller(controller) = expect_context();
    let PlaybackActive(playing) = expect_context();

    let domain = Memo::new(move |_| controller.with(|c| c.as_ref().and_then(|c| c.slider_domain())));
    let index = Memo::new(move |_| {
        controller.with(|c| c.as_ref().map(|c| c.selection().index()).unwrap_or(0))
    });
    let label = Memo::new(move |_| {
        controller.with(|c| {
            c.as_ref()
                .map(|c| display_label(c.dates(), c.selection().index()).to_string())
                .unwrap_or_default()
        })
    });
    let ticks = Memo::new(move |_| {
        controller.with(|c| {
            let Some(c) = c.as_ref() else {
                return Vec::new();
            };
            let Some(domain) = c.slider_domain() else {
                return Vec::new();
            };
            domain
                .ticks()
                .filter_map(|i| tick_label(c.dates(), i).map(|l| (tick_offset(domain, i), l.to_string())))
                .collect::<Vec<_>>()
        })
    });

    let on_input = move |e: web_sys::Event| {
        let Some(target) = e.target() else {
            return;
        };
        let Ok(input) = target.dyn_into::<web_sys::HtmlInputElement>() else {
            return;
        };
        let Ok(value) = input.value().parse::<usize>() else {
            return;
        };
        playing.set(false);
        dispatch(controller, SelectionEvent::Select(value));
    };

    let (left, top) = SLIDER_OFFSET;

    view! {
        {move || {
            let Some(d) = domain.get() else {
                return view! { <div style="display:none;" /> }.into_any();
            };
            view! {
                <div
                    class="slider"
                    style:left=format!("{left}px")
                    style:top=format!("{top}px")
                    style:height=format!("{SLIDER_HEIGHT}px")
                    style="position: absolute; width: 140px; font-size: 0.7rem; color: #444;"
                >
                    <input
                        type="range"
                        min=d.min
                        max=d.max
                        step="1"
                        prop:value=move || index.get().to_string()
                        on:input=on_input
                        style:height=format!("{SLIDER_HEIGHT}px")
                        style="writing-mode: vertical-lr; direction: rtl; width: 20px; margin: 0; cursor: pointer;"
                    />
                    {move || {
                        ticks
                            .get()
                            .into_iter()
                            .map(|(y, text)| {
                                view! {
                                    <span
                                        class="tick"
                                        style:top=format!("{y}px")
                                        style="position: absolute; left: 26px; transform: translateY(-50%); white-space: nowrap;"
                                    >
                                        {text}
                                    </span>
                                }
                            })
                            .collect_view()
                    }}
                    <span
                        class="handle-label"
                        style:top=move || format!("{}px", tick_offset(d, index.get()))
                        style="position: absolute; left: 96px; transform: translateY(-50%); font-weight: 700; white-space: nowrap;"
                    >
                        {move || label.get()}
                    </span>
                </div>
            }
            .into_any()
        }}
    }
}
