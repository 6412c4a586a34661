use casemap_shared::{DataSources, MapConfig, MapController, Scene, SelectionEvent};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::legend::Legend;
use crate::loader;
use crate::map::WorldMap;
use crate::playback::PlaybackControls;
use crate::settings::Settings;
use crate::slider::DateSlider;
use crate::tooltip::Tooltip;

/// Newtype wrappers so each signal gets its own context slot.
#[derive(Clone, Copy)]
pub(crate) struct Controller(pub RwSignal<Option<MapController>>);
#[derive(Clone, Copy)]
pub(crate) struct CurrentScene(pub Memo<Scene>);
#[derive(Clone, Copy)]
pub(crate) struct Hovered(pub RwSignal<Option<usize>>);
#[derive(Clone, Copy)]
pub(crate) struct MousePos(pub RwSignal<(f64, f64)>);
#[derive(Clone, Copy)]
pub(crate) struct PlaybackActive(pub RwSignal<bool>);
#[derive(Clone, Copy)]
pub(crate) struct PlaybackInterval(pub RwSignal<u32>);
#[derive(Clone, Copy)]
pub(crate) struct ShowLegend(pub RwSignal<bool>);
#[derive(Clone, Copy)]
pub(crate) struct LoadStatus(pub RwSignal<LoadState>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoadState {
    Loading,
    Ready,
    Failed,
}

impl LoadState {
    /// Map chrome (legend, toggle, status) only appears once data is on
    /// screen; loading and failure leave the container blank.
    pub(crate) fn shows_chrome(self) -> bool {
        self == LoadState::Ready
    }
}

/// Status text for the selected date, or `None` while there is nothing to show.
pub(crate) fn status_text(state: LoadState, scene: &Scene) -> Option<String> {
    if !state.shows_chrome() {
        return None;
    }
    Some(match &scene.date {
        Some(date) => format!("{date}: {} countries reporting", scene.with_data()),
        None => "No dated records.".to_string(),
    })
}

/// Apply one selection event. Subscribers are only notified when the
/// selected date actually moved.
pub(crate) fn dispatch(controller: RwSignal<Option<MapController>>, event: SelectionEvent) -> bool {
    let mut changed = false;
    controller.maybe_update(|slot| {
        changed = slot.as_mut().is_some_and(|c| c.dispatch(event));
        changed
    });
    changed
}

#[component]
pub fn App(sources: DataSources) -> impl IntoView {
    let controller: RwSignal<Option<MapController>> = RwSignal::new(None);
    let hovered: RwSignal<Option<usize>> = RwSignal::new(None);
    let mouse_pos: RwSignal<(f64, f64)> = RwSignal::new((0.0, 0.0));
    let load_state: RwSignal<LoadState> = RwSignal::new(LoadState::Loading);
    let saved = Settings::load();
    let show_legend: RwSignal<bool> = RwSignal::new(saved.show_legend);
    let playback_interval: RwSignal<u32> = RwSignal::new(saved.playback_interval_ms);
    let playing: RwSignal<bool> = RwSignal::new(false);

    let scene = Memo::new(move |_| {
        controller.with(|c| c.as_ref().map(MapController::scene).unwrap_or_default())
    });

    provide_context(Controller(controller));
    provide_context(CurrentScene(scene));
    provide_context(Hovered(hovered));
    provide_context(MousePos(mouse_pos));
    provide_context(PlaybackActive(playing));
    provide_context(PlaybackInterval(playback_interval));
    provide_context(ShowLegend(show_legend));
    provide_context(LoadStatus(load_state));

    Effect::new(move || {
        Settings {
            show_legend: show_legend.get(),
            playback_interval_ms: playback_interval.get(),
        }
        .save();
    });

    // A redraw replaces every shape, so a stale hover key must not survive it.
    Effect::new(move || {
        scene.track();
        if let Some(key) = hovered.get_untracked() {
            let still_drawn = scene.with_untracked(|s| s.shape(key).is_some());
            if !still_drawn {
                hovered.set(None);
            }
        }
    });

    spawn_local(async move {
        match loader::load_datasets(&sources).await {
            Ok(datasets) => {
                controller.set(Some(MapController::new(&datasets, &MapConfig::default())));
                load_state.set(LoadState::Ready);
            }
            Err(e) => {
                tracing::error!(dataset = %e.dataset(), error = %e, "failed to load map data");
                load_state.set(LoadState::Failed);
            }
        }
    });

    view! {
        <div class="casemap" style="position: relative; width: 960px; height: 500px; font-family: sans-serif;">
            <WorldMap />
            <DateSlider />
            <PlaybackControls />
            {move || {
                (load_state.get().shows_chrome() && show_legend.get()).then(|| view! { <Legend /> })
            }}
            {move || load_state.get().shows_chrome().then(|| view! { <LegendToggle /> })}
            <StatusLine />
        </div>
        <Tooltip />
    }
}

#[component]
fn LegendToggle() -> impl IntoView {
    let ShowLegend(show_legend) = expect_context();

    view! {
        <button
            class="legend-toggle"
            style="position: absolute; right: 12px; top: 12px; font-size: 0.75rem; cursor: pointer;"
            on:click=move |_| show_legend.update(|v| *v = !*v)
        >
            {move || if show_legend.get() { "Hide legend" } else { "Show legend" }}
        </button>
    }
}

/// The selected date and how many countries report on it.
#[component]
fn StatusLine() -> impl IntoView {
    let LoadStatus(load_state) = expect_context();
    let CurrentScene(scene) = expect_context();

    view! {
        {move || {
            let text = scene.with(|s| status_text(load_state.get(), s))?;
            Some(view! {
                <div
                    class="status"
                    style="position: absolute; left: 12px; bottom: 8px; font-size: 0.75rem; color: #666;"
                >
                    {text}
                </div>
            })
        }}
    }
}
