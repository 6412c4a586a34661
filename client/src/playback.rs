use std::cell::RefCell;

use casemap_shared::{MapController, SelectionEvent};
use gloo_timers::callback::Interval;
use leptos::prelude::*;

use crate::app::{Controller, PlaybackActive, PlaybackInterval, dispatch};

const SPEED_OPTIONS_MS: [u32; 4] = [200, 400, 800, 1600];

thread_local! {
    static PLAYBACK_INTERVAL: RefCell<Option<Interval>> = const { RefCell::new(None) };
}

fn stop_interval() {
    PLAYBACK_INTERVAL.with(|slot| {
        if let Some(interval) = slot.borrow_mut().take() {
            interval.cancel();
        }
    });
}

fn at_end(controller: RwSignal<Option<MapController>>) -> bool {
    controller.with_untracked(|c| c.as_ref().is_none_or(MapController::at_end))
}

/// Advance one date per tick while `playing` is set; clears `playing` at the last date.
fn run_playback(controller: RwSignal<Option<MapController>>, playing: RwSignal<bool>, interval_ms: RwSignal<u32>) {
    Effect::new(move || {
        let active = playing.get();
        let ms = interval_ms.get();
        stop_interval();
        if !active {
            return;
        }
        tracing::debug!(interval_ms = ms, "playback started");
        let interval = Interval::new(ms, move || {
            if at_end(controller) || !dispatch(controller, SelectionEvent::Next) || at_end(controller) {
                tracing::debug!("playback reached the last date");
                playing.set(false);
            }
        });
        PLAYBACK_INTERVAL.with(|slot| *slot.borrow_mut() = Some(interval));
    });
    on_cleanup(stop_interval);
}

#[component]
pub fn PlaybackControls() -> impl IntoView {
    let Controller(controller) = expect_context();
    let PlaybackActive(playing) = expect_context();
    let PlaybackInterval(interval_ms) = expect_context();

    run_playback(controller, playing, interval_ms);

    let has_dates = Memo::new(move |_| controller.with(|c| c.as_ref().is_some_and(|c| !c.dates().is_empty())));

    let toggle = move |_: web_sys::MouseEvent| {
        if playing.get_untracked() {
            playing.set(false);
            return;
        }
        if at_end(controller) {
            dispatch(controller, SelectionEvent::First);
        }
        playing.set(true);
    };
    let step = move |event: SelectionEvent| {
        move |_: web_sys::MouseEvent| {
            playing.set(false);
            dispatch(controller, event);
        }
    };
    let on_speed = move |e: web_sys::Event| {
        if let Ok(ms) = event_target_value(&e).parse::<u32>() {
            interval_ms.set(ms);
        }
    };

    let button_style = "min-width: 28px; height: 24px; margin-right: 4px; cursor: pointer; font-size: 0.75rem;";

    view! {
        <div
            class="playback"
            style:display=move || if has_dates.get() { "flex" } else { "none" }
            style="position: absolute; left: 30px; top: 440px; align-items: center;"
        >
            <button title="Previous date" style=button_style on:click=step(SelectionEvent::Previous)>
                "\u{25C0}"
            </button>
            <button
                title=move || if playing.get() { "Pause" } else { "Play" }
                style=button_style
                on:click=toggle
            >
                {move || if playing.get() { "\u{275A}\u{275A}" } else { "\u{25B6}" }}
            </button>
            <button title="Next date" style=button_style on:click=step(SelectionEvent::Next)>
                "\u{25B6}\u{25B6}"
            </button>
            <select style="font-size: 0.75rem;" on:change=on_speed>
                {SPEED_OPTIONS_MS
                    .iter()
                    .map(|ms| {
                        let ms = *ms;
                        view! {
                            <option value=ms.to_string() selected=move || interval_ms.get() == ms>
                                {format!("{ms} ms")}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}
