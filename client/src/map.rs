use casemap_shared::ShapeStyle;
use casemap_shared::config::{MAP_HEIGHT, MAP_WIDTH};
use leptos::prelude::*;

use crate::app::{CurrentScene, Hovered, MousePos};

/// The choropleth itself: one `<path>` per country inside a single
/// `countries` group, rebuilt whenever the scene changes.
#[component]
pub fn WorldMap() -> impl IntoView {
    let CurrentScene(scene) = expect_context();
    let Hovered(hovered) = expect_context();
    let MousePos(mouse_pos) = expect_context();

    let track_mouse = move |e: web_sys::MouseEvent| {
        mouse_pos.set((e.client_x() as f64, e.client_y() as f64));
    };

    view! {
        <svg
            class="map"
            width=MAP_WIDTH
            height=MAP_HEIGHT
            viewBox=format!("0 0 {MAP_WIDTH} {MAP_HEIGHT}")
        >
            <g class="map">
                <g class="countries">
                    {move || {
                        scene.with(|s| {
                            s.shapes
                                .iter()
                                .map(|shape| {
                                    let key = shape.key;
                                    let fill = shape.fill;
                                    let style = move || {
                                        ShapeStyle::for_hover(hovered.get() == Some(key)).css(fill)
                                    };
                                    view! {
                                        <path
                                            class="country"
                                            d=shape.path.to_string()
                                            style=style
                                            on:mouseenter=move |e| {
                                                hovered.set(Some(key));
                                                track_mouse(e);
                                            }
                                            on:mousemove=track_mouse
                                            on:mouseleave=move |_| {
                                                if hovered.get_untracked() == Some(key) {
                                                    hovered.set(None);
                                                }
                                            }
                                        />
                                    }
                                })
                                .collect_view()
                        })
                    }}
                </g>
            </g>
        </svg>
    }
}
