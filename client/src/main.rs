mod app;
mod config;
mod legend;
mod loader;
mod logging;
mod map;
mod playback;
mod settings;
mod slider;
mod tooltip;

use leptos::mount::mount_to;
use leptos::prelude::*;
use std::any::Any;
use std::cell::RefCell;
use wasm_bindgen::JsCast;

use crate::config::{MOUNT_ID, MountConfig};

thread_local! {
    static APP_MOUNT_HANDLE: RefCell<Option<Box<dyn Any>>> = RefCell::new(None);
}

fn main() {
    console_error_panic_hook::set_once();
    let mount_config = MountConfig::from_document();
    logging::init(&mount_config.log_level());

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let mount_target = document
        .get_element_by_id(MOUNT_ID)
        .and_then(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .or_else(|| document.body());
    let Some(target) = mount_target else {
        tracing::error!("no element to mount the map into");
        return;
    };

    let sources = mount_config.data_sources();
    APP_MOUNT_HANDLE.with(move |slot| {
        // Drop a previous mount so its effects and playback timer stop.
        let _old = slot.borrow_mut().take();
        let handle = mount_to(target, move || view! { <app::App sources=sources.clone() /> });
        *slot.borrow_mut() = Some(Box::new(handle));
    });
}
