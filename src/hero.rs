use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use crate::config::SiteConfig;
use crate::dom::{self, EventListener};
use crate::error::Result;

pub const LOADED_CLASS: &str = "loaded";

/// Runs the hero entrance once every subresource has loaded. If the page
/// already finished loading the animation starts right away.
pub fn install(window: &Window, document: &Document, config: &SiteConfig) -> Result<Option<EventListener>> {
    if document.ready_state() == "complete" {
        start_hero_animation(document, &config.hero_selector());
        return Ok(None);
    }

    let document = document.clone();
    let selector = config.hero_selector();
    let listener = EventListener::new(window, "load", move |_| start_hero_animation(&document, &selector))?;
    Ok(Some(listener))
}

pub fn start_hero_animation(document: &Document, hero_selector: &str) {
    if let Some(body) = document.body() {
        let _ = body.class_list().add_1(LOADED_CLASS);
    }

    for element in dom::select_all(document, hero_selector).unwrap_or_default() {
        if let Some(element) = element.dyn_ref::<HtmlElement>() {
            let _ = element.style().set_property("animation-play-state", "running");
        }
    }
}
