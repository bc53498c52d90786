//! Interactive behaviors for the Forme marketing site: scroll reveals,
//! smooth in-page navigation, the mobile menu, CTA handling, lazy images,
//! form validation and the dark-mode toggle.

pub mod app;
pub mod config;
pub mod controller;
pub mod counter;
pub mod cta;
pub mod debounce;
pub mod dom;
pub mod error;
pub mod forms;
pub mod hero;
pub mod lazy_images;
pub mod navigation;
pub mod progress;
pub mod reveal;
pub mod styles;
pub mod theme;

use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};

pub use controller::{Capabilities, PageController};
pub use error::SiteError;

fn page_config() -> config::SiteConfig {
    dom::window()
        .and_then(|window| dom::document(&window))
        .map(|document| config::SiteConfig::load(&document))
        .unwrap_or_default()
}

/// `onclick="showContactPopup(event)"` entry point for static markup.
#[wasm_bindgen(js_name = showContactPopup)]
pub fn show_contact_popup(event: Option<Event>) {
    let config = page_config();
    cta::show_contact_popup(event.as_ref(), &config.contact_popup_message, &cta::BrowserDialogs);
}

#[wasm_bindgen(js_name = validateForm)]
pub fn validate_form(form: &Element) -> bool {
    forms::validate_form(form)
}

#[wasm_bindgen(js_name = animateCounter)]
pub fn animate_counter(element: &Element, target: f64, duration_ms: Option<u32>) {
    if let Ok(window) = dom::window() {
        let duration_ms = duration_ms.unwrap_or_else(|| page_config().counter_duration_ms);
        counter::animate_counter(&window, element, target, duration_ms);
    }
}
