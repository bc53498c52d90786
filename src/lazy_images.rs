use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlImageElement, Window};

use crate::config::SiteConfig;
use crate::dom::{self, IntersectionWatcher};
use crate::error::Result;

pub const LAZY_CLASS: &str = "lazy";
const DEFERRED_SRC: &str = "data-src";

/// Swaps in `data-src` the first time each image reaches the viewport.
/// Browsers without IntersectionObserver keep their placeholders.
pub fn install(window: &Window, document: &Document, config: &SiteConfig) -> Result<Option<IntersectionWatcher>> {
    if !dom::supports_intersection_observer(window) {
        warn!("IntersectionObserver unavailable, lazy images stay deferred");
        return Ok(None);
    }

    let images = dom::select_all(document, &config.lazy_image_selector)?;
    if images.is_empty() {
        return Ok(None);
    }

    let watcher = IntersectionWatcher::new(None, load_image)?;
    for image in &images {
        watcher.observe(image);
    }
    debug!("Deferring {} images", images.len());
    Ok(Some(watcher))
}

pub fn load_image(element: &Element) {
    if let Some(src) = element.get_attribute(DEFERRED_SRC) {
        match element.dyn_ref::<HtmlImageElement>() {
            Some(image) => image.set_src(&src),
            None => {
                let _ = element.set_attribute("src", &src);
            }
        }
    }
    let _ = element.class_list().remove_1(LAZY_CLASS);
}
