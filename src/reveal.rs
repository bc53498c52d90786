use log::{debug, warn};
use web_sys::{Document, Element, Window};

use crate::config::SiteConfig;
use crate::dom::{self, IntersectionWatcher, ViewportTrigger};
use crate::error::Result;

pub const PENDING_CLASS: &str = "animate-on-scroll";
pub const ANIMATED_CLASS: &str = "animated";

pub fn reveal_trigger(config: &SiteConfig) -> ViewportTrigger {
    ViewportTrigger {
        threshold: config.reveal_threshold,
        root_margin: config.reveal_root_margin.clone(),
    }
}

/// Tags every content card as pending and reveals it the first time it
/// scrolls into view. Returns `None` when there is nothing to watch.
pub fn install(window: &Window, document: &Document, config: &SiteConfig) -> Result<Option<IntersectionWatcher>> {
    let cards = dom::select_all(document, &config.reveal_selector())?;
    if cards.is_empty() {
        return Ok(None);
    }

    if !dom::supports_intersection_observer(window) {
        warn!("IntersectionObserver unavailable, revealing {} cards immediately", cards.len());
        cards.iter().for_each(mark_animated);
        return Ok(None);
    }

    // Cards are only tagged once a watcher exists to reveal them.
    let watcher = IntersectionWatcher::new(Some(&reveal_trigger(config)), mark_animated)?;
    for card in &cards {
        let _ = card.class_list().add_1(PENDING_CLASS);
        watcher.observe(card);
    }
    debug!("Watching {} cards for scroll reveal", cards.len());
    Ok(Some(watcher))
}

pub fn mark_animated(element: &Element) {
    let _ = element.class_list().add_1(ANIMATED_CLASS);
}
