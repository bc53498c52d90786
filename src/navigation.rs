use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::config::SiteConfig;
use crate::dom::{self, EventListener, ScrollMetrics};
use crate::error::Result;

pub const MENU_OPEN_CLASS: &str = "mobile-menu-open";
pub const HEADER_SCROLLED_CLASS: &str = "scrolled";
pub const MENU_CLOSED_GLYPH: &str = "☰";
pub const MENU_OPEN_GLYPH: &str = "✕";

/// Element id named by an in-page link, if it names one at all.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Where to scroll so the target clears the fixed header plus a visual gap.
pub fn scroll_destination(target_offset_top: f64, header_height: f64, gap: f64) -> f64 {
    target_offset_top - header_height - gap
}

pub fn menu_glyph(open: bool) -> &'static str {
    if open {
        MENU_OPEN_GLYPH
    } else {
        MENU_CLOSED_GLYPH
    }
}

pub fn header_is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub fn install_smooth_scroll(window: &Window, document: &Document, config: &SiteConfig) -> Result<Vec<EventListener>> {
    let links = dom::select_all(document, &config.anchor_selector)?;
    let mut listeners = Vec::with_capacity(links.len());

    for link in links {
        let window = window.clone();
        let document = document.clone();
        let header_selector = config.header_selector.clone();
        let gap = config.anchor_gap_px;
        let href_source = link.clone();

        listeners.push(EventListener::new(&link, "click", move |event: Event| {
            event.prevent_default();
            let href = href_source.get_attribute("href").unwrap_or_default();
            scroll_to_fragment(&window, &document, &href, &header_selector, gap);
        })?);
    }

    debug!("Smooth scroll bound to {} links", listeners.len());
    Ok(listeners)
}

/// Scrolls smoothly to the element named by `href`. Unknown or empty
/// fragments are ignored.
pub fn scroll_to_fragment(window: &Window, document: &Document, href: &str, header_selector: &str, gap: f64) {
    let target = match fragment_id(href)
        .and_then(|id| document.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        Some(target) => target,
        None => return,
    };

    let header_height = document
        .query_selector(header_selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|header| header.offset_height() as f64)
        .unwrap_or(0.0);

    let options = ScrollToOptions::new();
    options.set_top(scroll_destination(target.offset_top() as f64, header_height, gap));
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

/// Wires the burger toggle and the close-on-navigate links. Absent either
/// element the menu simply stays as the markup renders it.
pub fn install_mobile_menu(document: &Document, config: &SiteConfig) -> Result<Vec<EventListener>> {
    let toggle = dom::select_one(document, &config.menu_toggle_selector)?;
    let menu = dom::select_one(document, &config.menu_selector)?;
    let (toggle, menu) = match (toggle, menu) {
        (Some(toggle), Some(menu)) => (toggle, menu),
        _ => return Ok(Vec::new()),
    };

    let mut listeners = Vec::new();
    {
        let menu = menu.clone();
        let glyph_target = toggle.clone();
        listeners.push(EventListener::new(&toggle, "click", move |_| {
            let open = menu.class_list().toggle(MENU_OPEN_CLASS).unwrap_or(false);
            glyph_target.set_text_content(Some(menu_glyph(open)));
        })?);
    }

    for link in dom::select_all_in(&menu, "a")? {
        let menu = menu.clone();
        let toggle = toggle.clone();
        listeners.push(EventListener::new(&link, "click", move |_| close_menu(&menu, &toggle))?);
    }

    Ok(listeners)
}

pub fn close_menu(menu: &Element, toggle: &Element) {
    let _ = menu.class_list().remove_1(MENU_OPEN_CLASS);
    toggle.set_text_content(Some(MENU_CLOSED_GLYPH));
}

pub fn install_header_state(window: &Window, document: &Document, config: &SiteConfig) -> Result<Option<EventListener>> {
    let header = match dom::select_one(document, &config.header_selector)? {
        Some(header) => header,
        None => return Ok(None),
    };

    let threshold = config.header_scrolled_threshold;
    let scroll_source = window.clone();
    let apply = move || {
        if let Some(metrics) = ScrollMetrics::read(&scroll_source) {
            apply_header_state(&header, metrics.scroll_y, threshold);
        }
    };
    apply();

    Ok(Some(EventListener::new(window, "scroll", move |_| apply())?))
}

pub fn apply_header_state(header: &Element, scroll_y: f64, threshold: f64) {
    let classes = header.class_list();
    let _ = if header_is_scrolled(scroll_y, threshold) {
        classes.add_1(HEADER_SCROLLED_CLASS)
    } else {
        classes.remove_1(HEADER_SCROLLED_CLASS)
    };
}
