//! Thin helpers over `web-sys` shared by every behavior: element lookup,
//! self-removing event listeners and fire-once viewport watchers.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Reflect};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, NodeList, Window,
};

use crate::error::{Result, SiteError};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(SiteError::NoWindow)
}

pub fn document(window: &Window) -> Result<Document> {
    window.document().ok_or(SiteError::NoDocument)
}

pub fn body(document: &Document) -> Result<HtmlElement> {
    document.body().ok_or(SiteError::NoBody)
}

pub fn select_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    Ok(elements(document.query_selector_all(selector)?))
}

pub fn select_all_in(root: &Element, selector: &str) -> Result<Vec<Element>> {
    Ok(elements(root.query_selector_all(selector)?))
}

pub fn select_one(document: &Document, selector: &str) -> Result<Option<Element>> {
    Ok(document.query_selector(selector)?)
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn supports_intersection_observer(window: &Window) -> bool {
    Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

/// Scroll position and extents of the page at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub document_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    pub fn read(window: &Window) -> Option<Self> {
        let scroll_y = window.scroll_y().ok()?;
        let viewport_height = window.inner_height().ok()?.as_f64()?;
        let document_height = window.document()?.body()?.offset_height() as f64;
        Some(Self {
            scroll_y,
            document_height,
            viewport_height,
        })
    }
}

/// Event listener that unregisters itself when dropped.
pub struct EventListener {
    target: EventTarget,
    event_type: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new<F>(target: &EventTarget, event_type: &'static str, handler: F) -> Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event_type,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event_type, self.callback.as_ref().unchecked_ref());
    }
}

/// Visibility trigger for an [`IntersectionWatcher`].
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportTrigger {
    pub threshold: f64,
    pub root_margin: String,
}

/// Viewport watcher that reports each element once, on its first
/// intersection, and then stops observing it.
pub struct IntersectionWatcher {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl IntersectionWatcher {
    pub fn new<F>(trigger: Option<&ViewportTrigger>, mut on_enter: F) -> Result<Self>
    where
        F: FnMut(&Element) + 'static,
    {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    observer.unobserve(&target);
                    on_enter(&target);
                }
            },
        );

        let observer = match trigger {
            Some(trigger) => {
                let init = IntersectionObserverInit::new();
                init.set_threshold(&JsValue::from_f64(trigger.threshold));
                init.set_root_margin(&trigger.root_margin);
                IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?
            }
            None => IntersectionObserver::new(callback.as_ref().unchecked_ref())?,
        };

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }
}

impl Drop for IntersectionWatcher {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
