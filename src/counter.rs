use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

use crate::config::SiteConfig;
use crate::dom::{self, IntersectionWatcher};
use crate::error::Result;
use crate::reveal;

/// Assumed frame interval; ~60fps.
pub const FRAME_MS: f64 = 16.0;

const TARGET_ATTRIBUTE: &str = "data-count-to";
const DURATION_ATTRIBUTE: &str = "data-count-duration";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CounterFrame {
    Show(i64),
    Finished(f64),
}

impl CounterFrame {
    pub fn text(&self) -> String {
        match self {
            CounterFrame::Show(value) => value.to_string(),
            CounterFrame::Finished(target) => target.to_string(),
        }
    }
}

/// Counts from zero to `target` in equal per-frame steps.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterRun {
    value: f64,
    target: f64,
    increment: f64,
}

impl CounterRun {
    pub fn new(target: f64, duration_ms: u32) -> Self {
        Self {
            value: 0.0,
            target,
            increment: target / (duration_ms as f64 / FRAME_MS),
        }
    }

    pub fn next_frame(&mut self) -> CounterFrame {
        self.value += self.increment;
        if self.value < self.target {
            CounterFrame::Show(self.value.floor() as i64)
        } else {
            CounterFrame::Finished(self.target)
        }
    }
}

/// Animates `element`'s text from 0 to `target`. Runs are independent: a
/// second run on the same element does not stop the first.
pub fn animate_counter(window: &Window, element: &Element, target: f64, duration_ms: u32) {
    let mut run = CounterRun::new(target, duration_ms);
    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let scheduled = Rc::clone(&frame);
    let element = element.clone();
    let window_for_frames = window.clone();

    *scheduled.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
        let step = run.next_frame();
        element.set_text_content(Some(&step.text()));
        match step {
            CounterFrame::Show(_) => {
                if let Some(next) = frame.borrow().as_ref() {
                    let _ = window_for_frames.request_animation_frame(next.as_ref().unchecked_ref());
                }
            }
            CounterFrame::Finished(_) => {
                let _ = frame.borrow_mut().take();
            }
        }
    }));

    // First frame runs synchronously.
    let first = scheduled
        .borrow()
        .as_ref()
        .map(|callback| callback.as_ref().unchecked_ref::<web_sys::js_sys::Function>().clone());
    if let Some(first) = first {
        let _ = first.call0(&wasm_bindgen::JsValue::NULL);
    }
}

fn counter_settings(element: &Element, default_duration_ms: u32) -> Option<(f64, u32)> {
    let target = element.get_attribute(TARGET_ATTRIBUTE)?.trim().parse::<f64>().ok()?;
    let duration = element
        .get_attribute(DURATION_ATTRIBUTE)
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .unwrap_or(default_duration_ms);
    Some((target, duration))
}

/// Starts each `data-count-to` counter the first time it scrolls into view.
pub fn install(window: &Window, document: &Document, config: &SiteConfig) -> Result<Option<IntersectionWatcher>> {
    let counters = dom::select_all(document, &config.counter_selector)?;
    if counters.is_empty() {
        return Ok(None);
    }

    let default_duration = config.counter_duration_ms;
    let start = {
        let window = window.clone();
        move |element: &Element| {
            if let Some((target, duration)) = counter_settings(element, default_duration) {
                animate_counter(&window, element, target, duration);
            }
        }
    };

    if !dom::supports_intersection_observer(window) {
        counters.iter().for_each(start);
        return Ok(None);
    }

    let watcher = IntersectionWatcher::new(Some(&reveal::reveal_trigger(config)), start)?;
    for counter in &counters {
        watcher.observe(counter);
    }
    debug!("Watching {} counters", counters.len());
    Ok(Some(watcher))
}
