//! Call-to-action buttons, the consultation confirmation flow and the
//! hero-section contact popup.

use std::rc::Rc;

use log::{debug, info, warn};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Function, Reflect};
use web_sys::{Document, Event};

use crate::config::SiteConfig;
use crate::dom::{self, EventListener};
use crate::error::Result;

pub const CONSULTATION_ACTION: &str = "consultation_request";

/// Parameters attached to an analytics event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementEvent {
    pub event_category: String,
    pub event_label: String,
}

impl EngagementEvent {
    pub fn free_consultation() -> Self {
        Self {
            event_category: "engagement".to_string(),
            event_label: "free_consultation".to_string(),
        }
    }
}

pub trait Analytics {
    fn track(&self, action: &str, event: &EngagementEvent);
}

pub struct NoopAnalytics;

impl Analytics for NoopAnalytics {
    fn track(&self, _action: &str, _event: &EngagementEvent) {}
}

/// Forwards events to a gtag-style global function, looked up on every call
/// so a tag manager that loads late is still picked up.
pub struct GlobalAnalytics {
    function_name: String,
}

impl GlobalAnalytics {
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
        }
    }

    fn resolve(&self) -> Option<Function> {
        let window = web_sys::window()?;
        Reflect::get(&window, &JsValue::from_str(&self.function_name))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }
}

impl Analytics for GlobalAnalytics {
    fn track(&self, action: &str, event: &EngagementEvent) {
        let function = match self.resolve() {
            Some(function) => function,
            None => return,
        };
        let params = match serde_wasm_bindgen::to_value(event) {
            Ok(params) => params,
            Err(e) => {
                warn!("Could not encode analytics event: {}", e);
                return;
            }
        };
        if let Err(e) = function.call3(&JsValue::NULL, &JsValue::from_str("event"), &JsValue::from_str(action), &params) {
            warn!("{} rejected event {}: {:?}", self.function_name, action, e);
        }
    }
}

/// Blocking browser dialogs.
pub trait Dialogs {
    fn confirm(&self, message: &str) -> bool;
    fn alert(&self, message: &str);
}

pub struct BrowserDialogs;

impl Dialogs for BrowserDialogs {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtaAction {
    /// The button carries its own inline handler.
    Defer,
    Consultation,
    Ignore,
}

pub fn classify_cta(has_inline_handler: bool, label: &str, keyword: &str) -> CtaAction {
    if has_inline_handler {
        CtaAction::Defer
    } else if !keyword.is_empty() && label.contains(keyword) {
        CtaAction::Consultation
    } else {
        CtaAction::Ignore
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsultationOutcome {
    Declined,
    Requested,
}

pub fn request_consultation(config: &SiteConfig, dialogs: &dyn Dialogs, analytics: &dyn Analytics) -> ConsultationOutcome {
    if !dialogs.confirm(&config.consultation_prompt) {
        return ConsultationOutcome::Declined;
    }

    dialogs.alert(&config.consultation_thanks);
    analytics.track(CONSULTATION_ACTION, &EngagementEvent::free_consultation());
    info!("Consultation requested");
    ConsultationOutcome::Requested
}

pub fn install_cta_buttons(
    document: &Document,
    config: &Rc<SiteConfig>,
    dialogs: &Rc<dyn Dialogs>,
    analytics: &Rc<dyn Analytics>,
) -> Result<Vec<EventListener>> {
    let buttons = dom::select_all(document, &config.cta_selector())?;
    let mut listeners = Vec::with_capacity(buttons.len());

    for button in buttons {
        let config = Rc::clone(config);
        let dialogs = Rc::clone(dialogs);
        let analytics = Rc::clone(analytics);
        let source = button.clone();

        listeners.push(EventListener::new(&button, "click", move |event: Event| {
            let label = source.text_content().unwrap_or_default();
            match classify_cta(source.has_attribute("onclick"), &label, &config.consultation_keyword) {
                CtaAction::Consultation => {
                    event.prevent_default();
                    request_consultation(&config, dialogs.as_ref(), analytics.as_ref());
                }
                CtaAction::Defer | CtaAction::Ignore => {}
            }
        })?);
    }

    debug!("CTA handling bound to {} buttons", listeners.len());
    Ok(listeners)
}

/// Shows the static "email us" message. When invoked from an event the
/// event is fully consumed.
pub fn show_contact_popup(event: Option<&Event>, message: &str, dialogs: &dyn Dialogs) {
    if let Some(event) = event {
        event.prevent_default();
        event.stop_propagation();
    }
    dialogs.alert(message);
}

pub fn install_contact_popup(
    document: &Document,
    config: &Rc<SiteConfig>,
    dialogs: &Rc<dyn Dialogs>,
) -> Result<Vec<EventListener>> {
    dom::select_all(document, &config.contact_popup_selector)?
        .into_iter()
        .map(|trigger| {
            let config = Rc::clone(config);
            let dialogs = Rc::clone(dialogs);
            EventListener::new(&trigger, "click", move |event: Event| {
                show_contact_popup(Some(&event), &config.contact_popup_message, dialogs.as_ref());
            })
        })
        .collect()
}
