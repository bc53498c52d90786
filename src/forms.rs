use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::config::SiteConfig;
use crate::dom::{self, EventListener};
use crate::error::Result;

pub const ERROR_CLASS: &str = "error";

const FIELD_SELECTOR: &str = "[required], input[type=\"email\"], input[type=\"tel\"]";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9+\s()\-]*$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Email,
    Tel,
    Other,
}

impl InputKind {
    fn of(element: &Element) -> Self {
        if !element.tag_name().eq_ignore_ascii_case("input") {
            return InputKind::Other;
        }
        match element.get_attribute("type").unwrap_or_default().to_ascii_lowercase().as_str() {
            "email" => InputKind::Email,
            "tel" => InputKind::Tel,
            _ => InputKind::Other,
        }
    }
}

/// What validation decided for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMark {
    Error,
    Clear,
    /// Optional fields that pass are left as they are.
    Untouched,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSnapshot {
    pub required: bool,
    pub kind: InputKind,
    pub value: String,
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// Required fields must be non-blank; email and tel inputs that hold
/// anything must also match their format.
pub fn assess(field: &FieldSnapshot) -> FieldMark {
    let blank_required = field.required && field.value.trim().is_empty();
    let bad_format = !field.value.is_empty()
        && match field.kind {
            InputKind::Email => !is_valid_email(&field.value),
            InputKind::Tel => !is_valid_phone(&field.value),
            InputKind::Other => false,
        };

    if blank_required || bad_format {
        FieldMark::Error
    } else if field.required {
        FieldMark::Clear
    } else {
        FieldMark::Untouched
    }
}

fn field_value(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else {
        String::new()
    }
}

fn snapshot(element: &Element) -> FieldSnapshot {
    FieldSnapshot {
        required: element.has_attribute("required"),
        kind: InputKind::of(element),
        value: field_value(element),
    }
}

/// Marks invalid fields with the error class and reports whether the whole
/// form passed. Never submits or resets the form.
pub fn validate_form(form: &Element) -> bool {
    let fields = match dom::select_all_in(form, FIELD_SELECTOR) {
        Ok(fields) => fields,
        Err(_) => return false,
    };

    let mut valid = true;
    for field in &fields {
        let classes = field.class_list();
        match assess(&snapshot(field)) {
            FieldMark::Error => {
                let _ = classes.add_1(ERROR_CLASS);
                valid = false;
            }
            FieldMark::Clear => {
                let _ = classes.remove_1(ERROR_CLASS);
            }
            FieldMark::Untouched => {}
        }
    }
    valid
}

/// Blocks submission of opted-in forms until they validate.
pub fn install(document: &Document, config: &SiteConfig) -> Result<Vec<EventListener>> {
    let forms = dom::select_all(document, &config.validate_form_selector)?;
    let listeners = forms
        .into_iter()
        .map(|form| {
            let target = form.clone();
            EventListener::new(&form, "submit", move |event: Event| {
                if !validate_form(&target) {
                    event.prevent_default();
                }
            })
        })
        .collect::<Result<Vec<_>>>()?;
    debug!("Validation bound to {} forms", listeners.len());
    Ok(listeners)
}
