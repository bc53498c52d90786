use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, warn};
use web_sys::{Document, Window};

use crate::config::SiteConfig;
use crate::dom::{self, EventListener};
use crate::error::Result;

pub const DARK_CLASS: &str = "dark-mode";
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

/// Stored choice wins; an empty or missing value defers to the OS.
pub fn resolve_theme(stored: Option<&str>, prefers_dark: bool) -> Theme {
    match stored {
        Some("dark") => Theme::Dark,
        Some(value) if !value.is_empty() => Theme::Light,
        _ => Theme::from_dark(prefers_dark),
    }
}

pub trait ThemeStore {
    fn load(&self) -> Option<String>;
    fn save(&self, theme: Theme);
}

/// `localStorage` under a single key.
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl ThemeStore for LocalStorageStore {
    fn load(&self) -> Option<String> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|storage| storage.get_item(&self.key).ok())
            .flatten()
    }

    fn save(&self, theme: Theme) {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok()).flatten();
        match storage {
            Some(storage) => {
                if let Err(e) = storage.set_item(&self.key, theme.as_str()) {
                    warn!("Could not persist theme: {:?}", e);
                }
            }
            None => warn!("localStorage unavailable, theme not persisted"),
        }
    }
}

/// In-process store for pages without `localStorage` and for tests.
#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    key: String,
}

impl MemoryStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            values: RefCell::new(HashMap::new()),
            key: key.into(),
        }
    }

    pub fn with_value(key: impl Into<String>, value: &str) -> Self {
        let store = Self::new(key);
        store.values.borrow_mut().insert(store.key.clone(), value.to_string());
        store
    }
}

impl ThemeStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.values.borrow().get(&self.key).cloned()
    }

    fn save(&self, theme: Theme) {
        self.values.borrow_mut().insert(self.key.clone(), theme.as_str().to_string());
    }
}

pub fn prefers_dark(window: &Window) -> bool {
    window
        .match_media(PREFERS_DARK_QUERY)
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// Applies the initial theme and wires the toggle. No toggle, no-op.
pub fn install(
    document: &Document,
    config: &SiteConfig,
    store: &Rc<dyn ThemeStore>,
    prefers_dark: bool,
) -> Result<Option<EventListener>> {
    let toggle = match document.get_element_by_id(&config.dark_mode_toggle_id) {
        Some(toggle) => toggle,
        None => return Ok(None),
    };
    let body = dom::body(document)?;

    let theme = resolve_theme(store.load().as_deref(), prefers_dark);
    if theme == Theme::Dark {
        body.class_list().add_1(DARK_CLASS)?;
    }
    debug!("Initial theme: {}", theme.as_str());

    let store = Rc::clone(store);
    let listener = EventListener::new(&toggle, "click", move |_| {
        let is_dark = body.class_list().toggle(DARK_CLASS).unwrap_or(false);
        store.save(Theme::from_dark(is_dark));
    })?;
    Ok(Some(listener))
}
