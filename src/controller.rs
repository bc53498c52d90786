//! Owns every listener, viewport watcher and injected stylesheet the page
//! behaviors install, so they can all be released together.

use std::rc::Rc;

use log::{debug, info, warn};
use stylist::GlobalStyle;
use web_sys::{Document, Event, Window};

use crate::config::SiteConfig;
use crate::cta::{self, Analytics, BrowserDialogs, Dialogs, GlobalAnalytics, NoopAnalytics};
use crate::debounce::{debounce, BrowserTimers, Debounced};
use crate::dom::{self, EventListener, IntersectionWatcher, ScrollMetrics};
use crate::error::Result;
use crate::theme::{self, LocalStorageStore, MemoryStore, ThemeStore};
use crate::{counter, forms, hero, lazy_images, navigation, reveal, styles};

/// Outside services the behaviors call into.
#[derive(Clone)]
pub struct Capabilities {
    pub analytics: Rc<dyn Analytics>,
    pub dialogs: Rc<dyn Dialogs>,
    pub theme_store: Rc<dyn ThemeStore>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            analytics: Rc::new(NoopAnalytics),
            dialogs: Rc::new(BrowserDialogs),
            theme_store: Rc::new(LocalStorageStore::new(SiteConfig::default().theme_storage_key)),
        }
    }
}

impl Capabilities {
    /// Live browser services: the configured global analytics function and
    /// `localStorage`, falling back to an in-memory store when storage is
    /// blocked.
    pub fn browser(window: &Window, config: &SiteConfig) -> Self {
        let theme_store: Rc<dyn ThemeStore> = match window.local_storage() {
            Ok(Some(_)) => Rc::new(LocalStorageStore::new(config.theme_storage_key.clone())),
            _ => {
                warn!("localStorage unavailable, theme choice lasts for this page only");
                Rc::new(MemoryStore::new(config.theme_storage_key.clone()))
            }
        };
        Self {
            analytics: Rc::new(GlobalAnalytics::new(config.analytics_function.clone())),
            dialogs: Rc::new(BrowserDialogs),
            theme_store,
        }
    }
}

/// Unwraps one behavior's install result. A behavior that fails to wire is
/// skipped so the rest of the page keeps working.
fn wired<T: Default>(behavior: &str, installed: Result<T>) -> T {
    installed.unwrap_or_else(|e| {
        warn!("{} disabled: {}", behavior, e);
        T::default()
    })
}

pub struct PageController {
    listeners: Vec<EventListener>,
    watchers: Vec<IntersectionWatcher>,
    scroll_settled: Rc<Debounced<BrowserTimers, f64>>,
    style: Option<GlobalStyle>,
}

impl PageController {
    /// Wires every behavior against the current document.
    pub fn install(config: SiteConfig, capabilities: Capabilities) -> Result<Self> {
        let window = dom::window()?;
        let document = dom::document(&window)?;
        let prefers_dark = theme::prefers_dark(&window);
        Ok(Self::install_into(&window, &document, Rc::new(config), capabilities, prefers_dark))
    }

    /// Same as [`PageController::install`] with the environment passed in.
    /// Individual behaviors that fail to install are logged and skipped.
    pub fn install_into(
        window: &Window,
        document: &Document,
        config: Rc<SiteConfig>,
        capabilities: Capabilities,
        prefers_dark: bool,
    ) -> Self {
        let style = match styles::inject() {
            Ok(style) => Some(style),
            Err(e) => {
                warn!("{}", e);
                None
            }
        };

        let mut listeners = Vec::new();
        let mut watchers = Vec::new();

        watchers.extend(wired("scroll reveal", reveal::install(window, document, &config)));
        watchers.extend(wired("counters", counter::install(window, document, &config)));
        watchers.extend(wired("lazy images", lazy_images::install(window, document, &config)));

        listeners.extend(wired(
            "smooth scroll",
            navigation::install_smooth_scroll(window, document, &config),
        ));
        listeners.extend(wired("mobile menu", navigation::install_mobile_menu(document, &config)));
        listeners.extend(wired(
            "header state",
            navigation::install_header_state(window, document, &config),
        ));
        listeners.extend(wired(
            "CTA buttons",
            cta::install_cta_buttons(document, &config, &capabilities.dialogs, &capabilities.analytics),
        ));
        listeners.extend(wired(
            "contact popup",
            cta::install_contact_popup(document, &config, &capabilities.dialogs),
        ));
        listeners.extend(wired("form validation", forms::install(document, &config)));
        listeners.extend(wired(
            "dark mode",
            theme::install(document, &config, &capabilities.theme_store, prefers_dark),
        ));
        listeners.extend(wired("hero animation", hero::install(window, document, &config)));

        let scroll_settled = Rc::new(debounce(config.scroll_debounce_ms, |scroll_y: f64| {
            debug!("Scroll settled at {}px", scroll_y);
        }));
        {
            let scroll_settled = Rc::clone(&scroll_settled);
            let scroll_source = window.clone();
            let settled = EventListener::new(window, "scroll", move |_: Event| {
                if let Some(metrics) = ScrollMetrics::read(&scroll_source) {
                    scroll_settled.call(metrics.scroll_y);
                }
            });
            listeners.extend(wired("scroll settle", settled.map(Some)));
        }

        info!(
            "Page behaviors installed: {} listeners, {} viewport watchers",
            listeners.len(),
            watchers.len()
        );

        Self {
            listeners,
            watchers,
            scroll_settled,
            style,
        }
    }

    /// Removes every listener, disconnects watchers and drops the injected
    /// stylesheet. Classes already applied to the page stay.
    pub fn teardown(self) {
        let Self {
            listeners,
            watchers,
            scroll_settled,
            style,
        } = self;

        scroll_settled.cancel();
        drop(listeners);
        drop(watchers);
        if let Some(style) = style {
            style.unregister();
        }
        info!("Page behaviors torn down");
    }
}
