use log::{warn, Level};
use serde::Deserialize;
use web_sys::Document;

use crate::error::Result;

/// Id of the optional `<script type="application/json">` block that overrides defaults.
pub const CONFIG_SCRIPT_ID: &str = "forme-site-config";

/// Id of the element the Yew host renders into.
pub const HOST_ID: &str = "forme-site-behaviors";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Every selector, threshold and message the page behaviors depend on.
///
/// Unknown fields are rejected so typos in the page's config block show up
/// in the console instead of silently doing nothing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub reveal_selectors: Vec<String>,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,

    pub counter_selector: String,
    pub counter_duration_ms: u32,

    pub anchor_selector: String,
    pub header_selector: String,
    pub anchor_gap_px: f64,
    pub header_scrolled_threshold: f64,

    pub menu_toggle_selector: String,
    pub menu_selector: String,

    pub cta_selectors: Vec<String>,
    pub consultation_keyword: String,
    pub consultation_prompt: String,
    pub consultation_thanks: String,
    pub contact_popup_selector: String,
    pub contact_popup_message: String,
    pub analytics_function: String,

    pub lazy_image_selector: String,
    pub validate_form_selector: String,
    pub scroll_debounce_ms: u32,

    pub dark_mode_toggle_id: String,
    pub theme_storage_key: String,

    pub hero_selectors: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            reveal_selectors: [
                ".service-card",
                ".feature-item",
                ".pricing-card",
                ".process-step",
                ".testimonial-card",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),

            counter_selector: "[data-count-to]".to_string(),
            counter_duration_ms: 2000,

            anchor_selector: "a[href^=\"#\"]".to_string(),
            header_selector: ".header".to_string(),
            anchor_gap_px: 20.0,
            header_scrolled_threshold: 100.0,

            menu_toggle_selector: ".mobile-menu-toggle".to_string(),
            menu_selector: ".nav-menu".to_string(),

            cta_selectors: vec![
                ".btn-primary".to_string(),
                ".btn-cta".to_string(),
                ".nav-cta-btn".to_string(),
            ],
            consultation_keyword: "상담".to_string(),
            consultation_prompt: "무료 상담을 신청하시겠습니까?\n\n담당자가 24시간 내에 연락드리겠습니다."
                .to_string(),
            consultation_thanks: "상담 신청이 완료되었습니다!\n곧 연락드리겠습니다. 📞".to_string(),
            contact_popup_selector: ".hero [data-contact-popup]".to_string(),
            contact_popup_message: "contact@formeai.org 이메일로 상담 신청해주세요".to_string(),
            analytics_function: "gtag".to_string(),

            lazy_image_selector: "img[data-src]".to_string(),
            validate_form_selector: "form[data-validate]".to_string(),
            scroll_debounce_ms: 10,

            dark_mode_toggle_id: "dark-mode-toggle".to_string(),
            theme_storage_key: "theme".to_string(),

            hero_selectors: vec![
                ".fade-in".to_string(),
                ".fade-in-delay".to_string(),
                ".fade-in-delay-2".to_string(),
            ],
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads the page's config block if there is one, otherwise the defaults.
    pub fn load(document: &Document) -> Self {
        let raw = match document.get_element_by_id(CONFIG_SCRIPT_ID).and_then(|el| el.text_content()) {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Self::default(),
        };

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring #{}: {}", CONFIG_SCRIPT_ID, e);
                Self::default()
            }
        }
    }

    pub fn reveal_selector(&self) -> String {
        self.reveal_selectors.join(", ")
    }

    pub fn cta_selector(&self) -> String {
        self.cta_selectors.join(", ")
    }

    pub fn hero_selector(&self) -> String {
        self.hero_selectors.join(", ")
    }
}
