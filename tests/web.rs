#![cfg(target_arch = "wasm32")]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use forme_site::config::SiteConfig;
use forme_site::cta::{self, Dialogs};
use forme_site::theme::{self, MemoryStore, ThemeStore};
use forme_site::dom::{EventListener, IntersectionWatcher};
use forme_site::{counter, dom, forms, hero, lazy_images, navigation, reveal, Capabilities, PageController};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, Event, EventInit, HtmlElement, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Mounts markup in a fresh container that is removed when dropped.
struct Fixture {
    root: Element,
}

impl Fixture {
    fn new(markup: &str) -> Self {
        let document = document();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(markup);
        document.body().unwrap().append_child(&root).unwrap();
        Self { root }
    }

    fn find(&self, selector: &str) -> HtmlElement {
        self.root
            .query_selector(selector)
            .unwrap()
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap()
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        self.root.remove();
    }
}

/// Bubbling, cancelable synthetic event.
fn cancelable(kind: &str) -> Event {
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    Event::new_with_event_init_dict(kind, &init).unwrap()
}

/// Lets observers and smooth scrolling catch up.
async fn settle(ms: u32) {
    TimeoutFuture::new(ms).await;
}

const IN_VIEW: &str = "position: fixed; top: 0; left: 0; width: 100px; height: 100px;";

#[derive(Default)]
struct RecordingDialogs {
    shown: RefCell<Vec<String>>,
}

impl Dialogs for RecordingDialogs {
    fn confirm(&self, message: &str) -> bool {
        self.shown.borrow_mut().push(message.to_string());
        false
    }

    fn alert(&self, message: &str) {
        self.shown.borrow_mut().push(message.to_string());
    }
}

#[wasm_bindgen_test]
fn mobile_menu_toggles_and_closes_on_link() {
    let fixture = Fixture::new(
        r##"<button class="mobile-menu-toggle">☰</button>
            <ul class="nav-menu"><li><a href="#services">Services</a></li></ul>"##,
    );
    let _listeners = navigation::install_mobile_menu(&document(), &SiteConfig::default()).unwrap();
    let toggle = fixture.find(".mobile-menu-toggle");
    let menu = fixture.find(".nav-menu");

    toggle.click();
    assert!(menu.class_list().contains("mobile-menu-open"));
    assert_eq!(toggle.text_content().as_deref(), Some("✕"));

    toggle.click();
    assert!(!menu.class_list().contains("mobile-menu-open"));
    assert_eq!(toggle.text_content().as_deref(), Some("☰"));

    toggle.click();
    fixture.find(".nav-menu a").click();
    assert!(!menu.class_list().contains("mobile-menu-open"));
    assert_eq!(toggle.text_content().as_deref(), Some("☰"));
}

#[wasm_bindgen_test]
fn mobile_menu_without_toggle_is_disabled() {
    let _fixture = Fixture::new(r#"<ul class="nav-menu"><li><a>Home</a></li></ul>"#);
    let listeners = navigation::install_mobile_menu(&document(), &SiteConfig::default()).unwrap();
    assert!(listeners.is_empty());
}

#[wasm_bindgen_test]
fn validate_form_marks_only_failing_fields() {
    let fixture = Fixture::new(
        r#"<form>
             <input name="name" required class="error">
             <input name="email" type="email" required>
             <input name="phone" type="tel">
           </form>"#,
    );
    let form = fixture.find("form");
    let name = fixture.find("input[name=name]").dyn_into::<HtmlInputElement>().unwrap();
    let email = fixture.find("input[name=email]").dyn_into::<HtmlInputElement>().unwrap();
    let phone = fixture.find("input[name=phone]").dyn_into::<HtmlInputElement>().unwrap();

    name.set_value("   ");
    email.set_value("hello@formeai.org");
    assert!(!forms::validate_form(&form));
    assert!(name.class_list().contains("error"));
    assert!(!email.class_list().contains("error"));
    assert!(!phone.class_list().contains("error"));

    name.set_value("홍길동");
    phone.set_value("010-1234-5678");
    assert!(forms::validate_form(&form));
    assert!(!name.class_list().contains("error"));
    assert!(!email.class_list().contains("error"));
    assert!(!phone.class_list().contains("error"));
}

#[wasm_bindgen_test]
fn dark_mode_follows_os_then_persists_toggle() {
    let fixture = Fixture::new(r#"<button id="dark-mode-toggle">🌙</button>"#);
    let store = Rc::new(MemoryStore::new("theme"));
    let dyn_store: Rc<dyn ThemeStore> = store.clone();
    let body = document().body().unwrap();

    let listener = theme::install(&document(), &SiteConfig::default(), &dyn_store, true).unwrap();
    assert!(listener.is_some());
    assert!(body.class_list().contains(theme::DARK_CLASS));

    fixture.find("#dark-mode-toggle").click();
    assert!(!body.class_list().contains(theme::DARK_CLASS));
    assert_eq!(store.load().as_deref(), Some("light"));

    body.class_list().remove_1(theme::DARK_CLASS).unwrap();
}

#[wasm_bindgen_test]
fn dark_mode_without_toggle_is_noop() {
    let store: Rc<dyn ThemeStore> = Rc::new(MemoryStore::with_value("theme", "dark"));
    let listener = theme::install(&document(), &SiteConfig::default(), &store, true).unwrap();
    assert!(listener.is_none());
    assert!(!document().body().unwrap().class_list().contains(theme::DARK_CLASS));
}

#[wasm_bindgen_test]
fn missing_fragment_does_not_scroll() {
    let window = web_sys::window().unwrap();
    let before = window.scroll_y().unwrap();
    navigation::scroll_to_fragment(&window, &document(), "#missing", ".header", 20.0);
    navigation::scroll_to_fragment(&window, &document(), "#", ".header", 20.0);
    assert_eq!(window.scroll_y().unwrap(), before);
}

#[wasm_bindgen_test]
fn cards_are_tagged_pending() {
    let fixture = Fixture::new(r#"<div class="service-card">A</div><div class="pricing-card">B</div>"#);
    let window = web_sys::window().unwrap();
    let _watcher = reveal::install(&window, &document(), &SiteConfig::default()).unwrap();
    assert!(fixture.find(".service-card").class_list().contains(reveal::PENDING_CLASS));
    assert!(fixture.find(".pricing-card").class_list().contains(reveal::PENDING_CLASS));
}

#[wasm_bindgen_test]
fn hero_animation_starts_running() {
    let fixture = Fixture::new(r#"<h1 class="fade-in" style="animation-play-state: paused">Hi</h1>"#);
    hero::start_hero_animation(&document(), &SiteConfig::default().hero_selector());

    let heading = fixture.find(".fade-in");
    assert_eq!(
        heading.style().get_property_value("animation-play-state").unwrap(),
        "running"
    );
    let body = document().body().unwrap();
    assert!(body.class_list().contains(hero::LOADED_CLASS));
    body.class_list().remove_1(hero::LOADED_CLASS).unwrap();
}

#[wasm_bindgen_test]
fn cta_with_inline_handler_is_left_alone() {
    let fixture = Fixture::new(
        r#"<a class="btn-primary inline" onclick="return false;">무료 상담</a>
           <a class="btn-cta plain">무료 상담 신청</a>"#,
    );
    let config = Rc::new(SiteConfig::default());
    let recording = Rc::new(RecordingDialogs::default());
    let dialogs: Rc<dyn Dialogs> = recording.clone();
    let analytics: Rc<dyn cta::Analytics> = Rc::new(cta::NoopAnalytics);
    let _listeners = cta::install_cta_buttons(&document(), &config, &dialogs, &analytics).unwrap();

    fixture.find(".inline").click();
    assert!(recording.shown.borrow().is_empty());

    fixture.find(".plain").click();
    assert_eq!(*recording.shown.borrow(), vec![config.consultation_prompt.clone()]);
}

#[wasm_bindgen_test]
fn select_all_collects_elements_in_order() {
    let _fixture = Fixture::new(r#"<p class="x">1</p><p class="x">2</p>"#);
    let found = dom::select_all(&document(), "p.x").unwrap();
    let texts: Vec<_> = found.iter().filter_map(|el| el.text_content()).collect();
    assert_eq!(texts, vec!["1", "2"]);
}

#[wasm_bindgen_test]
fn controller_installs_and_tears_down_cleanly() {
    let fixture = Fixture::new(
        r##"<header class="header"><button class="mobile-menu-toggle">☰</button>
              <ul class="nav-menu"><li><a href="#about">About</a></li></ul></header>
            <section id="about" class="feature-item">About</section>"##,
    );
    let controller = PageController::install(SiteConfig::default(), Capabilities::default()).unwrap();
    controller.teardown();

    // Listeners are gone, so the toggle no longer opens the menu.
    fixture.find(".mobile-menu-toggle").click();
    assert!(!fixture.find(".nav-menu").class_list().contains("mobile-menu-open"));
    assert!(fixture.find(".feature-item").class_list().contains(reveal::PENDING_CLASS));
}

#[wasm_bindgen_test]
fn bad_selector_disables_only_its_own_behavior() {
    let fixture = Fixture::new(
        r#"<button class="mobile-menu-toggle">☰</button>
           <ul class="nav-menu"><li><a>Home</a></li></ul>
           <div class="service-card">A</div>"#,
    );
    let config = SiteConfig::from_json(r#"{"counter_selector": "[["}"#).unwrap();
    let window = web_sys::window().unwrap();

    let controller =
        PageController::install_into(&window, &document(), Rc::new(config), Capabilities::default(), false);

    fixture.find(".mobile-menu-toggle").click();
    assert!(fixture.find(".nav-menu").class_list().contains("mobile-menu-open"));
    assert!(fixture.find(".service-card").class_list().contains(reveal::PENDING_CLASS));
    controller.teardown();
}

#[wasm_bindgen_test]
async fn watcher_reports_each_element_once() {
    let fixture = Fixture::new(&format!(r#"<div class="watched" style="{}"></div>"#, IN_VIEW));
    let target = fixture.find(".watched");
    let hits = Rc::new(Cell::new(0));
    let watcher = {
        let hits = Rc::clone(&hits);
        IntersectionWatcher::new(None, move |_: &Element| hits.set(hits.get() + 1)).unwrap()
    };
    watcher.observe(&target);
    settle(200).await;
    assert_eq!(hits.get(), 1);

    target.style().set_property("top", "5000px").unwrap();
    settle(200).await;
    target.style().set_property("top", "0").unwrap();
    settle(200).await;
    assert_eq!(hits.get(), 1);
}

#[wasm_bindgen_test]
async fn revealed_card_stays_animated_after_leaving_view() {
    let fixture = Fixture::new(&format!(r#"<div class="service-card" style="{}">A</div>"#, IN_VIEW));
    let window = web_sys::window().unwrap();
    let _watcher = reveal::install(&window, &document(), &SiteConfig::default()).unwrap();
    let card = fixture.find(".service-card");

    settle(200).await;
    assert!(card.class_list().contains(reveal::ANIMATED_CLASS));

    card.style().set_property("top", "5000px").unwrap();
    settle(200).await;
    assert!(card.class_list().contains(reveal::ANIMATED_CLASS));
}

#[wasm_bindgen_test]
fn load_image_swaps_in_deferred_source() {
    let src = "data:image/gif;base64,R0lGODlhAQABAAAAACw=";
    let fixture = Fixture::new(&format!(r#"<img class="lazy" data-src="{}">"#, src));
    let image = fixture.find("img");

    lazy_images::load_image(&image);

    assert_eq!(image.get_attribute("src").as_deref(), Some(src));
    assert!(!image.class_list().contains(lazy_images::LAZY_CLASS));
}

#[wasm_bindgen_test]
async fn lazy_image_loads_when_it_enters_view() {
    let src = "data:image/gif;base64,R0lGODlhAQABAAAAACw=";
    let fixture = Fixture::new(&format!(r#"<img class="lazy" data-src="{}" style="{}">"#, src, IN_VIEW));
    let window = web_sys::window().unwrap();
    let _watcher = lazy_images::install(&window, &document(), &SiteConfig::default()).unwrap();

    settle(200).await;
    let image = fixture.find("img");
    assert_eq!(image.get_attribute("src").as_deref(), Some(src));
    assert!(!image.class_list().contains(lazy_images::LAZY_CLASS));
}

#[wasm_bindgen_test]
async fn anchor_click_scrolls_below_header() {
    let fixture = Fixture::new(
        r##"<header class="header" style="height: 60px;"></header>
            <a class="jump" href="#section1">Go</a>
            <div style="height: 2000px;"></div>
            <section id="section1" style="height: 100px;">Target</section>
            <div style="height: 3000px;"></div>"##,
    );
    let window = web_sys::window().unwrap();
    window.scroll_to_with_x_and_y(0.0, 0.0);
    let _listeners = navigation::install_smooth_scroll(&window, &document(), &SiteConfig::default()).unwrap();

    let not_prevented = fixture.find(".jump").dispatch_event(&cancelable("click")).unwrap();
    assert!(!not_prevented);

    settle(1500).await;
    let expected = fixture.find("#section1").offset_top() as f64 - 60.0 - 20.0;
    assert!((window.scroll_y().unwrap() - expected).abs() <= 1.0);
    window.scroll_to_with_x_and_y(0.0, 0.0);
}

#[wasm_bindgen_test]
fn invalid_form_submission_is_blocked() {
    let fixture = Fixture::new(r#"<form data-validate><input name="name" required></form>"#);
    let _listeners = forms::install(&document(), &SiteConfig::default()).unwrap();
    let form = fixture.find("form");

    assert!(!form.dispatch_event(&cancelable("submit")).unwrap());
    assert!(fixture.find("input").class_list().contains(forms::ERROR_CLASS));

    fixture
        .find("input")
        .dyn_into::<HtmlInputElement>()
        .unwrap()
        .set_value("홍길동");
    assert!(form.dispatch_event(&cancelable("submit")).unwrap());
}

#[wasm_bindgen_test]
fn contact_popup_consumes_click() {
    let fixture = Fixture::new(
        r#"<div class="outer"><section class="hero"><button data-contact-popup>문의</button></section></div>"#,
    );
    let config = Rc::new(SiteConfig::default());
    let recording = Rc::new(RecordingDialogs::default());
    let dialogs: Rc<dyn Dialogs> = recording.clone();
    let _listeners = cta::install_contact_popup(&document(), &config, &dialogs).unwrap();

    let bubbled = Rc::new(Cell::new(0));
    let _outer = {
        let bubbled = Rc::clone(&bubbled);
        EventListener::new(&fixture.find(".outer"), "click", move |_| bubbled.set(bubbled.get() + 1)).unwrap()
    };

    let not_prevented = fixture
        .find("[data-contact-popup]")
        .dispatch_event(&cancelable("click"))
        .unwrap();

    assert!(!not_prevented);
    assert_eq!(bubbled.get(), 0);
    assert_eq!(*recording.shown.borrow(), vec![config.contact_popup_message.clone()]);
}

#[wasm_bindgen_test]
fn header_class_tracks_scroll_threshold() {
    let fixture = Fixture::new(r#"<header class="header"></header>"#);
    let header = fixture.find(".header");

    navigation::apply_header_state(&header, 150.0, 100.0);
    assert!(header.class_list().contains(navigation::HEADER_SCROLLED_CLASS));

    navigation::apply_header_state(&header, 100.0, 100.0);
    assert!(!header.class_list().contains(navigation::HEADER_SCROLLED_CLASS));
}

#[wasm_bindgen_test]
fn counter_snaps_to_target_without_marking_element() {
    let fixture = Fixture::new(r#"<span class="count">0</span>"#);
    let counter_el = fixture.find(".count");
    let window = web_sys::window().unwrap();

    counter::animate_counter(&window, &counter_el, 42.0, 0);

    assert_eq!(counter_el.outer_html(), r#"<span class="count">42</span>"#);
}
