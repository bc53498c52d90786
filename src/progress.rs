use web_sys::Event;
use yew::prelude::*;
use yew_hooks::use_event_with_window;

use crate::dom::ScrollMetrics;

const BAR_STYLE: &str = "position: fixed; top: 0; left: 0; height: 3px; \
    background: linear-gradient(90deg, var(--primary), var(--accent)); \
    z-index: 9999; transition: width 0.1s ease;";

/// Share of the scrollable distance already traversed, in percent.
/// Pages that cannot scroll report 0.
pub fn scroll_percent(metrics: &ScrollMetrics) -> f64 {
    let scrollable = metrics.document_height - metrics.viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    let percent = metrics.scroll_y / scrollable * 100.0;
    if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

#[function_component(ScrollProgress)]
pub fn scroll_progress() -> Html {
    let width = use_state(|| 0.0_f64);

    {
        let width = width.clone();
        use_event_with_window("scroll", move |_: Event| {
            if let Some(metrics) = web_sys::window().as_ref().and_then(ScrollMetrics::read) {
                width.set(scroll_percent(&metrics));
            }
        });
    }

    let style = format!("{} width: {}%;", BAR_STYLE, *width);

    html! {
        <div class="scroll-progress" style={style}></div>
    }
}
