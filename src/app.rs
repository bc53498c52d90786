use log::error;
use yew::prelude::*;

use crate::config::SiteConfig;
use crate::controller::{Capabilities, PageController};
use crate::dom;
use crate::progress::ScrollProgress;

/// Installs the page behaviors on mount and releases them on unmount.
#[function_component(SiteBehaviors)]
pub fn site_behaviors() -> Html {
    use_effect_with_deps(
        move |_| {
            let controller = dom::window().and_then(|window| {
                let document = dom::document(&window)?;
                let config = SiteConfig::load(&document);
                let capabilities = Capabilities::browser(&window, &config);
                PageController::install(config, capabilities)
            });

            let controller = match controller {
                Ok(controller) => Some(controller),
                Err(e) => {
                    error!("Failed to install page behaviors: {}", e);
                    None
                }
            };

            move || {
                if let Some(controller) = controller {
                    controller.teardown();
                }
            }
        },
        (), // Run once on mount
    );

    html! {
        <ScrollProgress />
    }
}
