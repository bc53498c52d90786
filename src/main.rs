use forme_site::app::SiteBehaviors;
use forme_site::{config, dom, SiteError};
use log::{error, info};
use web_sys::Element;

fn mount_point() -> Result<Element, SiteError> {
    let window = dom::window()?;
    let document = dom::document(&window)?;
    if let Some(existing) = document.get_element_by_id(config::HOST_ID) {
        return Ok(existing);
    }

    let host = document.create_element("div")?;
    host.set_id(config::HOST_ID);
    dom::body(&document)?.append_child(&host)?;
    Ok(host)
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting page behaviors");
    match mount_point() {
        Ok(host) => {
            yew::Renderer::<SiteBehaviors>::with_root(host).render();
        }
        Err(e) => error!("Cannot mount page behaviors: {}", e),
    }
}
