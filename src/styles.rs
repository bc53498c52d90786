use stylist::GlobalStyle;

use crate::error::{Result, SiteError};

/// Open mobile menu, scrolled header and invalid field appearance.
pub const PAGE_STYLES: &str = r#"
.nav-menu.mobile-menu-open {
    display: flex !important;
    position: absolute;
    top: 100%;
    left: 0;
    right: 0;
    background-color: var(--white);
    flex-direction: column;
    padding: 1rem;
    box-shadow: 0 4px 10px var(--shadow);
    border-top: 1px solid var(--light);
}

.nav-menu.mobile-menu-open li {
    margin: 0.5rem 0;
}

.header.scrolled {
    background-color: rgba(255, 255, 255, 0.95);
    backdrop-filter: blur(10px);
}

.error {
    border-color: var(--accent) !important;
    box-shadow: 0 0 0 2px rgba(242, 72, 34, 0.2);
}

@media (max-width: 768px) {
    .nav-menu {
        display: none;
    }
}
"#;

pub fn inject() -> Result<GlobalStyle> {
    GlobalStyle::new(PAGE_STYLES).map_err(|e| SiteError::Style(e.to_string()))
}
