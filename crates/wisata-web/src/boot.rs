//! Startup: configuration, document-ready wait and the mounted site.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wisata_core::{EventKind, EventOutcome, Page, Site, SiteConfig, SiteError, Target};

use crate::host::WebHost;

/// Id of the optional `<script type="application/json">` holding config overrides.
pub const CONFIG_ELEMENT_ID: &str = "wisata-config";

thread_local! {
    static SITE: RefCell<Option<Site>> = const { RefCell::new(None) };
}

/// Defaults, overridden by the inline config element when present and valid.
pub fn load_config(host: &WebHost) -> SiteConfig {
    let Some(json) = host
        .element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return SiteConfig::default();
    };

    match SiteConfig::from_json(&json) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(%err, "ignoring inline config, using defaults");
            SiteConfig::default()
        }
    }
}

fn mount(host: &Rc<WebHost>, config: SiteConfig) {
    let site = Site::mount(host, config);
    SITE.with(|slot| {
        if let Some(previous) = slot.borrow_mut().replace(site) {
            previous.teardown();
        }
    });
}

/// Mount now if the markup is parsed, otherwise on `DOMContentLoaded`.
pub fn run() -> Result<(), SiteError> {
    let host = Rc::new(WebHost::new()?);
    let config = load_config(&host);

    if !host.is_loading() {
        mount(&host, config);
        return Ok(());
    }

    let pending = Cell::new(Some(config));
    let h = Rc::clone(&host);
    host.listen(
        Target::Document,
        EventKind::DomContentLoaded,
        Box::new(move || {
            if let Some(config) = pending.take() {
                mount(&h, config);
            }
            EventOutcome::Continue
        }),
    )
    .detach();

    tracing::debug!("waiting for DOMContentLoaded");
    Ok(())
}

pub fn teardown() {
    if let Some(site) = SITE.with(|slot| slot.borrow_mut().take()) {
        site.teardown();
    }
}
