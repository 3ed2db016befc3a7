//! Site lifecycle: mount every component once, tear them all down together.

use std::rc::Rc;

use tracing::info;

use crate::components::{
    anchor_scroll, card_stagger, contact_form, nav_toggle, reveal, scroll_top, slider, Mounted,
};
use crate::config::SiteConfig;
use crate::host::Host;

/// The mounted set of page behaviors.
#[derive(Debug)]
pub struct Site {
    components: Vec<Mounted>,
}

impl Site {
    /// Attach every behavior whose markup is present on the page.
    ///
    /// Order matters for the section tagging at the end: it runs after the
    /// reveal listeners exist, so tagged sections are picked up by the next
    /// load or scroll pass.
    pub fn mount<H: Host>(host: &Rc<H>, config: SiteConfig) -> Self {
        let config = Rc::new(config);
        let mut components = Vec::new();

        components.extend(nav_toggle::init(host, &config));
        components.extend(anchor_scroll::init(host, &config));
        components.extend(reveal::init(host, &config));
        components.extend(scroll_top::init(host, &config));

        card_stagger::init(host.as_ref(), &config);
        components.extend(contact_form::init(host, &config));

        components.extend(slider::init(host, &config));

        let sections = reveal::tag_sections(host.as_ref(), &config.selectors.section);

        info!(
            components = components.len(),
            sections, "site behaviors mounted"
        );
        Self { components }
    }

    /// Names of the components that found their markup.
    pub fn mounted(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.components.iter().map(Mounted::name)
    }

    /// Cancel every listener and timer the components own.
    pub fn teardown(self) {
        for component in self.components {
            component.teardown();
        }
        info!("site behaviors torn down");
    }
}
