//! Reveal-on-scroll
//!
//! Animatable elements get [`VISIBLE_CLASS`] once their top edge rises above
//! `viewport height - reveal offset`. The pass runs on window load and on
//! every scroll event, unthrottled. The class is never taken away again.

use std::rc::Rc;

use tracing::debug;

use super::Mounted;
use crate::config::SiteConfig;
use crate::host::{EventKind, EventOutcome, Host, Page, Target};

pub const VISIBLE_CLASS: &str = "visible";

/// Class added to every page section so it takes part in the reveal.
pub const SECTION_CLASS: &str = "fade-in";

pub fn should_reveal(element_top: f64, viewport_height: f64, offset: f64) -> bool {
    element_top < viewport_height - offset
}

/// Flag every animatable element that is currently in range.
pub fn reveal_pass<P: Page + ?Sized>(page: &P, selector: &str, offset: f64) {
    let viewport_height = page.viewport_height();
    for element in page.query_all(selector) {
        if should_reveal(page.viewport_top(&element), viewport_height, offset) {
            page.add_class(&element, VISIBLE_CLASS);
        }
    }
}

/// Tag page sections as animatable. Returns how many were tagged.
pub fn tag_sections<P: Page + ?Sized>(page: &P, selector: &str) -> usize {
    let sections = page.query_all(selector);
    for section in &sections {
        page.add_class(section, SECTION_CLASS);
    }
    sections.len()
}

pub fn init<H: Host>(host: &Rc<H>, config: &Rc<SiteConfig>) -> Option<Mounted> {
    let subscriptions = [EventKind::Load, EventKind::Scroll]
        .into_iter()
        .map(|event| {
            let h = Rc::clone(host);
            let cfg = Rc::clone(config);
            host.listen(
                Target::Window,
                event,
                Box::new(move || {
                    reveal_pass(
                        h.as_ref(),
                        &cfg.selectors.animatable,
                        cfg.timing.reveal_offset_px,
                    );
                    EventOutcome::Continue
                }),
            )
        })
        .collect();

    // Started after `load`: that event will not come again.
    if host.document_complete() {
        reveal_pass(
            host.as_ref(),
            &config.selectors.animatable,
            config.timing.reveal_offset_px,
        );
    }

    debug!("reveal-on-scroll mounted");
    Some(Mounted::new("reveal_on_scroll", subscriptions))
}
