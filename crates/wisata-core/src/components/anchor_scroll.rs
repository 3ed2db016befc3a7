//! Smooth scrolling for in-page anchors

use std::rc::Rc;

use tracing::debug;

use super::Mounted;
use crate::config::SiteConfig;
use crate::host::{EventKind, EventOutcome, Host, Target};

/// An href containing this points at another page and is left alone.
pub const PAGE_FILE_MARKER: &str = ".html";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorAction<'a> {
    /// Let the browser follow the link.
    Navigate,
    /// Scroll to the element with this id.
    ScrollTo(&'a str),
}

pub fn classify(href: &str) -> AnchorAction<'_> {
    if href.contains(PAGE_FILE_MARKER) {
        return AnchorAction::Navigate;
    }
    AnchorAction::ScrollTo(href.strip_prefix('#').unwrap_or(href))
}

/// Document offset that puts `element_top` just below the fixed header.
pub fn scroll_target(element_top: f64, scroll_y: f64, header_height: f64) -> f64 {
    element_top + scroll_y - header_height
}

pub fn init<H: Host>(host: &Rc<H>, config: &Rc<SiteConfig>) -> Option<Mounted> {
    let anchors = host.query_all(&config.selectors.in_page_anchor);
    if anchors.is_empty() {
        debug!("anchor scroller skipped: no in-page anchors");
        return None;
    }

    let mut subscriptions = Vec::with_capacity(anchors.len());
    for anchor in &anchors {
        let h = Rc::clone(host);
        let cfg = Rc::clone(config);
        let a = anchor.clone();
        subscriptions.push(host.listen(
            Target::Element(anchor),
            EventKind::Click,
            Box::new(move || {
                let href = h.attribute(&a, "href").unwrap_or_default();
                let AnchorAction::ScrollTo(id) = classify(&href) else {
                    return EventOutcome::Continue;
                };

                let target = if id.is_empty() {
                    None
                } else {
                    h.element_by_id(id)
                };
                if let Some(target) = target {
                    let header_height = h
                        .query(&cfg.selectors.main_header)
                        .map(|header| h.offset_height(&header))
                        .unwrap_or(0.0);
                    let top = scroll_target(h.viewport_top(&target), h.scroll_y(), header_height);
                    h.scroll_to(top);
                }
                EventOutcome::PreventDefault
            }),
        ));
    }

    debug!(anchors = anchors.len(), "anchor scroller mounted");
    Some(Mounted::new("anchor_scroller", subscriptions))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_fragment() {
        assert_eq!(classify("#destinasi"), AnchorAction::ScrollTo("destinasi"));
        assert_eq!(classify("#"), AnchorAction::ScrollTo(""));
    }

    #[test]
    fn test_classify_other_page() {
        assert_eq!(classify("#bali.html"), AnchorAction::Navigate);
    }

    #[test]
    fn test_scroll_target_subtracts_header() {
        assert_eq!(scroll_target(250.0, 1000.0, 80.0), 1170.0);
    }
}
