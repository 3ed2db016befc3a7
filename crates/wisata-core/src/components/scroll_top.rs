//! Back-to-top control

use std::rc::Rc;

use tracing::debug;

use super::Mounted;
use crate::config::SiteConfig;
use crate::host::{EventKind, EventOutcome, Host, Target};

pub const VISIBLE_CLASS: &str = "visible";

pub fn is_visible(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub fn init<H: Host>(host: &Rc<H>, config: &Rc<SiteConfig>) -> Option<Mounted> {
    let Some(button) = host.query(&config.selectors.back_to_top) else {
        debug!("back-to-top skipped: control missing");
        return None;
    };

    let scroll = {
        let h = Rc::clone(host);
        let threshold = config.timing.scroll_top_threshold_px;
        let btn = button.clone();
        host.listen(
            Target::Window,
            EventKind::Scroll,
            Box::new(move || {
                if is_visible(h.scroll_y(), threshold) {
                    h.add_class(&btn, VISIBLE_CLASS);
                } else {
                    h.remove_class(&btn, VISIBLE_CLASS);
                }
                EventOutcome::Continue
            }),
        )
    };

    let click = {
        let h = Rc::clone(host);
        host.listen(
            Target::Element(&button),
            EventKind::Click,
            Box::new(move || {
                h.scroll_to(0.0);
                EventOutcome::PreventDefault
            }),
        )
    };

    debug!("back-to-top mounted");
    Some(Mounted::new("scroll_top_control", vec![scroll, click]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(!is_visible(300.0, 300.0));
        assert!(is_visible(300.5, 300.0));
        assert!(!is_visible(0.0, 300.0));
    }
}
