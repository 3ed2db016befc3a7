//! Mobile navigation toggle

use std::rc::Rc;

use tracing::debug;

use super::Mounted;
use crate::config::{Messages, SiteConfig};
use crate::host::{EventKind, EventOutcome, Host, Target};

/// Class on the navigation panel while the menu is open.
pub const OPEN_CLASS: &str = "active";

/// Button markup for the given menu state.
pub fn glyph(messages: &Messages, open: bool) -> &str {
    if open {
        &messages.menu_open_glyph
    } else {
        &messages.menu_closed_glyph
    }
}

pub fn init<H: Host>(host: &Rc<H>, config: &Rc<SiteConfig>) -> Option<Mounted> {
    let (Some(button), Some(nav)) = (
        host.query(&config.selectors.menu_button),
        host.query(&config.selectors.main_nav),
    ) else {
        debug!("navigation toggle skipped: menu button or nav panel missing");
        return None;
    };

    let h = Rc::clone(host);
    let cfg = Rc::clone(config);
    let btn = button.clone();
    let click = host.listen(
        Target::Element(&button),
        EventKind::Click,
        Box::new(move || {
            let open = h.toggle_class(&nav, OPEN_CLASS);
            h.set_inner_html(&btn, glyph(&cfg.messages, open));
            EventOutcome::Continue
        }),
    );

    debug!("navigation toggle mounted");
    Some(Mounted::new("navigation_toggle", vec![click]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_follows_state() {
        let messages = Messages::default();
        assert!(glyph(&messages, true).contains("fa-times"));
        assert!(glyph(&messages, false).contains("fa-bars"));
    }
}
