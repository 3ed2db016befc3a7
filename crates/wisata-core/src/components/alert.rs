//! Alert banners
//!
//! A banner is appended to the body, fades after `alert_lifetime_ms` and is
//! removed `alert_fade_ms` later. The close button runs the same fade/remove
//! sequence straight away; whichever path comes second finds the element
//! already fading or gone and does nothing harmful.
//!
//! Every timer and listener a banner creates goes into the caller's
//! [`SubscriptionSet`], so tearing down the owning component also stops
//! banners that are still on screen.

use std::rc::Rc;

use tracing::debug;

use crate::config::SiteConfig;
use crate::host::{EventKind, EventOutcome, Host, SubscriptionSet, Target};

pub const ALERT_CLASS: &str = "alert";
pub const CLOSE_CLASS: &str = "alert-close";
pub const FADE_CLASS: &str = "fade-out";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertKind {
    #[default]
    Success,
    Error,
}

impl AlertKind {
    pub fn class_name(self) -> &'static str {
        match self {
            AlertKind::Success => "alert-success",
            AlertKind::Error => "alert-error",
        }
    }
}

/// Show a banner and schedule its removal. Returns the banner element, or
/// `None` if the page has no body to attach it to.
pub fn show_alert<H: Host>(
    host: &Rc<H>,
    config: &SiteConfig,
    message: &str,
    kind: AlertKind,
    owner: &SubscriptionSet,
) -> Option<H::Element> {
    let body = host.body()?;

    let alert = host.create_element("div")?;
    host.add_class(&alert, ALERT_CLASS);
    host.add_class(&alert, kind.class_name());

    let text = host.create_element("span")?;
    host.set_text(&text, message);
    host.append_child(&alert, &text);

    let close = host.create_element("button")?;
    host.add_class(&close, CLOSE_CLASS);
    host.set_inner_html(&close, &config.messages.alert_close_glyph);
    host.append_child(&alert, &close);

    host.append_child(&body, &alert);

    let fade_ms = config.timing.alert_fade_ms;
    {
        let h = Rc::clone(host);
        let el = alert.clone();
        let set = owner.clone();
        owner.push(host.set_timeout(
            config.timing.alert_lifetime_ms,
            Box::new(move || dismiss(&h, &el, fade_ms, &set)),
        ));
    }
    {
        let h = Rc::clone(host);
        let el = alert.clone();
        let set = owner.clone();
        owner.push(host.listen(
            Target::Element(&close),
            EventKind::Click,
            Box::new(move || {
                dismiss(&h, &el, fade_ms, &set);
                EventOutcome::Continue
            }),
        ));
    }

    debug!(kind = ?kind, "alert shown");
    Some(alert)
}

/// Start the fade and remove the banner once it has finished.
pub fn dismiss<H: Host>(
    host: &Rc<H>,
    alert: &H::Element,
    fade_ms: u32,
    owner: &SubscriptionSet,
) {
    host.add_class(alert, FADE_CLASS);
    let h = Rc::clone(host);
    let el = alert.clone();
    owner.push(host.set_timeout(fade_ms, Box::new(move || h.remove(&el))));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classes() {
        assert_eq!(AlertKind::default(), AlertKind::Success);
        assert_eq!(AlertKind::Success.class_name(), "alert-success");
        assert_eq!(AlertKind::Error.class_name(), "alert-error");
    }
}
