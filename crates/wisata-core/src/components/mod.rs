//! Page components
//!
//! One module per behavior. Each `init` looks up its elements, registers its
//! listeners/timers and returns a [`Mounted`] record, or `None` when the page
//! does not carry the markup it needs.

pub mod alert;
pub mod anchor_scroll;
pub mod card_stagger;
pub mod contact_form;
pub mod nav_toggle;
pub mod reveal;
pub mod scroll_top;
pub mod slider;

use crate::host::Subscription;

/// A component that has been attached to the page.
#[derive(Debug)]
pub struct Mounted {
    name: &'static str,
    subscriptions: Vec<Subscription>,
}

impl Mounted {
    pub fn new(name: &'static str, subscriptions: Vec<Subscription>) -> Self {
        Self {
            name,
            subscriptions,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Remove every listener and pending timer this component registered.
    pub fn teardown(self) {
        for subscription in self.subscriptions {
            subscription.cancel();
        }
    }
}
