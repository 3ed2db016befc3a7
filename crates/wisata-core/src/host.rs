//! Host abstraction
//!
//! Components never touch `web_sys` directly. They talk to a [`Page`] (element
//! lookup, class/style mutation, scroll state, event listeners) and a
//! [`Scheduler`] (timeouts and intervals). The browser host lives in
//! `wisata-web`; tests use the in-memory host from `wisata-harness`.
//!
//! ```text
//! Site::mount ──► component::init(&Rc<H>) ──► Page::listen / Scheduler::set_*
//!                                                    │
//!                                                    ▼
//!                                              Subscription (cancel / detach)
//! ```

use std::cell::RefCell;
use std::rc::Rc;

/// Events the components subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Scroll,
    Load,
    Submit,
    DomContentLoaded,
}

impl EventKind {
    /// DOM event type name.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Scroll => "scroll",
            EventKind::Load => "load",
            EventKind::Submit => "submit",
            EventKind::DomContentLoaded => "DOMContentLoaded",
        }
    }
}

/// What a handler wants done with the event's default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Continue,
    PreventDefault,
}

/// Where a listener is attached.
#[derive(Debug)]
pub enum Target<'a, E> {
    Window,
    Document,
    Element(&'a E),
}

pub type Handler = Box<dyn Fn() -> EventOutcome>;

/// Handle to a registered listener or a pending timer.
///
/// `cancel()` removes the listener / clears the timer. Dropping the handle
/// detaches it instead: the callback stays registered for the life of the
/// page, which is how the site behaves when nothing tears it down.
#[must_use = "dropping a Subscription detaches it; call cancel() to remove it"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A handle with nothing behind it (e.g. a host that could not register the callback).
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Keep the callback alive and forget the handle.
    pub fn detach(self) {}
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}

/// Subscriptions created over a component's lifetime, including ones made
/// later from inside its own callbacks. Clones share the same set.
#[derive(Clone, Default)]
pub struct SubscriptionSet {
    inner: Rc<RefCell<Vec<Subscription>>>,
}

impl SubscriptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, subscription: Subscription) {
        self.inner.borrow_mut().push(subscription);
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Cancel and forget everything collected so far.
    pub fn cancel_all(&self) {
        let drained = std::mem::take(&mut *self.inner.borrow_mut());
        for subscription in drained {
            subscription.cancel();
        }
    }

    /// A single handle that cancels the whole set.
    pub fn to_subscription(&self) -> Subscription {
        let set = self.clone();
        Subscription::new(move || set.cancel_all())
    }
}

impl std::fmt::Debug for SubscriptionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionSet")
            .field("len", &self.len())
            .finish()
    }
}

/// The document as seen by a component.
///
/// Lookups that find nothing return `None` / empty; mutations on an element
/// that is no longer attached are silently ignored.
pub trait Page {
    type Element: Clone + 'static;

    // -- lookup --
    fn query(&self, selector: &str) -> Option<Self::Element>;
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
    fn query_within(&self, parent: &Self::Element, selector: &str) -> Vec<Self::Element>;
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
    fn body(&self) -> Option<Self::Element>;

    // -- tree --
    fn create_element(&self, tag: &str) -> Option<Self::Element>;
    fn append_child(&self, parent: &Self::Element, child: &Self::Element);
    /// Detach `element` from the tree. No-op if it is already gone.
    fn remove(&self, element: &Self::Element);

    // -- classes / attributes / content --
    fn add_class(&self, element: &Self::Element, class: &str);
    fn remove_class(&self, element: &Self::Element, class: &str);
    /// Returns whether the class is present afterwards.
    fn toggle_class(&self, element: &Self::Element, class: &str) -> bool;
    fn has_class(&self, element: &Self::Element, class: &str) -> bool;
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;
    fn set_style(&self, element: &Self::Element, property: &str, value: &str);
    fn inner_html(&self, element: &Self::Element) -> String;
    fn set_inner_html(&self, element: &Self::Element, html: &str);
    fn set_text(&self, element: &Self::Element, text: &str);
    fn set_disabled(&self, element: &Self::Element, disabled: bool);

    // -- forms --
    fn form_value(&self, form: &Self::Element, field: &str) -> Option<String>;
    fn reset_form(&self, form: &Self::Element);

    // -- geometry / scrolling --
    /// Distance from the top of the viewport to the element's top edge.
    fn viewport_top(&self, element: &Self::Element) -> f64;
    fn offset_height(&self, element: &Self::Element) -> f64;
    fn scroll_y(&self) -> f64;
    fn viewport_height(&self) -> f64;
    /// Smooth-scroll the window to an absolute document offset.
    fn scroll_to(&self, top: f64);
    /// True once the window `load` event has already fired.
    fn document_complete(&self) -> bool;

    // -- events --
    fn listen(
        &self,
        target: Target<'_, Self::Element>,
        event: EventKind,
        handler: Handler,
    ) -> Subscription;
}

/// Timer source. Delays are milliseconds.
pub trait Scheduler {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Subscription;
    fn set_interval(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> Subscription;
}

/// Everything a component needs from its environment.
pub trait Host: Page + Scheduler + 'static {}

impl<T: Page + Scheduler + 'static> Host for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_cancel_runs_once() {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let sub = Subscription::new(move || c.set(c.get() + 1));
        sub.cancel();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_drop_detaches_without_cancelling() {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        drop(Subscription::new(move || c.set(c.get() + 1)));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_set_cancels_late_additions() {
        let count = Rc::new(Cell::new(0));
        let set = SubscriptionSet::new();
        let handle = set.to_subscription();
        for _ in 0..3 {
            let c = count.clone();
            set.push(Subscription::new(move || c.set(c.get() + 1)));
        }

        handle.cancel();
        assert_eq!(count.get(), 3);
        assert!(set.is_empty());
    }

    #[test]
    fn test_event_names() {
        assert_eq!(EventKind::DomContentLoaded.as_str(), "DOMContentLoaded");
        assert_eq!(EventKind::Submit.as_str(), "submit");
    }
}
