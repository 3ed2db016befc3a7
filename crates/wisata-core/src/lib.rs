//! Wisata page behaviors
//!
//! Each component is a small piece of event wiring attached once on page load:
//! navigation toggle, anchor scrolling, reveal-on-scroll, back-to-top control,
//! staggered destination cards, the contact form, alert banners and the image
//! slider. Components are written against the [`host::Page`] and
//! [`host::Scheduler`] traits so the same code runs in the browser (see the
//! `wisata-web` crate) and against the in-memory harness in tests.

pub mod components;
pub mod config;
pub mod error;
pub mod host;
pub mod site;

pub use config::SiteConfig;
pub use error::{SiteError, ValidationError};
pub use host::{
    EventKind, EventOutcome, Host, Page, Scheduler, Subscription, SubscriptionSet, Target,
};
pub use site::Site;
