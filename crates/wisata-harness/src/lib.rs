//! Test harness for wisata components
//!
//! [`FakeHost`] implements both host traits in memory:
//! - an element tree rooted at `<body>`, queried with full CSS selectors
//!   through `scraper`,
//! - window scroll / viewport state and listener dispatch,
//! - a [`clock::ManualClock`] that only moves when a test calls `advance`.

pub mod clock;
pub mod dom;

pub use clock::ManualClock;
pub use dom::{ElementSpec, FakeHost, NodeId};

/// Route `tracing` output through the test writer. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("wisata_core=debug")),
        )
        .with_test_writer()
        .try_init();
}
