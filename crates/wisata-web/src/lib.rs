//! Wisata page behaviors - browser entry point
//!
//! Builds a [`host::WebHost`] over `window`/`document`, reads the optional
//! inline JSON config and mounts every component once the document has been
//! parsed. Native builds compile to an empty crate so the workspace tests run
//! without a browser.

#[cfg(target_arch = "wasm32")]
pub mod boot;
#[cfg(target_arch = "wasm32")]
pub mod host;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    if let Err(err) = boot::run() {
        tracing::error!(%err, "wisata behaviors not started");
    }
}

/// Tear down every mounted behavior (listeners and timers).
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(js_name = wisataTeardown)]
pub fn teardown() {
    boot::teardown();
}
