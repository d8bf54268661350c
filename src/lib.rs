//! Midnight Anarchy landing page.
//!
//! Ticket pricing, the session form cache, receipt handling, validation and
//! submission are plain Rust behind the [`surface`] traits so they can be
//! exercised natively. The [`page`] module binds them to the real DOM and starts
//! the ambient widgets once the document is ready.

use wasm_bindgen::prelude::*;

pub mod cache;
pub mod config;
pub mod error;
pub mod form;
pub mod price;
pub mod receipt;
pub mod rng;
pub mod submission;
pub mod surface;
pub mod theme;

mod dom;
pub mod page;
pub mod widgets;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    if let Err(err) = page::web_theme::install_global() {
        gloo::console::error!(format!("theme api: {}", dom::js_error_message(&err)));
    }
    if let Err(err) = page::start() {
        gloo::console::error!(format!("startup failed: {}", dom::js_error_message(&err)));
    }
}

// -----------------------------------------------------------------------------
// Theme controls for inline scripts (also published as `window.MidnightAnarchy`)
// -----------------------------------------------------------------------------

/// Switch the page theme. Unknown names fall back to the default; returns the
/// theme actually applied.
#[wasm_bindgen(js_name = setTheme)]
pub fn set_theme(name: &str) -> String {
    page::web_theme::apply(name).as_str().to_string()
}

#[wasm_bindgen(js_name = getTheme)]
pub fn get_theme() -> String {
    page::web_theme::current().as_str().to_string()
}

/// Names accepted by `setTheme`.
#[wasm_bindgen]
pub fn themes() -> js_sys::Array {
    page::web_theme::names()
}
