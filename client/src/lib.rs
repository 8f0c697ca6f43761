//! # client
//!
//! Leptos + WASM front end for Gov-X.
//!
//! Pages consume the shared [`session::AuthSessionManager`] through Leptos
//! context: auth state is mirrored into a signal, operation outcomes become
//! toasts, and scroll position is exposed as direction / threshold signals.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
