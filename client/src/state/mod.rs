//! Client-side state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Plain data types mirrored into `RwSignal`s by the app root. Pure logic
//! lives here so it can be unit tested without a browser.

pub mod auth;
pub mod scroll;
pub mod toast;
