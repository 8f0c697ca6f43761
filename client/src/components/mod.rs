//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shared chrome (navigation, toasts, spinners) while
//! reading shared state from Leptos context providers.

pub mod loading;
pub mod navbar;
pub mod toaster;
