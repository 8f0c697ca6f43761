//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (calling the auth manager,
//! navigating on success) and delegates rendering details to `components`.

pub mod auth;
pub mod dashboard;
pub mod forgot_password;
pub mod home;
