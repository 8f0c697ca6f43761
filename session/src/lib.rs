//! Auth session core for the Gov-X client.
//!
//! This crate owns the session model shared by the Leptos `client` and any
//! native tooling: the [`AuthSessionManager`] that mediates identity
//! operations, the single-writer [`SessionStore`] it drives, and the
//! [`IdentityBackend`] / [`NotificationSink`] seams it talks through.
//!
//! Two backends ship with the crate: [`memory::MemoryBackend`] for tests and
//! local development, and [`firebase::FirebaseBackend`] for the Identity
//! Toolkit REST API.

pub mod backend;
pub mod config;
pub mod error;
pub mod firebase;
pub mod identity;
pub mod listeners;
pub mod manager;
pub mod memory;
pub mod notify;
pub mod store;
pub mod validate;

pub use backend::IdentityBackend;
pub use config::{ConfigError, IdentityConfig};
pub use error::{AuthError, BackendError, InputError, RejectionKind};
pub use identity::{Identity, Session};
pub use listeners::{ListenerSet, SessionListener, Subscription};
pub use manager::{AuthSessionManager, Operation, Outcome};
pub use notify::{LogSink, NotificationSink};
pub use store::{LoadingGuard, SessionReader, SessionSnapshot, SessionStatus, SessionStore};
