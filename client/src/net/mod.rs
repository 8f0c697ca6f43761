//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `identity` selects and wires the identity backend the app talks to;
//! `oauth` runs the provider popup behind federated sign-in.

pub mod identity;
pub mod oauth;
