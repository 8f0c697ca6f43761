//! Toast queue and the notification sink that feeds it.
//!
//! DESIGN
//! ======
//! `ToastState` is a bounded FIFO of visible toasts. `ToastSink` adapts it to
//! the session crate's `NotificationSink` so every identity operation outcome
//! lands here. In the browser each toast dismisses itself after
//! [`TOAST_DURATION_MS`].

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use leptos::prelude::*;
use session::NotificationSink;

/// How long a toast stays on screen.
pub const TOAST_DURATION_MS: u64 = 4000;

/// Oldest toasts are dropped beyond this many.
pub const MAX_VISIBLE_TOASTS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Failure,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastState {
    next_id: u64,
    pub toasts: Vec<Toast>,
}

impl ToastState {
    /// Queue a toast and return its id.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast { id, kind, message: message.into() });
        if self.toasts.len() > MAX_VISIBLE_TOASTS {
            let excess = self.toasts.len() - MAX_VISIBLE_TOASTS;
            self.toasts.drain(..excess);
        }
        id
    }

    /// Remove a toast. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }
}

/// `NotificationSink` backed by the toast signal in context.
#[derive(Clone, Copy)]
pub struct ToastSink {
    toasts: RwSignal<ToastState>,
}

impl ToastSink {
    #[must_use]
    pub fn new(toasts: RwSignal<ToastState>) -> Self {
        Self { toasts }
    }

    fn show(&self, kind: ToastKind, message: &str) {
        let Some(id) = self.toasts.try_update(|state| state.push(kind, message)) else {
            log::debug!("toast dropped after unmount: {message}");
            return;
        };
        schedule_dismiss(self.toasts, id);
    }
}

impl NotificationSink for ToastSink {
    fn notify_success(&self, message: &str) {
        self.show(ToastKind::Success, message);
    }

    fn notify_failure(&self, message: &str) {
        self.show(ToastKind::Failure, message);
    }
}

fn schedule_dismiss(toasts: RwSignal<ToastState>, id: u64) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(std::time::Duration::from_millis(TOAST_DURATION_MS)).await;
        toasts.try_update(|state| state.dismiss(id));
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (toasts, id);
    }
}
