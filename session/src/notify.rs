//! Notification sink seam for operation outcomes.

/// Receives one message per completed identity operation. Implementations
/// must not block.
pub trait NotificationSink: Send + Sync {
    fn notify_success(&self, message: &str);
    fn notify_failure(&self, message: &str);
}

/// Sink that writes outcomes to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify_success(&self, message: &str) {
        log::info!(target: "govx::notify", "{message}");
    }

    fn notify_failure(&self, message: &str) {
        log::warn!(target: "govx::notify", "{message}");
    }
}
