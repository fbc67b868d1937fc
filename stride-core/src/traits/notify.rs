//! Telemetry notifications

/// Receives raw notification payloads
///
/// Called from the transport's notification path, so implementations must
/// return quickly and never block.
pub trait NotificationHandler {
    /// Handle one notification payload
    fn on_notification(&self, payload: &[u8]);
}

impl<F: Fn(&[u8])> NotificationHandler for F {
    fn on_notification(&self, payload: &[u8]) {
        self(payload)
    }
}

/// Notifying characteristic carrying treadmill data
///
/// Payloads are delivered to the registered handler in arrival order, at
/// most once each. Lost notifications are not replayed.
#[allow(async_fn_in_trait)]
pub trait NotificationSource<H: NotificationHandler> {
    /// Error type for subscription operations
    type Error;

    /// Register `handler` and enable notifications
    async fn subscribe(&mut self, handler: H) -> Result<(), Self::Error>;

    /// Disable notifications and drop the handler
    async fn unsubscribe(&mut self) -> Result<(), Self::Error>;

    /// Check whether the link to the machine is still up
    async fn is_connected(&mut self) -> bool;
}
