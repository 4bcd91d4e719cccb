/// Errors raised while delivering a push notification.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// Transport failure while talking to the push endpoint.
    #[error("Push delivery failed: {0}")]
    Delivery(String),

    /// Push endpoint returned a non-success status.
    #[error("Push endpoint error: {0}")]
    Endpoint(String),
}
