use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::types::NotificationError;

/// Trait for push notification delivery services.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one message to the push endpoint.
    async fn notify(&self, message: &str) -> Result<(), NotificationError>;
}

/// Push client that publishes raw UTF-8 bodies to an ntfy.sh topic.
pub struct NtfyClient {
    client: Client,
    url: String,
}

impl NtfyClient {
    /// Create a client for the given ntfy.sh topic.
    pub fn new(topic: &str) -> Result<Self, NotificationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| NotificationError::Delivery(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: format!("https://ntfy.sh/{}", topic),
        })
    }
}

#[async_trait]
impl Notifier for NtfyClient {
    async fn notify(&self, message: &str) -> Result<(), NotificationError> {
        debug!("Publishing notification to {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .body(message.to_string())
            .send()
            .await
            .map_err(|e| NotificationError::Delivery(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(NotificationError::Endpoint(format!(
                "HTTP {}",
                response.status()
            )));
        }

        info!("Notification sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_topic_url() {
        let client = NtfyClient::new("aolinpike-2025aug").unwrap();
        assert_eq!(client.url, "https://ntfy.sh/aolinpike-2025aug");
    }
}
