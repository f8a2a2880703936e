use crate::errors::NotificationError;
use crate::notify::{Notifier, WebhookChannel};
use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::time::Duration;

pub const WEBHOOK_TIMEOUT_SECONDS: u64 = 20;

/// JSON body posted to webhook endpoints
#[derive(Debug, Serialize)]
pub struct WebhookPayload<'a> {
    pub text: &'a str,
    /// RFC 3339 send time
    pub timestamp: String,
    pub source: &'static str,
}

pub struct WebhookNotifier {
    client: reqwest::Client,
    config: WebhookChannel,
}

impl WebhookNotifier {
    pub fn new(config: WebhookChannel) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn channel(&self) -> &str {
        "webhook"
    }

    async fn send(&self, message: &str) -> Result<(), NotificationError> {
        let payload = WebhookPayload {
            text: message,
            timestamp: Utc::now().to_rfc3339(),
            source: env!("CARGO_PKG_NAME"),
        };

        let mut request = self
            .client
            .post(&self.config.url)
            .timeout(Duration::from_secs(WEBHOOK_TIMEOUT_SECONDS))
            .json(&payload);
        for (name, value) in &self.config.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| NotificationError::SendFailed(format!("{}: {}", self.config.url, e)))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(NotificationError::Http {
                status: status.as_u16(),
            })
        }
    }
}
