//! Notification delivery
//!
//! - **ChannelConfig** - Closed set of channel kinds read from configuration
//! - **Notifier** - One delivery target (console, Telegram bot, webhook)
//! - **Dispatcher** - Concurrent fan-out with per-channel failure reporting

pub mod console;
pub mod telegram;
pub mod webhook;

pub use console::ConsoleNotifier;
pub use telegram::TelegramNotifier;
pub use webhook::WebhookNotifier;

use crate::errors::NotificationError;
use crate::types::MonitorResult;
use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use tracing::{error, info};

fn enabled_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChannelConfig {
    Console(ConsoleChannel),
    #[serde(alias = "chatbot")]
    Telegram(TelegramChannel),
    Webhook(WebhookChannel),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleChannel {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub colored: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramChannel {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    pub bot_token: String,
    /// Numeric chat id or `@channelusername`
    #[serde(deserialize_with = "string_or_integer")]
    pub chat_id: String,
    /// Deliver without a notification sound
    #[serde(default)]
    pub quiet: bool,
    #[serde(default)]
    pub markup: MarkupMode,
    /// Alternative Bot API server (self-hosted or test double)
    #[serde(default)]
    pub api_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupMode {
    #[default]
    Html,
    Markdown,
    MarkdownV2,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookChannel {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    pub url: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

fn string_or_integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

impl ChannelConfig {
    pub fn name(&self) -> &'static str {
        match self {
            ChannelConfig::Console(_) => "console",
            ChannelConfig::Telegram(_) => "telegram",
            ChannelConfig::Webhook(_) => "webhook",
        }
    }

    pub fn is_enabled(&self) -> bool {
        match self {
            ChannelConfig::Console(c) => c.enabled,
            ChannelConfig::Telegram(c) => c.enabled,
            ChannelConfig::Webhook(c) => c.enabled,
        }
    }

    /// Type raw channel tables; unknown or malformed entries become warnings
    pub fn parse_all(raw: &[serde_json::Value]) -> (Vec<ChannelConfig>, Vec<String>) {
        let mut channels = Vec::new();
        let mut warnings = Vec::new();

        for (index, value) in raw.iter().enumerate() {
            match serde_json::from_value::<ChannelConfig>(value.clone()) {
                Ok(channel) => channels.push(channel),
                Err(e) => {
                    let kind = value
                        .get("type")
                        .and_then(|t| t.as_str())
                        .unwrap_or("<missing type>");
                    warnings.push(format!(
                        "Ignoring channel #{} ({}): {}",
                        index + 1,
                        kind,
                        e
                    ));
                }
            }
        }

        (channels, warnings)
    }

    pub fn notifier(&self) -> Box<dyn Notifier> {
        match self {
            ChannelConfig::Console(c) => Box::new(ConsoleNotifier::new(c.colored)),
            ChannelConfig::Telegram(c) => Box::new(TelegramNotifier::new(c.clone())),
            ChannelConfig::Webhook(c) => Box::new(WebhookNotifier::new(c.clone())),
        }
    }
}

/// Notify only when something is queued and at least one channel is on
pub fn should_notify(result: &MonitorResult, channels: &[ChannelConfig]) -> bool {
    result.total_transactions > 0 && channels.iter().any(ChannelConfig::is_enabled)
}

#[async_trait]
pub trait Notifier: Send + Sync {
    fn channel(&self) -> &str;
    async fn send(&self, message: &str) -> Result<(), NotificationError>;
}

#[derive(Debug)]
pub struct ChannelOutcome {
    pub channel: String,
    pub result: Result<(), NotificationError>,
}

/// Per-channel delivery results, in channel order
#[derive(Debug, Default)]
pub struct DispatchReport {
    pub outcomes: Vec<ChannelOutcome>,
}

impl DispatchReport {
    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failures(&self) -> Vec<(&str, &NotificationError)> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.result {
                Ok(()) => None,
                Err(e) => Some((o.channel.as_str(), e)),
            })
            .collect()
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

/// Deliver `message` to every enabled channel
pub async fn dispatch(message: &str, channels: &[ChannelConfig]) -> DispatchReport {
    let notifiers: Vec<Box<dyn Notifier>> = channels
        .iter()
        .filter(|channel| channel.is_enabled())
        .map(ChannelConfig::notifier)
        .collect();
    deliver(message, &notifiers).await
}

/// Send concurrently and wait for every notifier to finish or fail
pub async fn deliver(message: &str, notifiers: &[Box<dyn Notifier>]) -> DispatchReport {
    let results = join_all(notifiers.iter().map(|notifier| notifier.send(message))).await;

    let report = DispatchReport {
        outcomes: notifiers
            .iter()
            .zip(results)
            .map(|(notifier, result)| ChannelOutcome {
                channel: notifier.channel().to_string(),
                result,
            })
            .collect(),
    };

    let failures = report.failures();
    if failures.is_empty() {
        info!("Notification delivered to {} channel(s)", report.delivered());
    } else {
        let details: Vec<String> = failures
            .iter()
            .map(|(channel, e)| format!("{}: {}", channel, e))
            .collect();
        error!(
            "{} of {} channel(s) failed: {}",
            failures.len(),
            report.outcomes.len(),
            details.join("; ")
        );
    }

    report
}
