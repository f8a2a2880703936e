//! Notification dispatch tests
//!
//! Fan-out semantics with in-process notifiers, plus webhook and Telegram
//! delivery against local wiremock servers.

use async_trait::async_trait;
use safe_queue_monitor::errors::NotificationError;
use safe_queue_monitor::notify::{
    deliver, dispatch, ChannelConfig, MarkupMode, Notifier, TelegramChannel, TelegramNotifier,
    WebhookChannel, WebhookNotifier,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Barrier;
use tokio::time::timeout;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MESSAGE: &str = "🔷 MAINNET #15 `1/3`\n⏳ Pending: bob\n@bob: 1 pending signature";

struct RecordingNotifier {
    name: &'static str,
    fail: bool,
    received: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn channel(&self) -> &str {
        self.name
    }

    async fn send(&self, message: &str) -> Result<(), NotificationError> {
        self.received.lock().unwrap().push(message.to_string());
        if self.fail {
            Err(NotificationError::SendFailed("unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

/// Completes only once every notifier sharing the barrier has started
struct RendezvousNotifier {
    name: &'static str,
    barrier: Arc<Barrier>,
    fail: bool,
}

#[async_trait]
impl Notifier for RendezvousNotifier {
    fn channel(&self) -> &str {
        self.name
    }

    async fn send(&self, _message: &str) -> Result<(), NotificationError> {
        self.barrier.wait().await;
        if self.fail {
            Err(NotificationError::Telegram("chat not found".to_string()))
        } else {
            Ok(())
        }
    }
}

fn webhook(server: &MockServer, route: &str) -> WebhookChannel {
    let mut headers = BTreeMap::new();
    headers.insert("Authorization".to_string(), "Bearer abc".to_string());
    WebhookChannel {
        enabled: true,
        url: format!("{}{}", server.uri(), route),
        headers,
    }
}

#[tokio::test]
async fn test_one_failure_does_not_block_others() {
    let received = Arc::new(Mutex::new(Vec::new()));
    let notifiers: Vec<Box<dyn Notifier>> = vec![
        Box::new(RecordingNotifier {
            name: "first",
            fail: false,
            received: received.clone(),
        }),
        Box::new(RecordingNotifier {
            name: "broken",
            fail: true,
            received: received.clone(),
        }),
        Box::new(RecordingNotifier {
            name: "last",
            fail: false,
            received: received.clone(),
        }),
    ];

    let report = deliver(MESSAGE, &notifiers).await;

    assert_eq!(received.lock().unwrap().len(), 3);
    assert_eq!(report.delivered(), 2);
    assert!(!report.all_succeeded());

    let channels: Vec<&str> = report.outcomes.iter().map(|o| o.channel.as_str()).collect();
    assert_eq!(channels, vec!["first", "broken", "last"]);

    let failures = report.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "broken");
}

#[tokio::test]
async fn test_channels_are_sent_concurrently() {
    let barrier = Arc::new(Barrier::new(3));
    let notifiers: Vec<Box<dyn Notifier>> = ["console", "telegram", "webhook"]
        .into_iter()
        .map(|name| {
            Box::new(RendezvousNotifier {
                name,
                barrier: barrier.clone(),
                fail: name == "telegram",
            }) as Box<dyn Notifier>
        })
        .collect();

    let report = timeout(Duration::from_secs(5), deliver(MESSAGE, &notifiers))
        .await
        .expect("channels were not sent concurrently");

    // Every channel finished, including the ones after the failure
    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.delivered(), 2);
    assert_eq!(report.failures()[0].0, "telegram");
}

#[tokio::test]
async fn test_no_notifiers_is_trivially_successful() {
    let report = deliver(MESSAGE, &[]).await;
    assert!(report.outcomes.is_empty());
    assert!(report.all_succeeded());
}

#[tokio::test]
async fn test_webhook_posts_payload_with_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hooks/safe"))
        .and(header("Authorization", "Bearer abc"))
        .and(body_partial_json(json!({
            "text": MESSAGE,
            "source": "safe-queue-monitor"
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    WebhookNotifier::new(webhook(&server, "/hooks/safe"))
        .send(MESSAGE)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_webhook_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let error = WebhookNotifier::new(webhook(&server, "/hooks/safe"))
        .send(MESSAGE)
        .await
        .unwrap_err();

    assert!(matches!(error, NotificationError::Http { status: 500 }));
}

#[tokio::test]
async fn test_dispatch_skips_disabled_channels() {
    let healthy = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&healthy)
        .await;
    let failing = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&failing)
        .await;

    let channels = vec![
        ChannelConfig::Webhook(webhook(&healthy, "/ok")),
        ChannelConfig::Telegram(TelegramChannel {
            enabled: false,
            bot_token: "123:abc".to_string(),
            chat_id: "-100123".to_string(),
            quiet: false,
            markup: MarkupMode::Html,
            api_url: None,
        }),
        ChannelConfig::Webhook(webhook(&failing, "/down")),
    ];

    let report = dispatch(MESSAGE, &channels).await;

    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.delivered(), 1);
    assert!(matches!(
        report.failures()[0].1,
        NotificationError::Http { status: 502 }
    ));
}

#[tokio::test]
async fn test_telegram_api_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        })))
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(TelegramChannel {
        enabled: true,
        bot_token: "123:abc".to_string(),
        chat_id: "-100123".to_string(),
        quiet: true,
        markup: MarkupMode::Html,
        api_url: Some(server.uri()),
    });

    let error = notifier.send(MESSAGE).await.unwrap_err();
    assert!(matches!(error, NotificationError::Telegram(_)));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.path().to_lowercase().ends_with("/sendmessage"));

    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["chat_id"], json!(-100123));
    assert_eq!(body["parse_mode"], json!("HTML"));
    assert!(body["text"]
        .as_str()
        .unwrap()
        .contains("<code>1/3</code>"));
}

#[tokio::test]
async fn test_telegram_rejects_invalid_api_url() {
    let notifier = TelegramNotifier::new(TelegramChannel {
        enabled: true,
        bot_token: "123:abc".to_string(),
        chat_id: "@ops".to_string(),
        quiet: false,
        markup: MarkupMode::Plain,
        api_url: Some("not a url".to_string()),
    });

    let error = notifier.send(MESSAGE).await.unwrap_err();
    assert!(matches!(error, NotificationError::Telegram(_)));
}
