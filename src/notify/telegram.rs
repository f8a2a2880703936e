//! Telegram Bot API delivery via teloxide

use crate::errors::NotificationError;
use crate::notify::{MarkupMode, Notifier, TelegramChannel};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use teloxide::prelude::*;
use teloxide::types::{ParseMode, Recipient};
use teloxide::utils::{html, markdown};
use tokio::time::{sleep, Duration};
use tracing::debug;

/// Telegram rejects messages above 4096 characters. Chunks are measured after
/// escaping; the margin absorbs `<code>` tags inside lines that had to be cut.
pub const MAX_MESSAGE_CHARS: usize = 4000;

lazy_static! {
    static ref CODE_SPAN: Regex = Regex::new(r"`([^`\n]+)`").unwrap();
}

pub struct TelegramNotifier {
    config: TelegramChannel,
}

impl TelegramNotifier {
    pub fn new(config: TelegramChannel) -> Self {
        Self { config }
    }

    fn bot(&self) -> Result<Bot, NotificationError> {
        let bot = Bot::new(&self.config.bot_token);
        match &self.config.api_url {
            Some(api_url) => {
                let url = reqwest::Url::parse(api_url).map_err(|e| {
                    NotificationError::Telegram(format!("Invalid api_url '{}': {}", api_url, e))
                })?;
                Ok(bot.set_api_url(url))
            }
            None => Ok(bot),
        }
    }

    fn recipient(&self) -> Recipient {
        match self.config.chat_id.trim().parse::<i64>() {
            Ok(id) => Recipient::Id(ChatId(id)),
            Err(_) => Recipient::ChannelUsername(self.config.chat_id.trim().to_string()),
        }
    }
}

/// Escape `message` for the configured markup, keeping backtick spans as code
pub fn prepare_text(message: &str, mode: MarkupMode) -> String {
    match mode {
        MarkupMode::Html => escape_outside_code(message, html::escape, |code| {
            format!("<code>{}</code>", html::escape(code))
        }),
        MarkupMode::MarkdownV2 => escape_outside_code(message, markdown::escape, |code| {
            format!("`{}`", markdown::escape_code(code))
        }),
        MarkupMode::Markdown => {
            escape_outside_code(message, escape_legacy_markdown, |code| format!("`{}`", code))
        }
        MarkupMode::Plain => message.to_string(),
    }
}

fn escape_outside_code<E, C>(message: &str, escape: E, code: C) -> String
where
    E: Fn(&str) -> String,
    C: Fn(&str) -> String,
{
    let mut out = String::with_capacity(message.len());
    let mut last = 0;
    for caps in CODE_SPAN.captures_iter(message) {
        let Some(span) = caps.get(0) else {
            continue;
        };
        out.push_str(&escape(&message[last..span.start()]));
        out.push_str(&code(&caps[1]));
        last = span.end();
    }
    out.push_str(&escape(&message[last..]));
    out
}

/// Legacy Markdown only honours backslash escapes for `_ * [` and backticks
fn escape_legacy_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '_' | '*' | '[' | '`') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[allow(deprecated)]
fn parse_mode(mode: MarkupMode) -> Option<ParseMode> {
    match mode {
        MarkupMode::Html => Some(ParseMode::Html),
        MarkupMode::Markdown => Some(ParseMode::Markdown),
        MarkupMode::MarkdownV2 => Some(ParseMode::MarkdownV2),
        MarkupMode::Plain => None,
    }
}

/// Escaped message parts, each at most `limit` characters once escaped
///
/// The raw text is split first and every chunk is escaped on its own, so an
/// entity such as `&amp;` is never cut in half.
pub fn prepare_chunks(message: &str, mode: MarkupMode, limit: usize) -> Vec<String> {
    split_message_by(message, limit, |text| prepare_text(text, mode).chars().count())
        .iter()
        .map(|chunk| prepare_text(chunk, mode))
        .collect()
}

/// Split on line boundaries so each chunk stays under `limit` characters
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    split_message_by(text, limit, |part| part.chars().count())
}

/// Split on line boundaries with `measure` deciding how long a piece is
///
/// Lines longer than `limit` on their own are cut character by character.
///
/// # Arguments
/// * `text` - Raw message
/// * `limit` - Maximum measured length of a chunk
/// * `measure` - Length of a piece of text as it will be sent
///
/// # Returns
/// Raw chunks in order, pieces of a cut line each forming their own chunk
///
/// # Example
/// ```
/// use safe_queue_monitor::notify::telegram::split_message_by;
///
/// let chunks = split_message_by("a&b\nc", 4, |part| part.replace('&', "&amp;").chars().count());
/// assert_eq!(chunks, vec!["a", "&", "b", "c"]);
/// ```
pub fn split_message_by<F>(text: &str, limit: usize, measure: F) -> Vec<String>
where
    F: Fn(&str) -> usize,
{
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.lines() {
        let line_len = measure(line);

        if line_len > limit {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            chunks.extend(split_long_line(line, limit, &measure));
            continue;
        }

        let needed = if current.is_empty() { line_len } else { line_len + 1 };
        if current_len + needed > limit {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push('\n');
            current_len += 1;
        }
        current.push_str(line);
        current_len += line_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn split_long_line<F>(line: &str, limit: usize, measure: &F) -> Vec<String>
where
    F: Fn(&str) -> usize,
{
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_len = 0;
    let mut buf = [0u8; 4];

    for ch in line.chars() {
        let cost = measure(ch.encode_utf8(&mut buf)).max(1);
        if !piece.is_empty() && piece_len + cost > limit {
            pieces.push(std::mem::take(&mut piece));
            piece_len = 0;
        }
        piece.push(ch);
        piece_len += cost;
    }

    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn channel(&self) -> &str {
        "telegram"
    }

    async fn send(&self, message: &str) -> Result<(), NotificationError> {
        let bot = self.bot()?;
        let recipient = self.recipient();
        let parts = prepare_chunks(message, self.config.markup, MAX_MESSAGE_CHARS);

        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                sleep(Duration::from_millis(100)).await;
            }
            let mut request = bot
                .send_message(recipient.clone(), part.clone())
                .disable_notification(self.config.quiet);
            if let Some(mode) = parse_mode(self.config.markup) {
                request = request.parse_mode(mode);
            }
            request.await.map_err(|e| {
                NotificationError::Telegram(format!(
                    "chunk {}/{} to {}: {}",
                    i + 1,
                    parts.len(),
                    self.config.chat_id,
                    e
                ))
            })?;
            debug!("Sent chunk {}/{} to chat {}", i + 1, parts.len(), self.config.chat_id);
        }

        Ok(())
    }
}
