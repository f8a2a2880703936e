use crate::errors::NotificationError;
use crate::monitor::formatter::{
    LINK_MARKER, NOTE_MARKER, PENDING_MARKER, SIGNED_MARKER, SUMMARY_MARKER, UNRESOLVED_MARKER,
};
use crate::notify::Notifier;
use async_trait::async_trait;
use std::io::Write;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Writes the message to stdout, optionally with ANSI colours
pub struct ConsoleNotifier {
    colored: bool,
}

impl ConsoleNotifier {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    pub fn render(&self, message: &str) -> String {
        if !self.colored {
            return message.to_string();
        }
        message
            .lines()
            .map(colorize_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn colorize_line(line: &str) -> String {
    let style = if line.is_empty() {
        return String::new();
    } else if line.starts_with(LINK_MARKER) || line.starts_with(UNRESOLVED_MARKER) {
        DIM
    } else if line.starts_with(PENDING_MARKER) {
        YELLOW
    } else if line.starts_with(SIGNED_MARKER) {
        GREEN
    } else if line.starts_with(NOTE_MARKER) {
        CYAN
    } else if line.starts_with(SUMMARY_MARKER) {
        return format!("{}{}{}{}", BOLD, YELLOW, line, RESET);
    } else {
        BOLD
    };
    format!("{}{}{}", style, line, RESET)
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    fn channel(&self) -> &str {
        "console"
    }

    async fn send(&self, message: &str) -> Result<(), NotificationError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", self.render(message))
            .and_then(|_| stdout.flush())
            .map_err(|e| NotificationError::SendFailed(format!("stdout: {}", e)))
    }
}
