//! Console adapter for development/testing
//!
//! Reads one event per line from stdin. A line holding a JSON object is parsed as a
//! full event (`{"author", "content", "embeds", "channel"}`); any other line becomes
//! a plain text event from the `console` author.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::application::errors::BotError;
use crate::domain::entities::{ChannelRef, MessageEvent};
use crate::domain::traits::{ChatSink, SinkInfo};

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: SinkInfo,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: SinkInfo {
                platform: "console".to_string(),
                name: "pokeguesser".to_string(),
            },
        }
    }

    /// Forward stdin lines as events until EOF
    pub async fn read_events(&self, events: mpsc::UnboundedSender<MessageEvent>) -> Result<(), BotError> {
        forward_lines(BufReader::new(tokio::io::stdin()), events).await
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse one input line into an event
pub fn parse_line(line: &str) -> Option<MessageEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if line.starts_with('{') {
        match serde_json::from_str::<MessageEvent>(line) {
            Ok(event) => return Some(event),
            Err(e) => {
                tracing::warn!("Ignoring malformed event: {}", e);
                return None;
            }
        }
    }

    Some(MessageEvent::new("console", ChannelRef::new("console")).with_content(line))
}

async fn forward_lines<R>(reader: R, events: mpsc::UnboundedSender<MessageEvent>) -> Result<(), BotError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(event) = parse_line(&line) {
            if events.send(event).is_err() {
                break;
            }
        }
    }
    Ok(())
}

#[async_trait]
impl ChatSink for ConsoleAdapter {
    async fn send_message(&self, channel: &ChannelRef, text: &str) -> Result<(), BotError> {
        println!("[BOT #{}] {}", channel, text);
        Ok(())
    }

    fn sink_info(&self) -> SinkInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_line() {
        let event = parse_line(
            r#"{"author": "Pokécord#4503", "embeds": [{"image": {"url": "https://x/PokecordSpawn.png"}}], "channel": "7"}"#,
        )
        .unwrap();
        assert_eq!(event.author, "Pokécord#4503");
        assert_eq!(event.channel.as_str(), "7");
    }

    #[test]
    fn test_parse_plain_line() {
        let event = parse_line("hello there").unwrap();
        assert_eq!(event.author, "console");
        assert_eq!(event.content, "hello there");
        assert!(event.embeds.is_empty());
    }

    #[test]
    fn test_skip_blank_and_malformed() {
        assert!(parse_line("   ").is_none());
        assert!(parse_line("{not json").is_none());
    }

    #[tokio::test]
    async fn test_forward_lines() {
        let input = "one\n\n{\"author\": \"a\", \"channel\": \"1\"}\ntwo\n";
        let (tx, mut rx) = mpsc::unbounded_channel();
        forward_lines(input.as_bytes(), tx).await.unwrap();

        let mut authors = Vec::new();
        while let Some(event) = rx.recv().await {
            authors.push(event.author);
        }
        assert_eq!(authors, vec!["console", "a", "console"]);
    }
}
