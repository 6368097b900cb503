//! Discord adapter
//!
//! Receives gateway messages through serenity and writes back over its HTTP client.

use std::sync::Arc;

use serenity::all::{ChannelId, Context, EventHandler, GatewayIntents, Http, Message, Ready};
use serenity::async_trait;
use serenity::Client;
use tokio::sync::mpsc;

use crate::application::errors::BotError;
use crate::domain::entities::{ChannelRef, Embed, EmbedImage, MessageEvent};
use crate::domain::traits::{ChatSink, SinkInfo};

/// Discord gateway adapter
pub struct DiscordAdapter {
    token: String,
    http: Arc<Http>,
}

impl DiscordAdapter {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            http: Arc::new(Http::new(&token)),
            token,
        }
    }

    /// Gateway intents needed to see message embeds in guilds and DMs
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
    }

    /// Connect and forward every message until the gateway session ends
    pub async fn run(&self, events: mpsc::UnboundedSender<MessageEvent>) -> Result<(), BotError> {
        let mut client = Client::builder(&self.token, Self::intents())
            .event_handler(GatewayHandler { events })
            .await
            .map_err(|e| BotError::Auth(e.to_string()))?;

        client
            .start()
            .await
            .map_err(|e| BotError::Network(e.to_string()))
    }
}

/// Build a stream event from the parts of a gateway message
pub fn event_from_parts(
    author: impl Into<String>,
    content: impl Into<String>,
    image_urls: impl IntoIterator<Item = Option<String>>,
    channel_id: impl Into<String>,
) -> MessageEvent {
    let mut event = MessageEvent::new(author, ChannelRef::new(channel_id)).with_content(content);
    event.embeds = image_urls
        .into_iter()
        .map(|url| Embed {
            image: url.map(|url| EmbedImage { url }),
        })
        .collect();
    event
}

fn to_event(msg: &Message) -> MessageEvent {
    event_from_parts(
        msg.author.tag(),
        msg.content.clone(),
        msg.embeds.iter().map(|e| e.image.as_ref().map(|i| i.url.clone())),
        msg.channel_id.to_string(),
    )
}

struct GatewayHandler {
    events: mpsc::UnboundedSender<MessageEvent>,
}

#[async_trait]
impl EventHandler for GatewayHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        tracing::info!("Connected to Discord as: {}", ready.user.tag());
    }

    async fn message(&self, _ctx: Context, msg: Message) {
        if self.events.send(to_event(&msg)).is_err() {
            tracing::warn!("Listener stopped, dropping message {}", msg.id);
        }
    }
}

#[async_trait]
impl ChatSink for DiscordAdapter {
    async fn send_message(&self, channel: &ChannelRef, text: &str) -> Result<(), BotError> {
        let id: u64 = channel
            .as_str()
            .parse()
            .ok()
            .filter(|id| *id != 0)
            .ok_or_else(|| BotError::Parse(format!("invalid channel id: {}", channel)))?;

        ChannelId::new(id)
            .say(self.http.as_ref(), text)
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;
        Ok(())
    }

    fn sink_info(&self) -> SinkInfo {
        SinkInfo {
            platform: "discord".to_string(),
            name: "pokeguesser".to_string(),
        }
    }
}
