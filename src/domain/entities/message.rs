use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to the channel a message arrived on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ChannelRef(pub String);

impl ChannelRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Image attached to an embed
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmbedImage {
    pub url: String,
}

/// Rich embed carried by a message
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Embed {
    #[serde(default)]
    pub image: Option<EmbedImage>,
}

impl Embed {
    pub fn with_image(url: impl Into<String>) -> Self {
        Self {
            image: Some(EmbedImage { url: url.into() }),
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image.as_ref().map(|i| i.url.as_str())
    }
}

/// One inbound message from the stream
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessageEvent {
    pub author: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub embeds: Vec<Embed>,
    pub channel: ChannelRef,
    #[serde(default = "Utc::now")]
    pub received_at: DateTime<Utc>,
}

impl MessageEvent {
    pub fn new(author: impl Into<String>, channel: ChannelRef) -> Self {
        Self {
            author: author.into(),
            content: String::new(),
            embeds: Vec::new(),
            channel,
            received_at: Utc::now(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn with_image(self, url: impl Into<String>) -> Self {
        self.with_embed(Embed::with_image(url))
    }
}
