use async_trait::async_trait;
use crate::domain::entities::ChannelRef;
use crate::application::errors::BotError;

/// ChatSink trait - abstraction for writing back to the message stream
#[async_trait]
pub trait ChatSink: Send + Sync {
    /// Send a plain text message to a channel
    async fn send_message(&self, channel: &ChannelRef, text: &str) -> Result<(), BotError>;

    /// Describe the sink for logging
    fn sink_info(&self) -> SinkInfo;
}

/// Sink information
#[derive(Debug, Clone)]
pub struct SinkInfo {
    pub platform: String,
    pub name: String,
}
