//! Response scheduler - hint, delay, then the action message

use std::sync::Arc;
use std::time::Duration;

use crate::application::errors::BotError;
use crate::domain::entities::{ChannelRef, Prediction, SequenceState};
use crate::domain::traits::ChatSink;
use super::hint::{hint_message, mask_label};
use super::sequence::SequenceTracker;

/// Default command the action message starts with
pub const DEFAULT_COMMAND_PREFIX: &str = "p!catch";

/// Sends the timed response for a classified trigger.
///
/// Holds no lock while sleeping, so any number of sequences may wait at once.
pub struct ResponseScheduler {
    sink: Arc<dyn ChatSink>,
    hints_enabled: bool,
    delay: Duration,
    command_prefix: String,
}

impl ResponseScheduler {
    pub fn new(sink: Arc<dyn ChatSink>, hints_enabled: bool, delay: Duration) -> Self {
        Self {
            sink,
            hints_enabled,
            delay,
            command_prefix: DEFAULT_COMMAND_PREFIX.to_string(),
        }
    }

    pub fn with_command_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.command_prefix = prefix.into();
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// `<command-prefix> <label>`
    pub fn action_message(&self, label: &str) -> String {
        format!("{} {}", self.command_prefix, label)
    }

    /// Run the post-classification part of a sequence to completion
    pub async fn respond(
        &self,
        channel: &ChannelRef,
        prediction: &Prediction,
        seq: &mut SequenceTracker,
    ) -> Result<(), BotError> {
        let delay_secs = self.delay.as_secs();

        let hint = if self.hints_enabled && delay_secs > 0 {
            mask_label(&prediction.label)
        } else {
            None
        };

        match hint {
            Some(masked) => {
                self.sink.send_message(channel, &hint_message(&masked, delay_secs)).await?;
                seq.advance(SequenceState::HintSent);
            }
            None => {
                seq.advance(SequenceState::NoHint);
            }
        }

        seq.advance(SequenceState::Delaying);
        tokio::time::sleep(self.delay).await;

        self.sink.send_message(channel, &self.action_message(&prediction.label)).await?;
        seq.advance(SequenceState::Completed);

        tracing::info!(
            "[{}] Sent '{}' to {} (confidence {:.3})",
            seq.id(),
            self.action_message(&prediction.label),
            channel,
            prediction.confidence
        );
        Ok(())
    }
}
