//! Trigger filter - decides whether an event is a classification opportunity

use crate::domain::entities::{MessageEvent, TriggerDecision};

/// Matches spawn announcements from the target author
#[derive(Debug, Clone)]
pub struct TriggerFilter {
    target_author: String,
    spawn_marker: String,
}

impl TriggerFilter {
    pub fn new(target_author: impl Into<String>, spawn_marker: impl Into<String>) -> Self {
        Self {
            target_author: target_author.into(),
            spawn_marker: spawn_marker.into(),
        }
    }

    pub fn target_author(&self) -> &str {
        &self.target_author
    }

    /// Inspect an event. Only the first embed is considered.
    pub fn evaluate(&self, event: &MessageEvent) -> TriggerDecision {
        if event.author != self.target_author {
            return TriggerDecision::ignored();
        }

        let Some(url) = event.embeds.first().and_then(|e| e.image_url()) else {
            return TriggerDecision::ignored();
        };

        if self.has_marker(url) {
            TriggerDecision::matched(url)
        } else {
            TriggerDecision::ignored()
        }
    }

    /// Split on path and extension separators and look for the marker as a whole token
    fn has_marker(&self, url: &str) -> bool {
        url.split(['/', '.']).any(|token| token == self.spawn_marker)
    }
}
