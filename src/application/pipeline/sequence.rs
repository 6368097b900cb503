//! Per-trigger sequence tracking

use uuid::Uuid;

use crate::domain::entities::SequenceState;

/// Tracks one trigger-to-action lifecycle
#[derive(Debug)]
pub struct SequenceTracker {
    id: Uuid,
    state: SequenceState,
}

impl SequenceTracker {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SequenceState::Idle,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    /// Move forward. Illegal transitions are logged and ignored.
    pub fn advance(&mut self, next: SequenceState) -> bool {
        if !self.state.can_advance_to(next) {
            tracing::warn!("[{}] Ignoring transition {} -> {}", self.id, self.state, next);
            return false;
        }
        tracing::debug!("[{}] {} -> {}", self.id, self.state, next);
        self.state = next;
        true
    }
}

impl Default for SequenceTracker {
    fn default() -> Self {
        Self::new()
    }
}
