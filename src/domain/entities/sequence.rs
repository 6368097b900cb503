use std::fmt;

/// Outcome of inspecting one event for a trigger
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TriggerDecision {
    pub matched: bool,
    pub image_url: Option<String>,
}

impl TriggerDecision {
    pub fn matched(url: impl Into<String>) -> Self {
        Self {
            matched: true,
            image_url: Some(url.into()),
        }
    }

    pub fn ignored() -> Self {
        Self::default()
    }
}

/// Lifecycle of one trigger-to-action sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceState {
    Idle,
    Acquiring,
    Classifying,
    HintSent,
    NoHint,
    Delaying,
    Completed,
    Failed,
}

impl SequenceState {
    pub fn as_str(&self) -> &str {
        match self {
            SequenceState::Idle => "idle",
            SequenceState::Acquiring => "acquiring",
            SequenceState::Classifying => "classifying",
            SequenceState::HintSent => "hint_sent",
            SequenceState::NoHint => "no_hint",
            SequenceState::Delaying => "delaying",
            SequenceState::Completed => "completed",
            SequenceState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SequenceState::Completed | SequenceState::Failed)
    }

    /// Whether `next` is a legal successor of this state
    pub fn can_advance_to(&self, next: SequenceState) -> bool {
        use SequenceState::*;
        matches!(
            (self, next),
            (Idle, Acquiring)
                | (Acquiring, Classifying)
                | (Acquiring, Failed)
                | (Classifying, HintSent)
                | (Classifying, NoHint)
                | (Classifying, Failed)
                | (HintSent, Delaying)
                | (NoHint, Delaying)
                | (Delaying, Completed)
        )
    }
}

impl fmt::Display for SequenceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
