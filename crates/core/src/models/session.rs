use serde::{Deserialize, Serialize};

use super::calendar::AvailableSlot;

/// Most recent turns kept per session. When exceeded, the oldest half is
/// truncated so the buffer stays small without churning on every message.
pub const HISTORY_CAP: usize = 20;

/// Position in the fixed conversational script. The script is strictly
/// linear; no branching on message content happens at this level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStep {
    Greeting,
    AwaitingConfirmation,
    Confirmed,
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
}

/// Conversation state for one correspondent.
///
/// Created on the first message from a new correspondent; discarded and
/// recreated once the script has passed [`SessionStep::Closing`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub history: Vec<Turn>,
    pub step: SessionStep,
    /// Slot offered at the greeting step, pinned so confirmation books
    /// exactly the instants that were proposed.
    pub proposed_slot: Option<AvailableSlot>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            step: SessionStep::Greeting,
            proposed_slot: None,
        }
    }

    /// Appends a turn, truncating the oldest half of the buffer once the cap
    /// is exceeded.
    pub fn push_turn(&mut self, role: TurnRole, text: impl Into<String>) {
        self.history.push(Turn {
            role,
            text: text.into(),
        });
        if self.history.len() > HISTORY_CAP {
            self.history.drain(..HISTORY_CAP / 2);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
