use booksync_core::models::SessionStep;

/// What the coordinator must do to answer the current message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyAction {
    /// Query availability and offer the earliest open slot.
    ProposeSlot,
    /// Book the pinned slot and confirm success.
    ConfirmBooking,
    /// Emit the closing acknowledgment.
    Acknowledge,
    /// Emit a farewell; the session is discarded afterwards.
    Farewell,
}

/// One step of the script: the next state and the reply to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: SessionStep,
    pub action: ReplyAction,
}

/// Pure decision function from (step, incoming text) to a transition.
///
/// Kept free of I/O and session mutation so a richer policy (one that
/// interprets refusals, say) can be swapped in without touching the gate,
/// the engine, or the coordinator.
pub trait ScriptPolicy: Send + Sync {
    fn decide(&self, step: SessionStep, incoming: &str) -> Transition;
}

/// The shipped script: strictly linear, deterministic, and independent of
/// message content. Whatever the correspondent writes at the confirmation
/// step is treated as a confirmation; interpreting declines is an open
/// product question, deliberately not guessed at here.
pub struct LinearScript;

impl ScriptPolicy for LinearScript {
    fn decide(&self, step: SessionStep, _incoming: &str) -> Transition {
        match step {
            SessionStep::Greeting => Transition {
                next: SessionStep::AwaitingConfirmation,
                action: ReplyAction::ProposeSlot,
            },
            SessionStep::AwaitingConfirmation => Transition {
                next: SessionStep::Confirmed,
                action: ReplyAction::ConfirmBooking,
            },
            SessionStep::Confirmed => Transition {
                next: SessionStep::Closing,
                action: ReplyAction::Acknowledge,
            },
            // Anything at or past the end of the script gets a farewell; the
            // coordinator discards the session afterwards so the next message
            // starts a fresh cycle.
            SessionStep::Closing => Transition {
                next: SessionStep::Closing,
                action: ReplyAction::Farewell,
            },
        }
    }
}
