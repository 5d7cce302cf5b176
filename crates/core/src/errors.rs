use thiserror::Error;

/// Error taxonomy for the booking core.
///
/// No variant is fatal to the process: each inbound message is handled in
/// isolation, so one correspondent's failure never affects another's.
#[derive(Error, Debug)]
pub enum BookingError {
    /// An instant or timestamp could not be parsed. Non-retryable; the whole
    /// query fails with no partial results.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A calendar, messaging, or text-generation call failed or timed out.
    /// Logged and answered with a generic apology (or dropped); never
    /// retried by the core itself.
    #[error("Upstream unavailable: {0}")]
    Upstream(#[source] eyre::Report),

    /// The message timestamp is older than the staleness threshold.
    /// Admission-level, silently accepted with no reply.
    #[error("Stale message: reported {age_seconds}s ago, threshold {max_age_seconds}s")]
    Stale {
        age_seconds: i64,
        max_age_seconds: i64,
    },

    /// The (correspondent, text) pair was already processed.
    /// Admission-level, silently accepted with no reply.
    #[error("Duplicate message from {0}")]
    Duplicate(String),

    #[error("Internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type BookingResult<T> = Result<T, BookingError>;

impl BookingError {
    /// Admission rejections are expected traffic, not failures; the gate
    /// swallows them without producing a reply.
    pub fn is_admission_rejection(&self) -> bool {
        matches!(self, Self::Stale { .. } | Self::Duplicate(_))
    }

    pub fn upstream(err: impl Into<eyre::Report>) -> Self {
        Self::Upstream(err.into())
    }
}
