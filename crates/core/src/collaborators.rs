//! Contracts for the external collaborators the core delegates to.
//!
//! The calendar, messaging, and text-generation providers are transport
//! shims with no algorithmic content; the core only ever talks to them
//! through these traits, and every call site wraps them in a timeout.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::BookingResult;
use crate::models::BusyInterval;

/// Read/write access to the backing calendar.
#[async_trait]
pub trait CalendarClient: Send + Sync {
    /// Lists busy intervals between two instants. Any transport or
    /// authorization failure propagates; the core never guesses at
    /// availability.
    async fn busy_intervals(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> BookingResult<Vec<BusyInterval>>;

    /// Creates the appointment event. At-least-once delivery upstream is
    /// acceptable only because the deduplication gate guards against the
    /// core invoking this twice for one message.
    async fn book_slot(
        &self,
        title: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> BookingResult<()>;
}

/// Outbound messaging back to the correspondent.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Fire-and-forget from the core's perspective; failures are logged by
    /// the caller, never retried.
    async fn send_reply(&self, correspondent_id: &str, text: &str) -> BookingResult<()>;
}

/// Natural-language phrasing of scripted replies.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Produces conversational text for a prompt. Callers fall back to the
    /// scripted wording when this fails.
    async fn generate(&self, prompt: &str) -> BookingResult<String>;
}
