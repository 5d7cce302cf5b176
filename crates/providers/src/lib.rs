//! # Booksync Providers
//!
//! HTTP adapters for the external collaborators the core delegates to:
//! Google Calendar for availability data and bookings, the WhatsApp Cloud
//! API for outbound replies, and OpenAI chat completions for phrasing
//! proposals. These are transport shims; all scheduling and conversation
//! logic lives in `booksync-availability` and `booksync-session`.

/// Google Calendar freebusy and event insertion
pub mod calendar;
/// OpenAI chat-completions reply generation
pub mod openai;
/// WhatsApp Cloud API outbound messages
pub mod whatsapp;

pub use calendar::GoogleCalendar;
pub use openai::OpenAiGenerator;
pub use whatsapp::WhatsAppSender;
