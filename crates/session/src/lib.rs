//! # Booksync Session
//!
//! Per-correspondent conversation state under at-least-once delivery. An
//! inbound message passes the deduplication gate, acquires its
//! correspondent's lock, advances the scripted state machine, and produces
//! at most one outgoing reply.
//!
//! The script's transition table is pure and swappable ([`ScriptPolicy`]);
//! everything side-effecting happens in the [`Coordinator`], which talks to
//! the calendar, messaging, and text-generation collaborators through the
//! traits in `booksync-core` with a timeout on every call.

/// Per-correspondent coordination and reply generation
pub mod coordinator;
/// Staleness and duplicate admission filtering
pub mod dedup;
/// Pure scripted transition table
pub mod script;
/// Session storage behind an injectable trait
pub mod store;

pub use coordinator::{Coordinator, CoordinatorConfig};
pub use dedup::{DedupConfig, DedupGate};
pub use script::{LinearScript, ReplyAction, ScriptPolicy, Transition};
pub use store::{InMemorySessionStore, SessionStore};
