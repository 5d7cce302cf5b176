//! # Booksync Core
//!
//! Shared types for the booksync appointment-booking assistant. This crate
//! holds the data model (busy intervals, slot candidates, sessions, inbound
//! messages), the error taxonomy, and the traits implemented by external
//! collaborators (calendar, messaging, text generation).
//!
//! The core carries no I/O of its own; everything side-effecting lives behind
//! the traits in [`collaborators`].

pub mod collaborators;
pub mod errors;
pub mod mock;
pub mod models;
