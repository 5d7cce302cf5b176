pub mod calendar;
pub mod message;
pub mod session;

pub use calendar::{AvailableSlot, BusyInterval, SlotCandidate};
pub use message::InboundMessage;
pub use session::{Session, SessionStep, Turn, TurnRole};
