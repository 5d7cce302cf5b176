use serde::{Deserialize, Serialize};

/// The extracted webhook triple. This is all the core ever sees of an
/// inbound message; the transport envelope stays in the API layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Opaque stable correspondent identity (e.g. a phone number). All
    /// session and dedup state is keyed by it.
    pub correspondent_id: String,
    pub text: String,
    /// Seconds since epoch, as reported by the upstream transport.
    pub timestamp: i64,
}

impl InboundMessage {
    pub fn new(
        correspondent_id: impl Into<String>,
        text: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            correspondent_id: correspondent_id.into(),
            text: text.into(),
            timestamp,
        }
    }
}
