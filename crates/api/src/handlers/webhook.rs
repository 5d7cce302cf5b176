//! # Webhook Handlers
//!
//! The Meta verification handshake and inbound message delivery. Delivery
//! unwraps the WhatsApp envelope down to the `(correspondent, text,
//! timestamp)` triple; everything else about the envelope is transport
//! detail the core never sees.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{info, warn};

use booksync_core::errors::BookingError;
use booksync_core::models::InboundMessage;

use crate::{ApiState, middleware::error_handling::AppError};

/// Query parameters of the Meta webhook verification handshake.
#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
}

/// Answers the GET handshake: echoes the challenge when the mode and token
/// match, 403 otherwise.
pub async fn verify(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<VerifyParams>,
) -> Response {
    let subscribed = params.mode.as_deref() == Some("subscribe");
    let token_matches = params.verify_token.as_deref() == Some(state.verify_token.as_str());

    if subscribed && token_matches {
        info!("webhook verified");
        (StatusCode::OK, params.challenge.unwrap_or_default()).into_response()
    } else {
        warn!("webhook verification failed");
        StatusCode::FORBIDDEN.into_response()
    }
}

/// One POST delivers one inbound message. Envelopes without a text message
/// (status updates, media) are acknowledged and dropped.
pub async fn receive(
    State(state): State<Arc<ApiState>>,
    axum::Json(envelope): axum::Json<Envelope>,
) -> Result<StatusCode, AppError> {
    let Some(message) = envelope.into_inbound()? else {
        return Ok(StatusCode::OK);
    };

    info!(
        correspondent_id = %message.correspondent_id,
        "inbound message received"
    );
    state.coordinator.handle_message(&message).await?;
    Ok(StatusCode::OK)
}

/// WhatsApp Cloud API delivery envelope, reduced to the fields the core
/// consumes.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    entry: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    changes: Vec<Change>,
}

#[derive(Debug, Deserialize)]
struct Change {
    value: ChangeValue,
}

#[derive(Debug, Deserialize)]
struct ChangeValue {
    #[serde(default)]
    messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    from: String,
    /// Seconds since epoch, delivered as a decimal string.
    timestamp: String,
    text: Option<TextBody>,
}

#[derive(Debug, Deserialize)]
struct TextBody {
    body: String,
}

impl Envelope {
    /// Extracts the first text message as the core triple, if any.
    fn into_inbound(self) -> Result<Option<InboundMessage>, BookingError> {
        let Some(message) = self
            .entry
            .into_iter()
            .next()
            .and_then(|e| e.changes.into_iter().next())
            .and_then(|c| c.value.messages.into_iter().next())
        else {
            return Ok(None);
        };

        let Some(text) = message.text else {
            return Ok(None);
        };

        let timestamp: i64 = message.timestamp.parse().map_err(|_| {
            BookingError::Parse(format!(
                "invalid message timestamp {:?}",
                message.timestamp
            ))
        })?;

        Ok(Some(InboundMessage::new(message.from, text.body, timestamp)))
    }
}
