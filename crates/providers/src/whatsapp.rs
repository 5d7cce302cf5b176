use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use booksync_core::collaborators::MessageSender;
use booksync_core::errors::{BookingError, BookingResult};

const DEFAULT_BASE_URL: &str = "https://graph.facebook.com/v17.0";

/// WhatsApp Cloud API adapter for outbound text messages.
pub struct WhatsAppSender {
    client: reqwest::Client,
    base_url: String,
    phone_number_id: String,
    access_token: String,
}

impl WhatsAppSender {
    pub fn new(phone_number_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            phone_number_id: phone_number_id.into(),
            access_token: access_token.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    messaging_product: &'static str,
    to: &'a str,
    text: TextBody<'a>,
}

#[derive(Serialize)]
struct TextBody<'a> {
    body: &'a str,
}

#[async_trait]
impl MessageSender for WhatsAppSender {
    async fn send_reply(&self, correspondent_id: &str, text: &str) -> BookingResult<()> {
        let request = SendMessageRequest {
            messaging_product: "whatsapp",
            to: correspondent_id,
            text: TextBody { body: text },
        };

        self.client
            .post(format!("{}/{}/messages", self.base_url, self.phone_number_id))
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .map_err(BookingError::upstream)?
            .error_for_status()
            .map_err(BookingError::upstream)?;

        debug!(correspondent_id, "reply sent");
        Ok(())
    }
}
