//! Mock collaborators for testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;

use crate::collaborators::{CalendarClient, MessageSender, ReplyGenerator};
use crate::errors::BookingResult;
use crate::models::BusyInterval;

mock! {
    pub Calendar {}

    #[async_trait]
    impl CalendarClient for Calendar {
        async fn busy_intervals(
            &self,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> BookingResult<Vec<BusyInterval>>;

        async fn book_slot(
            &self,
            title: &str,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> BookingResult<()>;
    }
}

mock! {
    pub Sender {}

    #[async_trait]
    impl MessageSender for Sender {
        async fn send_reply(&self, correspondent_id: &str, text: &str) -> BookingResult<()>;
    }
}

mock! {
    pub Generator {}

    #[async_trait]
    impl ReplyGenerator for Generator {
        async fn generate(&self, prompt: &str) -> BookingResult<String>;
    }
}
