use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

use booksync_core::collaborators::CalendarClient;
use booksync_core::errors::{BookingError, BookingResult};
use booksync_core::models::BusyInterval;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";

/// Google Calendar adapter: freebusy queries for availability data and
/// event insertion for bookings.
pub struct GoogleCalendar {
    client: reqwest::Client,
    base_url: String,
    calendar_id: String,
    access_token: String,
}

impl GoogleCalendar {
    pub fn new(calendar_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            calendar_id: calendar_id.into(),
            access_token: access_token.into(),
        }
    }

    /// Points the adapter at a different API root, for testing against a
    /// local stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FreeBusyRequest<'a> {
    time_min: String,
    time_max: String,
    items: Vec<FreeBusyItem<'a>>,
}

#[derive(Serialize)]
struct FreeBusyItem<'a> {
    id: &'a str,
}

#[derive(Deserialize)]
struct FreeBusyResponse {
    calendars: HashMap<String, FreeBusyCalendar>,
}

#[derive(Deserialize)]
struct FreeBusyCalendar {
    #[serde(default)]
    busy: Vec<FreeBusyPeriod>,
}

#[derive(Deserialize)]
struct FreeBusyPeriod {
    start: String,
    end: String,
}

#[derive(Serialize)]
struct EventRequest<'a> {
    summary: &'a str,
    start: EventTime,
    end: EventTime,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventTime {
    date_time: String,
}

#[async_trait]
impl CalendarClient for GoogleCalendar {
    async fn busy_intervals(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> BookingResult<Vec<BusyInterval>> {
        let request = FreeBusyRequest {
            time_min: from.to_rfc3339(),
            time_max: to.to_rfc3339(),
            items: vec![FreeBusyItem {
                id: &self.calendar_id,
            }],
        };

        let response: FreeBusyResponse = self
            .client
            .post(format!("{}/freeBusy", self.base_url))
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .map_err(BookingError::upstream)?
            .error_for_status()
            .map_err(BookingError::upstream)?
            .json()
            .await
            .map_err(BookingError::upstream)?;

        let periods = response
            .calendars
            .get(&self.calendar_id)
            .map(|c| c.busy.as_slice())
            .unwrap_or_default();

        // A malformed period fails the whole query; partial availability
        // data would silently offer booked slots.
        periods
            .iter()
            .map(|p| BusyInterval::parse(&p.start, &p.end))
            .collect()
    }

    async fn book_slot(
        &self,
        title: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> BookingResult<()> {
        let request = EventRequest {
            summary: title,
            start: EventTime {
                date_time: start.to_rfc3339(),
            },
            end: EventTime {
                date_time: end.to_rfc3339(),
            },
        };

        self.client
            .post(format!(
                "{}/calendars/{}/events",
                self.base_url, self.calendar_id
            ))
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .map_err(BookingError::upstream)?
            .error_for_status()
            .map_err(BookingError::upstream)?;

        info!(calendar_id = %self.calendar_id, %start, %end, "event created");
        Ok(())
    }
}
