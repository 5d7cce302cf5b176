use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use booksync_api::{ApiState, router};
use booksync_availability::{AvailabilityConfig, WorkingHours};
use booksync_core::mock::{MockCalendar, MockSender};
use booksync_session::{
    Coordinator, CoordinatorConfig, DedupConfig, InMemorySessionStore, LinearScript, SessionStore,
};
use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::json;

fn test_state(calendar: MockCalendar, sender: MockSender) -> (Arc<ApiState>, Arc<InMemorySessionStore>) {
    let store = Arc::new(InMemorySessionStore::new());
    let config = CoordinatorConfig {
        availability: AvailabilityConfig {
            working_hours: WorkingHours { start: 0, end: 24 },
            slot_interval_minutes: 30,
            timezone: chrono_tz::UTC,
        },
        dedup: DedupConfig::default(),
        window_days: 2,
        call_timeout: Duration::from_secs(5),
        booking_title: "Beauty Salon Appointment".to_string(),
    };
    let coordinator = Arc::new(Coordinator::new(
        store.clone(),
        Arc::new(LinearScript),
        Arc::new(calendar),
        Arc::new(sender),
        config,
    ));
    (
        Arc::new(ApiState {
            coordinator,
            verify_token: "secret-token".to_string(),
        }),
        store,
    )
}

fn free_calendar() -> MockCalendar {
    let mut calendar = MockCalendar::new();
    calendar
        .expect_busy_intervals()
        .returning(|_, _| Ok(Vec::new()));
    calendar
}

fn quiet_sender() -> MockSender {
    let mut sender = MockSender::new();
    sender.expect_send_reply().returning(|_, _| Ok(()));
    sender
}

fn text_envelope(from: &str, body: &str) -> serde_json::Value {
    json!({
        "entry": [{
            "changes": [{
                "value": {
                    "messages": [{
                        "from": from,
                        "timestamp": Utc::now().timestamp().to_string(),
                        "text": { "body": body }
                    }]
                }
            }]
        }]
    })
}

#[tokio::test]
async fn test_handshake_echoes_challenge() {
    let (state, _store) = test_state(free_calendar(), quiet_sender());
    let server = TestServer::new(router(state)).unwrap();

    let response = server
        .get("/webhook")
        .add_query_param("hub.mode", "subscribe")
        .add_query_param("hub.challenge", "1158201444")
        .add_query_param("hub.verify_token", "secret-token")
        .await;

    response.assert_status_ok();
    assert_eq!(response.text(), "1158201444");
}

#[tokio::test]
async fn test_handshake_rejects_wrong_token() {
    let (state, _store) = test_state(free_calendar(), quiet_sender());
    let server = TestServer::new(router(state)).unwrap();

    let response = server
        .get("/webhook")
        .add_query_param("hub.mode", "subscribe")
        .add_query_param("hub.challenge", "1158201444")
        .add_query_param("hub.verify_token", "wrong")
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_text_message_creates_session() {
    let (state, store) = test_state(free_calendar(), quiet_sender());
    let server = TestServer::new(router(state)).unwrap();

    let response = server
        .post("/webhook")
        .json(&text_envelope("41790000000", "hi"))
        .await;

    response.assert_status_ok();
    assert!(store.get("41790000000").await.is_some());
}

#[tokio::test]
async fn test_envelope_without_message_is_acknowledged() {
    let (state, store) = test_state(free_calendar(), quiet_sender());
    let server = TestServer::new(router(state)).unwrap();

    let response = server.post("/webhook").json(&json!({ "entry": [] })).await;

    response.assert_status_ok();
    assert!(store.get("41790000000").await.is_none());
}

#[tokio::test]
async fn test_non_text_message_is_acknowledged() {
    let (state, store) = test_state(free_calendar(), quiet_sender());
    let server = TestServer::new(router(state)).unwrap();

    let envelope = json!({
        "entry": [{
            "changes": [{
                "value": {
                    "messages": [{
                        "from": "41790000000",
                        "timestamp": Utc::now().timestamp().to_string()
                    }]
                }
            }]
        }]
    });
    let response = server.post("/webhook").json(&envelope).await;

    response.assert_status_ok();
    assert!(store.get("41790000000").await.is_none());
}

#[tokio::test]
async fn test_malformed_timestamp_is_a_bad_request() {
    let (state, _store) = test_state(free_calendar(), quiet_sender());
    let server = TestServer::new(router(state)).unwrap();

    let envelope = json!({
        "entry": [{
            "changes": [{
                "value": {
                    "messages": [{
                        "from": "41790000000",
                        "timestamp": "not-a-number",
                        "text": { "body": "hi" }
                    }]
                }
            }]
        }]
    });
    let response = server.post("/webhook").json(&envelope).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_redelivered_envelope_sends_one_reply() {
    let mut sender = MockSender::new();
    sender.expect_send_reply().times(1).returning(|_, _| Ok(()));
    let (state, _store) = test_state(free_calendar(), sender);
    let server = TestServer::new(router(state)).unwrap();

    let envelope = text_envelope("41790000000", "hi");
    server.post("/webhook").json(&envelope).await.assert_status_ok();
    server.post("/webhook").json(&envelope).await.assert_status_ok();
}

#[tokio::test]
async fn test_health_route() {
    let (state, _store) = test_state(free_calendar(), quiet_sender());
    let server = TestServer::new(router(state)).unwrap();

    let response = server.get("/health").await;
    response.assert_status_ok();
}
