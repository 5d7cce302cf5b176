use std::time::Duration;

use booksync_core::errors::BookingError;
use booksync_session::{DedupConfig, DedupGate};
use chrono::Utc;

fn gate(max_age_seconds: i64, record_ttl: Duration) -> DedupGate {
    DedupGate::new(DedupConfig {
        max_age_seconds,
        record_ttl,
    })
}

#[tokio::test]
async fn test_duplicate_key_is_rejected() {
    let gate = gate(10, Duration::from_secs(600));
    let now = Utc::now().timestamp();

    gate.admit("41790000000", "hi", now)
        .await
        .expect("first message should be admitted");

    let second = gate.admit("41790000000", "hi", now).await;
    assert!(matches!(second, Err(BookingError::Duplicate(_))));
}

#[tokio::test]
async fn test_same_text_from_different_correspondents_is_admitted() {
    let gate = gate(10, Duration::from_secs(600));
    let now = Utc::now().timestamp();

    gate.admit("41790000000", "hi", now).await.unwrap();
    gate.admit("41790000001", "hi", now)
        .await
        .expect("different correspondent should be admitted");
}

#[tokio::test]
async fn test_stale_message_is_rejected() {
    let gate = gate(10, Duration::from_secs(600));
    let eleven_seconds_ago = Utc::now().timestamp() - 11;

    let result = gate.admit("41790000000", "hi", eleven_seconds_ago).await;
    assert!(matches!(result, Err(BookingError::Stale { .. })));
    // A rejected message leaves no record behind.
    assert!(gate.is_empty().await);
}

#[tokio::test]
async fn test_fresh_message_is_admitted() {
    let gate = gate(10, Duration::from_secs(600));

    gate.admit("41790000000", "hi", Utc::now().timestamp() - 5)
        .await
        .expect("message within the threshold should be admitted");
}

#[tokio::test]
async fn test_expired_records_are_swept() {
    let gate = gate(10, Duration::from_millis(50));
    let now = Utc::now().timestamp();

    gate.admit("41790000000", "hi", now).await.unwrap();
    assert_eq!(gate.len().await, 1);

    tokio::time::sleep(Duration::from_millis(80)).await;

    // Past the TTL the key no longer counts as a duplicate, and the sweep
    // drops the old record on the way in.
    gate.admit("41790000000", "hi", Utc::now().timestamp())
        .await
        .expect("expired record should not suppress the message");
    assert_eq!(gate.len().await, 1);
}
