use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use booksync_core::errors::{BookingError, BookingResult};

/// Admission thresholds for the deduplication gate.
#[derive(Debug, Clone)]
pub struct DedupConfig {
    /// Messages reported more than this many seconds ago are replayed or
    /// delayed webhook retries and are dropped.
    pub max_age_seconds: i64,
    /// How long a processed `(correspondent, text)` key suppresses
    /// redeliveries. Entries past the TTL are swept on insert, keeping the
    /// set bounded.
    pub record_ttl: Duration,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            max_age_seconds: 10,
            record_ttl: Duration::from_secs(600),
        }
    }
}

/// Admission filter in front of all stateful processing.
///
/// Keys are recorded before any reply is attempted, so a failure while
/// generating the reply cannot let a redelivery through: the correspondent
/// observes at-most-once handling even though the record itself is
/// best-effort in-memory.
///
/// The `(correspondent, text)` key is deliberately coarse: a legitimately
/// repeating user sending identical text within the TTL is also suppressed.
/// This matches the upstream transport's retry behavior and is inherited
/// intentionally.
pub struct DedupGate {
    config: DedupConfig,
    seen: Mutex<HashMap<(String, String), Instant>>,
}

impl DedupGate {
    pub fn new(config: DedupConfig) -> Self {
        Self {
            config,
            seen: Mutex::new(HashMap::new()),
        }
    }

    /// Admits or rejects a message, recording its key on admission.
    ///
    /// Rejections are [`BookingError::Stale`] and [`BookingError::Duplicate`];
    /// both are expected traffic and produce no reply.
    pub async fn admit(
        &self,
        correspondent_id: &str,
        text: &str,
        message_timestamp: i64,
    ) -> BookingResult<()> {
        let age_seconds = Utc::now().timestamp() - message_timestamp;
        if age_seconds > self.config.max_age_seconds {
            debug!(correspondent_id, age_seconds, "dropping stale message");
            return Err(BookingError::Stale {
                age_seconds,
                max_age_seconds: self.config.max_age_seconds,
            });
        }

        let key = (correspondent_id.to_string(), text.to_string());
        let now = Instant::now();
        let mut seen = self.seen.lock().await;

        // Expired entries are swept here rather than on a timer; the map
        // stays bounded by the message rate within one TTL.
        seen.retain(|_, seen_at| now.duration_since(*seen_at) < self.config.record_ttl);

        if seen.contains_key(&key) {
            debug!(correspondent_id, "dropping duplicate message");
            return Err(BookingError::Duplicate(correspondent_id.to_string()));
        }
        seen.insert(key, now);
        Ok(())
    }

    /// Number of live dedup records.
    pub async fn len(&self) -> usize {
        self.seen.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
