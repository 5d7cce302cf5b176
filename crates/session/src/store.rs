use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use booksync_core::models::Session;

/// Session storage keyed by correspondent identity.
///
/// The state machine only ever goes through this trait, so the in-memory map
/// can be swapped for a durable store without touching the script logic.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, correspondent_id: &str) -> Option<Session>;
    async fn put(&self, correspondent_id: &str, session: Session);
    async fn delete(&self, correspondent_id: &str);
}

/// Concurrent in-memory store. State does not survive a restart; that is an
/// explicit non-goal of the core.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, correspondent_id: &str) -> Option<Session> {
        self.sessions.read().await.get(correspondent_id).cloned()
    }

    async fn put(&self, correspondent_id: &str, session: Session) {
        self.sessions
            .write()
            .await
            .insert(correspondent_id.to_string(), session);
    }

    async fn delete(&self, correspondent_id: &str) {
        self.sessions.write().await.remove(correspondent_id);
    }
}
