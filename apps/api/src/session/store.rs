//! Process-local session store. Each session owns its state behind its own
//! mutex; the map lock is only held for lookups, never across a model call.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::session::state::SessionState;

/// Shared handle to one session's state.
pub type SessionHandle = Arc<Mutex<SessionState>>;

struct SessionSlot {
    state: SessionHandle,
    last_seen: DateTime<Utc>,
}

impl SessionSlot {
    /// Someone outside the store still holds the handle, i.e. an action is in flight.
    fn in_use(&self) -> bool {
        Arc::strong_count(&self.state) > 1
    }
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionSlot>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_minutes: i64) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout: Duration::minutes(idle_minutes),
        }
    }

    /// Starts a session with default state. This is the only place state is reset.
    pub async fn create(&self) -> (Uuid, SessionHandle) {
        self.create_at(Utc::now()).await
    }

    async fn create_at(&self, now: DateTime<Utc>) -> (Uuid, SessionHandle) {
        self.purge_idle_at(now).await;

        let id = Uuid::new_v4();
        let state: SessionHandle = Arc::new(Mutex::new(SessionState::default()));
        self.sessions.write().await.insert(
            id,
            SessionSlot {
                state: state.clone(),
                last_seen: now,
            },
        );
        info!("Session {id} started");
        (id, state)
    }

    /// Looks up a live session and marks it as active.
    pub async fn get(&self, id: Uuid) -> Option<SessionHandle> {
        self.get_at(id, Utc::now()).await
    }

    async fn get_at(&self, id: Uuid, now: DateTime<Utc>) -> Option<SessionHandle> {
        let mut sessions = self.sessions.write().await;
        let expired = {
            let slot = sessions.get(&id)?;
            now - slot.last_seen > self.idle_timeout && !slot.in_use()
        };
        if expired {
            sessions.remove(&id);
            debug!("Session {id} expired on access");
            return None;
        }
        let slot = sessions.get_mut(&id)?;
        slot.last_seen = now;
        Some(slot.state.clone())
    }

    /// Ends a session. Returns `false` if it did not exist.
    pub async fn end(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!("Session {id} ended");
        }
        removed
    }

    /// Drops sessions idle longer than the timeout. Sessions mid-action are kept.
    pub async fn purge_idle_at(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, slot| slot.in_use() || now - slot.last_seen <= self.idle_timeout);
        let purged = before - sessions.len();
        if purged > 0 {
            info!("Purged {purged} idle session(s)");
        }
        purged
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
