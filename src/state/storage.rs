//! In-process session storage
//!
//! Sessions live for the lifetime of the process and are dropped after an
//! idle timeout, either lazily on access or by the periodic cleanup task run
//! by `SessionStoreManager`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use crate::utils::helpers::format_timestamp;
use super::context::Session;
use super::scenarios::Step;

/// Session map keyed by user id
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<i64, Session>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Current session, or a fresh one when absent or idle-expired
    pub async fn get(&self, user_id: i64) -> Session {
        if let Some(session) = self.sessions.read().await.get(&user_id) {
            if !session.is_expired(self.idle_timeout) {
                return session.clone();
            }
        }

        let mut sessions = self.sessions.write().await;
        let session = sessions
            .entry(user_id)
            .and_modify(|existing| {
                if existing.is_expired(self.idle_timeout) {
                    debug!(
                        user_id = user_id,
                        step = %existing.step,
                        last_seen = %format_timestamp(existing.updated_at),
                        "Session expired, starting over"
                    );
                    *existing = Session::new(user_id);
                }
            })
            .or_insert_with(|| Session::new(user_id));
        session.clone()
    }

    pub async fn save(&self, mut session: Session) {
        session.touch();
        self.sessions.write().await.insert(session.user_id, session);
    }

    pub async fn set_step(&self, user_id: i64, step: Step) -> Session {
        self.update(user_id, |session| session.set_step(step)).await
    }

    pub async fn merge_data(&self, user_id: i64, partial: HashMap<String, serde_json::Value>) -> Session {
        self.update(user_id, |session| session.merge_data(partial)).await
    }

    pub async fn clear(&self, user_id: i64) -> Session {
        self.update(user_id, Session::clear).await
    }

    async fn update<F>(&self, user_id: i64, change: F) -> Session
    where
        F: FnOnce(&mut Session),
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(user_id).or_insert_with(|| Session::new(user_id));
        if session.is_expired(self.idle_timeout) {
            *session = Session::new(user_id);
        }
        change(session);
        session.clone()
    }

    /// Drop every session untouched for longer than the idle timeout
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(self.idle_timeout));
        before - sessions.len()
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }
}

/// Session store with periodic idle eviction
#[derive(Debug)]
pub struct SessionStoreManager {
    store: Arc<SessionStore>,
    cleanup_interval: Duration,
    cleanup_handle: Option<tokio::task::JoinHandle<()>>,
}

impl SessionStoreManager {
    pub fn new(store: Arc<SessionStore>, cleanup_interval: Duration) -> Self {
        Self {
            store,
            cleanup_interval,
            cleanup_handle: None,
        }
    }

    /// Start automatic cleanup task
    pub fn start_cleanup(&mut self) {
        if self.cleanup_handle.is_some() {
            warn!("Cleanup task is already running");
            return;
        }

        let store = self.store.clone();
        let interval = self.cleanup_interval;

        let handle = tokio::spawn(async move {
            let mut cleanup_interval = tokio::time::interval(interval);

            loop {
                cleanup_interval.tick().await;

                let count = store.evict_idle().await;
                if count > 0 {
                    info!("Cleanup task evicted {} idle sessions", count);
                }
            }
        });

        self.cleanup_handle = Some(handle);
        info!("Started session cleanup task with interval {:?}", self.cleanup_interval);
    }

    /// Stop automatic cleanup task
    pub fn stop_cleanup(&mut self) {
        if let Some(handle) = self.cleanup_handle.take() {
            handle.abort();
            info!("Stopped session cleanup task");
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }
}

impl Drop for SessionStoreManager {
    fn drop(&mut self) {
        self.stop_cleanup();
    }
}
