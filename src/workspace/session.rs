//! Session Manager
//!
//! Every browser session owns one isolated workspace:
//! - In-memory session table behind an async RwLock
//! - Each workspace behind its own Mutex, held for a whole action
//! - Idle sessions swept by a background task

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use uuid::Uuid;

use super::store::Workspace;

/// Interval between idle-session sweeps
const CLEANUP_INTERVAL_SECS: u64 = 300;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),
}

/// Handle to one session
#[derive(Clone)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    workspace: Arc<Mutex<Workspace>>,
}

impl Session {
    /// Exclusive access to the workspace for the duration of one action
    pub async fn lock(&self) -> OwnedMutexGuard<Workspace> {
        self.workspace.clone().lock_owned().await
    }
}

struct SessionSlot {
    session: Session,
    last_seen: DateTime<Utc>,
}

// ============================================================================
// Session Manager
// ============================================================================

#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionManagerInner>,
}

struct SessionManagerInner {
    sessions: RwLock<HashMap<Uuid, SessionSlot>>,
    /// Idle time after which a session is dropped
    ttl: Duration,
}

const MAX_TTL_MINUTES: i64 = 30 * 24 * 60;

impl SessionManager {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(SessionManagerInner {
                sessions: RwLock::new(HashMap::new()),
                ttl,
            }),
        }
    }

    /// TTL is clamped to at least one minute and at most thirty days
    pub fn with_ttl_minutes(minutes: i64) -> Self {
        Self::new(Duration::minutes(minutes.clamp(1, MAX_TTL_MINUTES)))
    }

    // ========================================================================
    // Session Lifecycle
    // ========================================================================

    /// Create a session with an empty workspace
    pub async fn create_session(&self) -> Session {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            created_at: now,
            workspace: Arc::new(Mutex::new(Workspace::new())),
        };

        self.inner.sessions.write().await.insert(
            session.id,
            SessionSlot {
                session: session.clone(),
                last_seen: now,
            },
        );

        tracing::info!(session_id = %session.id, "Created session");
        session
    }

    /// Get a session and mark it as seen
    pub async fn get_session(&self, id: Uuid) -> Result<Session, SessionError> {
        let mut sessions = self.inner.sessions.write().await;
        let slot = sessions
            .get_mut(&id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        slot.last_seen = Utc::now();
        Ok(slot.session.clone())
    }

    /// Get a session by string ID
    pub async fn get_session_by_str(&self, id: &str) -> Result<Session, SessionError> {
        let uuid = Uuid::parse_str(id).map_err(|_| SessionError::NotFound(id.to_string()))?;
        self.get_session(uuid).await
    }

    /// Drop a session and its files
    pub async fn end_session(&self, id: Uuid) -> Result<(), SessionError> {
        self.inner
            .sessions
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        tracing::info!(session_id = %id, "Session ended");
        Ok(())
    }

    pub async fn session_count(&self) -> usize {
        self.inner.sessions.read().await.len()
    }

    // ========================================================================
    // Cleanup
    // ========================================================================

    /// Drop sessions idle since before `now - ttl`.
    ///
    /// Returns the number of sessions removed.
    pub async fn cleanup_idle(&self, now: DateTime<Utc>) -> usize {
        let cutoff = now - self.inner.ttl;
        let mut sessions = self.inner.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|id, slot| {
            let keep = slot.last_seen >= cutoff;
            if !keep {
                tracing::debug!(session_id = %id, "Dropping idle session");
            }
            keep
        });

        let removed = before - sessions.len();
        if removed > 0 {
            tracing::info!(count = removed, "Cleaned up idle sessions");
        }
        removed
    }

    /// Start background cleanup task
    pub fn start_cleanup_task(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_secs(CLEANUP_INTERVAL_SECS));

            loop {
                interval.tick().await;
                self.cleanup_idle(Utc::now()).await;
            }
        })
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::with_ttl_minutes(60)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;

    #[tokio::test]
    async fn test_create_and_get_session() {
        let manager = SessionManager::default();
        let session = manager.create_session().await;

        let found = manager.get_session(session.id).await.unwrap();
        assert_eq!(found.id, session.id);
        assert_eq!(manager.session_count().await, 1);

        assert!(manager.get_session_by_str("not-a-uuid").await.is_err());
        assert!(manager.get_session(Uuid::new_v4()).await.is_err());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let manager = SessionManager::default();
        let first = manager.create_session().await;
        let second = manager.create_session().await;

        first
            .lock()
            .await
            .ingest(vec![("a.pdf".to_string(), Bytes::from_static(b"%PDF"))]);

        assert_eq!(first.lock().await.len(), 1);
        assert!(second.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_cleanup_idle() {
        let manager = SessionManager::with_ttl_minutes(10);
        let session = manager.create_session().await;

        assert_eq!(manager.cleanup_idle(Utc::now()).await, 0);
        assert_eq!(
            manager
                .cleanup_idle(Utc::now() + Duration::minutes(11))
                .await,
            1
        );
        assert!(manager.get_session(session.id).await.is_err());
    }

    #[tokio::test]
    async fn test_ttl_is_clamped() {
        let manager = SessionManager::with_ttl_minutes(-30);
        manager.create_session().await;
        assert_eq!(manager.cleanup_idle(Utc::now()).await, 0);

        let manager = SessionManager::with_ttl_minutes(i64::MAX);
        manager.create_session().await;
        assert_eq!(
            manager
                .cleanup_idle(Utc::now() + Duration::days(31))
                .await,
            1
        );
    }

    #[tokio::test]
    async fn test_end_session() {
        let manager = SessionManager::default();
        let session = manager.create_session().await;

        manager.end_session(session.id).await.unwrap();
        assert!(manager.end_session(session.id).await.is_err());
    }
}
