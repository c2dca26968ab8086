//! In-memory store of play sessions keyed by id.
//!
//! The store is bounded. Creating a session first drops every session idle
//! for longer than the idle timeout, then the least recently used ones until
//! there is room. Each session has its own lock, and session work runs on the
//! blocking pool so a search never stalls the runtime or other sessions.

use derive_more::Display;
use folio_tictactoe::{GameMode, Session};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, error, info, instrument};

/// Identifier of a stored session, `game-<n>`.
pub type SessionId = String;

/// Sessions kept when no limit is configured.
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

/// Idle time after which a session may be dropped.
pub const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(3600);

/// Failure to reach a stored session.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SessionStoreError {
    /// No session has this id, or it was evicted.
    #[display("Session not found: {}", _0)]
    NotFound(SessionId),
    /// The work on the session panicked or was cancelled.
    #[display("Session task failed: {}", _0)]
    Task(String),
}

impl std::error::Error for SessionStoreError {}

#[derive(Debug)]
struct Entry {
    session: Arc<Mutex<Session>>,
    touched: Instant,
    recency: u64,
}

/// Manages all play sessions.
#[derive(Debug, Clone)]
pub struct SessionManager {
    entries: Arc<Mutex<HashMap<SessionId, Entry>>>,
    next_id: Arc<AtomicU64>,
    clock: Arc<AtomicU64>,
    max_sessions: usize,
    idle_timeout: Duration,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::with_limits(DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_IDLE)
    }
}

impl SessionManager {
    /// Creates an empty manager with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty manager keeping at most `max_sessions` (at least one),
    /// each for at most `idle_timeout` without use.
    pub fn with_limits(max_sessions: usize, idle_timeout: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(0)),
            clock: Arc::new(AtomicU64::new(0)),
            max_sessions: max_sessions.max(1),
            idle_timeout,
        }
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    /// Stores a fresh session and returns its id with a copy of it.
    #[instrument(skip(self))]
    pub async fn create(&self, mode: GameMode) -> (SessionId, Session) {
        let id = format!("game-{}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let session = Session::new(mode);

        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.touched.elapsed() < self.idle_timeout);
        while entries.len() >= self.max_sessions {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.recency)
                .map(|(id, _)| id.clone());
            match oldest {
                Some(oldest) => {
                    entries.remove(&oldest);
                }
                None => break,
            }
        }
        let evicted = before - entries.len();
        if evicted > 0 {
            info!(evicted, "Evicted play sessions");
        }

        entries.insert(
            id.clone(),
            Entry {
                session: Arc::new(Mutex::new(session.clone())),
                touched: Instant::now(),
                recency: self.tick(),
            },
        );
        info!(session_id = %id, stored = entries.len(), "Created session");
        (id, session)
    }

    /// Marks the session as used and hands out its lock.
    async fn checkout(&self, id: &str) -> Result<Arc<Mutex<Session>>, SessionStoreError> {
        let mut entries = self.entries.lock().await;
        match entries.get_mut(id) {
            Some(entry) => {
                entry.touched = Instant::now();
                entry.recency = self.tick();
                Ok(entry.session.clone())
            }
            None => {
                debug!(session_id = id, "Session not found");
                Err(SessionStoreError::NotFound(id.to_string()))
            }
        }
    }

    /// Returns a copy of the session.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Session, SessionStoreError> {
        let session = self.checkout(id).await?;
        let copy = session.lock().await.clone();
        Ok(copy)
    }

    /// Runs `f` on the session on the blocking pool, holding only that
    /// session's lock.
    #[instrument(skip(self, f))]
    pub async fn with_session<T, F>(&self, id: &str, f: F) -> Result<T, SessionStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Session) -> T + Send + 'static,
    {
        let session = self.checkout(id).await?;
        let mut guard = session.lock_owned().await;
        tokio::task::spawn_blocking(move || f(&mut *guard))
            .await
            .map_err(|err| {
                error!(session_id = id, error = %err, "Session task failed");
                SessionStoreError::Task(err.to_string())
            })
    }

    /// Number of stored sessions.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// True when no session is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_sequential() {
        let manager = SessionManager::new();
        let (first, _) = manager.create(GameMode::HumanVsHuman).await;
        let (second, _) = manager.create(GameMode::HumanVsComputer).await;
        assert_eq!(first, "game-1");
        assert_eq!(second, "game-2");
        assert_eq!(manager.len().await, 2);
    }

    #[tokio::test]
    async fn updates_are_visible_to_clones() {
        let manager = SessionManager::new();
        let (id, _) = manager.create(GameMode::HumanVsHuman).await;
        let other = manager.clone();
        let placed = other
            .with_session(&id, |s| s.play(4).map(|g| g.board().marks_placed()))
            .await;
        assert_eq!(placed, Ok(Ok(1)));
        let stored = manager.get(&id).await.unwrap();
        assert_eq!(stored.game().history().len(), 1);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let manager = SessionManager::new();
        assert_eq!(
            manager.get("game-9").await.unwrap_err(),
            SessionStoreError::NotFound("game-9".into())
        );
        assert!(manager.with_session("game-9", |_| ()).await.is_err());
        assert!(manager.is_empty().await);
    }

    #[tokio::test]
    async fn store_never_exceeds_its_capacity() {
        let manager = SessionManager::with_limits(3, DEFAULT_SESSION_IDLE);
        for _ in 0..50 {
            manager.create(GameMode::HumanVsHuman).await;
        }
        assert_eq!(manager.len().await, 3);
        assert!(manager.get("game-47").await.is_err());
        assert!(manager.get("game-50").await.is_ok());
    }

    #[tokio::test]
    async fn least_recently_used_is_evicted_first() {
        let manager = SessionManager::with_limits(2, DEFAULT_SESSION_IDLE);
        let (first, _) = manager.create(GameMode::HumanVsHuman).await;
        let (second, _) = manager.create(GameMode::HumanVsHuman).await;
        manager.get(&first).await.unwrap();
        manager.create(GameMode::HumanVsHuman).await;
        assert!(manager.get(&first).await.is_ok());
        assert!(manager.get(&second).await.is_err());
    }

    #[tokio::test]
    async fn idle_sessions_are_dropped_on_create() {
        let manager = SessionManager::with_limits(100, Duration::ZERO);
        manager.create(GameMode::HumanVsHuman).await;
        manager.create(GameMode::HumanVsHuman).await;
        let (latest, _) = manager.create(GameMode::HumanVsHuman).await;
        assert_eq!(manager.len().await, 1);
        assert!(manager.get(&latest).await.is_ok());
    }

    #[tokio::test]
    async fn zero_capacity_still_keeps_the_new_session() {
        let manager = SessionManager::with_limits(0, DEFAULT_SESSION_IDLE);
        let (id, _) = manager.create(GameMode::HumanVsHuman).await;
        manager.with_session(&id, |s| s.play(0).map(|_| ())).await.unwrap().unwrap();
        assert_eq!(manager.len().await, 1);
    }
}
