//! Visitor session tracker
//!
//! Remembers which anonymous visitor sessions have been seen recently so
//! page views can be split into new and returning visits.
//!
//! Memory is bounded two ways: a session expires after a period of
//! inactivity, and when the tracker is full the least recently seen session
//! is evicted to make room. The tracker never drops all of its sessions at
//! once.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::TrackerConfig;
use crate::error::{TrackerError, TrackerResult};

/// Longest accepted session identifier.
pub const MAX_SESSION_ID_LEN: usize = 128;

/// Result of recording a page view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VisitOutcome {
    /// First page view of this session (or first since it expired).
    NewSession,
    /// The session was already live.
    Returning {
        /// Page views in this session, including this one.
        visits: u32,
    },
}

/// A live visitor session.
#[derive(Debug, Clone, Serialize)]
pub struct VisitorSession {
    /// Opaque session identifier from the visitor's cookie.
    pub session_id: String,
    /// First page view.
    pub first_seen: DateTime<Utc>,
    /// Most recent page view.
    pub last_seen: DateTime<Utc>,
    /// Page views so far.
    pub visits: u32,
    /// Path of the most recent page view.
    pub last_path: String,
    #[serde(skip)]
    recency_key: (DateTime<Utc>, u64),
}

/// Tracker statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrackerStats {
    /// Sessions currently held
    pub active_sessions: usize,
    /// Page views recorded
    pub total_visits: u64,
    /// Sessions started (a session that expires and comes back counts twice)
    pub unique_sessions: u64,
    /// Sessions dropped to stay under capacity
    pub evicted: u64,
    /// Sessions dropped after their inactivity timeout
    pub expired: u64,
}

#[derive(Debug, Default)]
struct TrackerState {
    sessions: HashMap<String, VisitorSession>,
    /// Sessions ordered by last page view, oldest first.
    recency: BTreeMap<(DateTime<Utc>, u64), String>,
    next_seq: u64,
    stats: TrackerStats,
}

impl TrackerState {
    fn next_key(&mut self, at: DateTime<Utc>) -> (DateTime<Utc>, u64) {
        let key = (at, self.next_seq);
        self.next_seq += 1;
        key
    }

    fn purge_expired(&mut self, now: DateTime<Utc>, ttl: chrono::Duration) -> usize {
        let mut purged = 0;
        while let Some(key) = self.recency.first_key_value().map(|(key, _)| *key) {
            if now - key.0 < ttl {
                break;
            }
            if let Some(id) = self.recency.remove(&key) {
                self.sessions.remove(&id);
            }
            purged += 1;
        }
        self.stats.expired += purged as u64;
        purged
    }

    fn evict_oldest(&mut self) -> Option<String> {
        let (_, id) = self.recency.pop_first()?;
        self.sessions.remove(&id);
        self.stats.evicted += 1;
        Some(id)
    }
}

/// Bounded, expiring visitor session tracker.
///
/// Cloning the tracker yields another handle to the same sessions.
///
/// # Example
///
/// ```
/// use portal_visitors::{VisitOutcome, VisitorTracker};
///
/// # tokio_test_block(async {
/// let tracker = VisitorTracker::default();
/// let first = tracker.record_visit("sess-1", "/").await.unwrap();
/// assert_eq!(first, VisitOutcome::NewSession);
///
/// let again = tracker.record_visit("sess-1", "/home").await.unwrap();
/// assert_eq!(again, VisitOutcome::Returning { visits: 2 });
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Clone)]
pub struct VisitorTracker {
    config: TrackerConfig,
    state: Arc<RwLock<TrackerState>>,
}

impl std::fmt::Debug for VisitorTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisitorTracker")
            .field("config", &self.config)
            .finish()
    }
}

impl Default for VisitorTracker {
    fn default() -> Self {
        Self {
            config: TrackerConfig::default(),
            state: Arc::new(RwLock::new(TrackerState::default())),
        }
    }
}

impl VisitorTracker {
    /// Create a tracker with validated configuration.
    pub fn new(config: TrackerConfig) -> TrackerResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: Arc::new(RwLock::new(TrackerState::default())),
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Record a page view for a session.
    ///
    /// The clock is read after the write lock is taken, so concurrent
    /// calls record page views in lock order.
    pub async fn record_visit(&self, session_id: &str, path: &str) -> TrackerResult<VisitOutcome> {
        validate_session_id(session_id)?;
        let mut state = self.state.write().await;
        Ok(self.record_locked(&mut state, session_id, path, Utc::now()))
    }

    /// Record a page view at a given instant.
    ///
    /// An instant earlier than the session's last page view does not move
    /// `last_seen` backwards.
    pub async fn record_visit_at(
        &self,
        session_id: &str,
        path: &str,
        now: DateTime<Utc>,
    ) -> TrackerResult<VisitOutcome> {
        validate_session_id(session_id)?;
        let mut state = self.state.write().await;
        Ok(self.record_locked(&mut state, session_id, path, now))
    }

    fn record_locked(
        &self,
        state: &mut TrackerState,
        session_id: &str,
        path: &str,
        now: DateTime<Utc>,
    ) -> VisitOutcome {
        let ttl = self.config.session_ttl();
        state.stats.total_visits += 1;

        if let Some(existing) = state.sessions.get(session_id) {
            let old_key = existing.recency_key;
            if now - existing.last_seen < ttl {
                let now = now.max(existing.last_seen);
                let key = state.next_key(now);
                state.recency.remove(&old_key);
                state.recency.insert(key, session_id.to_string());

                let visits = match state.sessions.get_mut(session_id) {
                    Some(session) => {
                        session.last_seen = now;
                        session.visits = session.visits.saturating_add(1);
                        session.last_path = path.to_string();
                        session.recency_key = key;
                        session.visits
                    }
                    None => 1,
                };
                return VisitOutcome::Returning { visits };
            }

            state.recency.remove(&old_key);
            state.sessions.remove(session_id);
            state.stats.expired += 1;
        }

        if state.sessions.len() >= self.config.max_sessions {
            state.purge_expired(now, ttl);
        }
        while state.sessions.len() >= self.config.max_sessions {
            match state.evict_oldest() {
                Some(evicted) => {
                    tracing::debug!(session_id = %evicted, "evicted least recently seen visitor session")
                }
                None => break,
            }
        }

        let key = state.next_key(now);
        state.recency.insert(key, session_id.to_string());
        state.sessions.insert(
            session_id.to_string(),
            VisitorSession {
                session_id: session_id.to_string(),
                first_seen: now,
                last_seen: now,
                visits: 1,
                last_path: path.to_string(),
                recency_key: key,
            },
        );
        state.stats.unique_sessions += 1;

        VisitOutcome::NewSession
    }

    /// Get a live session.
    pub async fn session(&self, session_id: &str) -> Option<VisitorSession> {
        self.session_at(session_id, Utc::now()).await
    }

    /// Get a session if it is still live at a given instant.
    pub async fn session_at(&self, session_id: &str, now: DateTime<Utc>) -> Option<VisitorSession> {
        let state = self.state.read().await;
        state
            .sessions
            .get(session_id)
            .filter(|s| now - s.last_seen < self.config.session_ttl())
            .cloned()
    }

    /// Drop every expired session.
    pub async fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now()).await
    }

    /// Drop every session expired at a given instant.
    pub async fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut state = self.state.write().await;
        let purged = state.purge_expired(now, self.config.session_ttl());
        if purged > 0 {
            tracing::debug!(purged, remaining = state.sessions.len(), "purged expired visitor sessions");
        }
        purged
    }

    /// Number of sessions currently held, expired or not.
    pub async fn len(&self) -> usize {
        self.state.read().await.sessions.len()
    }

    /// Check if no sessions are held.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Get tracker statistics.
    pub async fn stats(&self) -> TrackerStats {
        let state = self.state.read().await;
        TrackerStats {
            active_sessions: state.sessions.len(),
            ..state.stats.clone()
        }
    }
}

fn validate_session_id(session_id: &str) -> TrackerResult<()> {
    if session_id.is_empty() || session_id.len() > MAX_SESSION_ID_LEN {
        return Err(TrackerError::InvalidSessionId(session_id.chars().take(32).collect()));
    }
    Ok(())
}
