//! Chunked Upload Session Manager
//!
//! Tracks chunked uploads per destination with:
//! - One async mutex per `(submission, file name)` serializing its chunks
//! - Next expected chunk index and bytes received
//! - Periodic cleanup of sessions nobody touched for a while

use std::collections::HashMap;
use std::sync::Arc;
use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use super::types::{ChunkProgress, SubmissionId, DEFAULT_STALE_HOURS};

// ============================================================================
// Keys
// ============================================================================

/// Destination of a chunked upload
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UploadKey {
    pub submission: SubmissionId,
    pub file_name: String,
}

impl UploadKey {
    pub fn new(submission: &SubmissionId, file_name: &str) -> Self {
        Self {
            submission: submission.clone(),
            file_name: file_name.to_string(),
        }
    }
}

/// Session slot; `None` until the first chunk lands
pub type SessionSlot = Arc<Mutex<Option<ChunkProgress>>>;

// ============================================================================
// Session Manager
// ============================================================================

/// Manages chunked upload sessions
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionManagerInner>,
}

struct SessionManagerInner {
    /// Sessions indexed by destination
    sessions: RwLock<HashMap<UploadKey, SessionSlot>>,

    /// Hours after which an untouched session is dropped
    stale_after_hours: i64,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new() -> Self {
        Self::with_stale_after(DEFAULT_STALE_HOURS)
    }

    /// Create a session manager with a custom expiry window
    pub fn with_stale_after(hours: i64) -> Self {
        Self {
            inner: Arc::new(SessionManagerInner {
                sessions: RwLock::new(HashMap::new()),
                stale_after_hours: hours,
            }),
        }
    }

    // ========================================================================
    // Session Lifecycle
    // ========================================================================

    /// Get the slot for a destination, inserting an empty one if needed.
    ///
    /// Callers lock the returned slot for the whole check-and-append so that
    /// chunks for one destination are applied one at a time.
    pub async fn slot(&self, key: &UploadKey) -> SessionSlot {
        {
            let sessions = self.inner.sessions.read().await;
            if let Some(slot) = sessions.get(key) {
                return slot.clone();
            }
        }

        let mut sessions = self.inner.sessions.write().await;
        sessions
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(None)))
            .clone()
    }

    /// Drop a slot that never received a chunk and that no other request holds.
    ///
    /// Callers must drop their own handle to the slot first.
    pub async fn release_if_idle(&self, key: &UploadKey) {
        let mut sessions = self.inner.sessions.write().await;
        let idle = sessions
            .get(key)
            .filter(|slot| Arc::strong_count(slot) == 1)
            .and_then(|slot| slot.try_lock().ok().map(|progress| progress.is_none()))
            .unwrap_or(false);

        if idle {
            sessions.remove(key);
        }
    }

    /// Snapshot of a session's progress
    pub async fn get_progress(&self, key: &UploadKey) -> Option<ChunkProgress> {
        let slot = {
            let sessions = self.inner.sessions.read().await;
            sessions.get(key).cloned()
        }?;

        let progress = slot.lock().await;
        progress.clone()
    }

    /// Get session count
    pub async fn session_count(&self) -> usize {
        let sessions = self.inner.sessions.read().await;
        sessions.len()
    }

    // ========================================================================
    // Cleanup
    // ========================================================================

    /// Clean up sessions older than the configured window
    ///
    /// Returns the number of sessions cleaned up
    pub async fn cleanup_stale(&self) -> usize {
        self.cleanup_older_than(self.inner.stale_after_hours).await
    }

    /// Clean up sessions not updated within `hours`
    ///
    /// Sessions held by a request, locked or about to be, are skipped.
    pub async fn cleanup_older_than(&self, hours: i64) -> usize {
        let cutoff = Utc::now() - chrono::Duration::hours(hours);

        let mut sessions = self.inner.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|key, slot| {
            if Arc::strong_count(slot) > 1 {
                return true;
            }

            let Ok(progress) = slot.try_lock() else {
                return true;
            };
            match progress.as_ref() {
                Some(p) if p.updated_at < cutoff => {
                    tracing::debug!(
                        submission = %key.submission,
                        file_name = %key.file_name,
                        complete = p.is_complete(),
                        "Cleaned up stale upload session"
                    );
                    false
                }
                Some(_) => true,
                None => false,
            }
        });

        let count = before - sessions.len();
        if count > 0 {
            tracing::info!(count = count, "Cleaned up stale upload sessions");
        }

        count
    }

    /// Start background cleanup task
    pub fn start_cleanup_task(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(300)); // 5 minutes

            loop {
                interval.tick().await;
                self.cleanup_stale().await;
            }
        })
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
