//! Handoff of the selected author from the search step to the publications step.
//!
//! Each session is a single slot: written when the user picks a candidate,
//! read when the publications step starts. A missing slot is
//! [`LookupError::NoSelection`], which front ends turn into "go back to
//! search" rather than a failure.
//!
//! - [`FileSession`]: one JSON file, used by the CLI between invocations.
//! - [`SessionStore`]: in-memory slots keyed by session id, used by the HTTP API.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::error::{LookupError, LookupResult};
use crate::models::AuthorSummary;

/// Idle time after which an HTTP session is dropped.
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(3600);

/// How often stale sessions are swept.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Selection slot backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    /// Slot at `path`. Nothing is touched until the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the slot.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store `author` as the current selection, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns error if the file or its parent directory cannot be written.
    pub fn write(&self, author: &AuthorSummary) -> LookupResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_vec_pretty(author)?;
        std::fs::write(&self.path, body)?;
        tracing::debug!(path = %self.path.display(), author = %author.full_name(), "Selection saved");
        Ok(())
    }

    /// Read the current selection.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NoSelection`] if nothing was selected yet, or a
    /// session error if the slot is unreadable.
    pub fn read(&self) -> LookupResult<AuthorSummary> {
        let body = match std::fs::read(&self.path) {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(LookupError::NoSelection),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&body).map_err(|e| {
            LookupError::session(format!("corrupt selection in {}: {e}", self.path.display()))
        })
    }

    /// Forget the current selection. Clearing an empty slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be removed.
    pub fn clear(&self) -> LookupResult<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    author: AuthorSummary,
    last_active: Instant,
}

/// In-memory selection slots for concurrent HTTP clients.
///
/// Each session id owns one slot; the selection request is its only writer
/// and the publications request its reader.
#[derive(Debug, Default)]
pub struct SessionStore {
    slots: RwLock<HashMap<String, Slot>>,
}

impl SessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `author` for `session_id`, minting a new id when none is given.
    /// Returns the id the selection was stored under.
    pub async fn select(&self, session_id: Option<String>, author: AuthorSummary) -> String {
        let id = session_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        tracing::debug!(session = %id, author = %author.full_name(), "Selection stored");
        self.slots
            .write()
            .await
            .insert(id.clone(), Slot { author, last_active: Instant::now() });
        id
    }

    /// The selection stored for `session_id`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NoSelection`] if the session has no selection.
    pub async fn selected(&self, session_id: &str) -> LookupResult<AuthorSummary> {
        let mut slots = self.slots.write().await;
        let slot = slots.get_mut(session_id).ok_or(LookupError::NoSelection)?;
        slot.last_active = Instant::now();
        Ok(slot.author.clone())
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    /// Whether no session holds a selection.
    pub async fn is_empty(&self) -> bool {
        self.slots.read().await.is_empty()
    }

    /// Drop sessions idle for longer than `max_idle`. Returns how many were removed.
    pub async fn purge_idle(&self, max_idle: Duration) -> usize {
        let mut slots = self.slots.write().await;
        let before = slots.len();
        slots.retain(|_, slot| slot.last_active.elapsed() <= max_idle);
        before - slots.len()
    }

    /// Spawn the background sweep of idle sessions.
    pub fn start_cleanup_task(self: Arc<Self>) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
            loop {
                interval.tick().await;
                let removed = self.purge_idle(SESSION_TIMEOUT).await;
                if removed > 0 {
                    tracing::debug!(count = removed, "Cleaned up idle sessions");
                }
            }
        });
    }
}
