//! Widget sessions and session storage.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex as AsyncMutex, MutexGuard};
use uuid::Uuid;

use crate::chat::{ChatForm, ChatMode, Outgoing, Submission};

/// State guarded by the session lock.
#[derive(Debug)]
pub struct WidgetState {
    /// The form controller for this page.
    pub form: ChatForm,
    /// Outgoing requests whose reply has not been requested by the page yet.
    queued: VecDeque<Outgoing>,
}

impl WidgetState {
    /// Outgoing requests not yet dispatched, oldest first.
    pub fn queued(&self) -> impl Iterator<Item = &Outgoing> {
        self.queued.iter()
    }

    /// Run the synchronous half of submit and queue any request it owes.
    pub fn submit(&mut self) -> Submission {
        let submission = self.form.begin_submit();
        if let Submission::Outgoing(outgoing) = &submission {
            self.queued.push_back(outgoing.clone());
        }
        submission
    }

    /// Remove queued request `seq` so exactly one caller dispatches it.
    pub fn take_queued(&mut self, seq: u64) -> Option<Outgoing> {
        let pos = self.queued.iter().position(|o| o.seq == seq)?;
        self.queued.remove(pos)
    }
}

/// A single page session.
///
/// Each page load gets its own session owning one [`ChatForm`]. Handles are
/// cheap to clone and share the same state.
#[derive(Debug, Clone)]
pub struct WidgetSession {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    /// Unique session identifier.
    id: String,
    /// Form state. Never held across the outbound request.
    state: AsyncMutex<WidgetState>,
    /// Last activity time.
    last_activity: Mutex<DateTime<Utc>>,
}

impl WidgetSession {
    fn new(id: String, mode: ChatMode) -> Self {
        let now = Utc::now();
        Self {
            inner: Arc::new(SessionInner {
                id,
                state: AsyncMutex::new(WidgetState {
                    form: ChatForm::new(mode),
                    queued: VecDeque::new(),
                }),
                last_activity: Mutex::new(now),
            }),
        }
    }

    /// Get the session ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Lock the widget state, marking the session active.
    pub async fn lock(&self) -> MutexGuard<'_, WidgetState> {
        self.touch();
        self.inner.state.lock().await
    }

    fn touch(&self) {
        let mut guard = self
            .inner
            .last_activity
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Utc::now();
    }

    /// Check if the session has been idle longer than `timeout`.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        let last = *self
            .inner
            .last_activity
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Negative duration means clock skew; treat as active.
        (Utc::now() - last)
            .to_std()
            .is_ok_and(|idle| idle > timeout)
    }
}

/// Thread-safe store for widget sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

#[derive(Debug)]
struct SessionStoreInner {
    mode: ChatMode,
    sessions: RwLock<HashMap<String, WidgetSession>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(ChatMode::default())
    }
}

impl SessionStore {
    /// Create a store whose sessions run in `mode`.
    #[must_use]
    pub fn new(mode: ChatMode) -> Self {
        Self {
            inner: Arc::new(SessionStoreInner {
                mode,
                sessions: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Create a new session and return it.
    #[must_use]
    pub fn create(&self) -> WidgetSession {
        let id = Uuid::new_v4().to_string();
        let session = WidgetSession::new(id.clone(), self.inner.mode);
        self.write().insert(id, session.clone());
        session
    }

    /// Get a session by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<WidgetSession> {
        self.read().get(id).cloned()
    }

    /// Get the number of active sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if there are no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove sessions that have been inactive longer than the timeout.
    ///
    /// Returns the IDs of the removed sessions.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> Vec<String> {
        let mut guard = self.write();
        let mut removed = Vec::new();
        guard.retain(|id, session| {
            let expired = session.is_expired_with_timeout(timeout);
            if expired {
                removed.push(id.clone());
            }
            !expired
        });
        removed
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, WidgetSession>> {
        self.inner
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, WidgetSession>> {
        self.inner
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
