//! The session store.
//!
//! `SessionStore` owns the [`AppState`] and is the only path for changing it.
//! Every effective mutation runs in the same order: change the state in
//! memory, notify observers once, queue one full snapshot on the writer.
//! Observers always see a finished state, never a half-applied one.
//!
//! The store starts uninitialized. Mutations issued before
//! [`SessionStore::initialize`] are queued and replayed, in call order,
//! right after the persisted state has been loaded.

use std::mem;

use crate::codec::{decode_archive, decode_session, encode_archive, encode_session};
use crate::config::TrackerConfig;
use crate::error::{ShinyError, ShinyResult};
use crate::hunt::{AppState, HuntMethod, HuntSession, HuntSettings};
use crate::storage::{ARCHIVE_KEY, CURRENT_KEY, DirStore, KeyValueStore};
use crate::writer::{SessionWriter, Snapshot};

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&AppState)>;
type PendingOp = Box<dyn FnOnce(&mut SessionStore)>;

/// Owner of the current hunt and the archive of completed hunts.
pub struct SessionStore {
    state: AppState,
    config: TrackerConfig,
    backend: Option<Box<dyn KeyValueStore>>,
    writer: Option<SessionWriter>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    pending: Vec<PendingOp>,
    initialized: bool,
}

impl SessionStore {
    /// Create an uninitialized store over a backend.
    pub fn new(backend: impl KeyValueStore, config: TrackerConfig) -> Self {
        Self {
            state: AppState::default(),
            config,
            backend: Some(Box::new(backend)),
            writer: None,
            observers: Vec::new(),
            next_subscription: 0,
            pending: Vec::new(),
            initialized: false,
        }
    }

    /// Create a store backed by the configured data directory and load it.
    pub fn open(config: TrackerConfig) -> ShinyResult<Self> {
        let dir = config.resolved_data_dir()?;
        tracing::debug!("opening session store in {}", dir.display());
        let mut store = Self::new(DirStore::new(dir), config);
        store.initialize();
        Ok(store)
    }

    /// Load persisted state, start the writer, and replay queued mutations.
    ///
    /// Unreadable or missing data falls back to an empty archive and a fresh
    /// current session. Calling this twice does nothing.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        let mut synthesized = false;
        if let Some(backend) = self.backend.take() {
            self.state.sessions = match backend.get(ARCHIVE_KEY) {
                Ok(Some(blob)) => decode_archive(&blob),
                Ok(None) => Vec::new(),
                Err(e) => {
                    tracing::warn!("cannot read archive, starting empty: {e}");
                    Vec::new()
                }
            };
            let current = match backend.get(CURRENT_KEY) {
                Ok(Some(blob)) => decode_session(&blob),
                Ok(None) => None,
                Err(e) => {
                    tracing::warn!("cannot read current session: {e}");
                    None
                }
            };
            self.state.current = match current {
                Some(session) if self.state.archived(&session.id).is_some() => {
                    tracing::warn!(
                        id = %session.id,
                        "current session is already archived, starting fresh"
                    );
                    synthesized = true;
                    Some(self.fresh_session())
                }
                Some(mut session) => {
                    session.completed = false;
                    Some(session)
                }
                None => {
                    synthesized = true;
                    Some(self.fresh_session())
                }
            };
            self.writer = match SessionWriter::spawn(backend) {
                Ok(writer) => Some(writer),
                Err(e) => {
                    tracing::warn!("cannot start writer, changes will not be saved: {e}");
                    None
                }
            };
        } else {
            synthesized = true;
            self.state.current = Some(self.fresh_session());
        }

        self.initialized = true;
        tracing::debug!(
            archived = self.state.sessions.len(),
            synthesized,
            "session store initialized"
        );

        if synthesized {
            self.persist();
        }

        let queued = mem::take(&mut self.pending);
        if !queued.is_empty() {
            tracing::debug!(count = queued.len(), "replaying queued mutations");
        }
        for op in queued {
            op(self);
        }
    }

    /// Whether [`initialize`](Self::initialize) has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// The whole state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The hunt in progress.
    pub fn current(&self) -> Option<&HuntSession> {
        self.state.current.as_ref()
    }

    /// Archived hunts, most recently completed first.
    pub fn sessions(&self) -> &[HuntSession] {
        &self.state.sessions
    }

    /// Look up an archived hunt by exact id.
    pub fn archived(&self, id: &str) -> Option<&HuntSession> {
        self.state.archived(id)
    }

    /// Look up an archived hunt by exact id or unique id prefix.
    pub fn find_archived_by_prefix(&self, prefix: &str) -> ShinyResult<&HuntSession> {
        if let Some(session) = self.archived(prefix) {
            return Ok(session);
        }
        if prefix.is_empty() {
            return Err(ShinyError::SessionNotFound(prefix.to_string()));
        }
        let mut matches = self
            .state
            .sessions
            .iter()
            .filter(|s| s.id.starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(session), None) => Ok(session),
            (Some(_), Some(_)) => Err(ShinyError::AmbiguousId(prefix.to_string())),
            (None, _) => Err(ShinyError::SessionNotFound(prefix.to_string())),
        }
    }

    // -----------------------------------------------------------------------
    // Observers
    // -----------------------------------------------------------------------

    /// Register a callback fired after every change.
    ///
    /// The argument is a read-only view of the finished state, the same data
    /// [`state`](Self::state) returns afterwards. Notifications carry nothing
    /// else.
    pub fn subscribe(&mut self, observer: impl FnMut(&AppState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove a callback. Returns true if it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() < before
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Apply `f` to the current session, then notify and persist.
    ///
    /// Does nothing when there is no current session.
    pub fn mutate_current<F>(&mut self, f: F)
    where
        F: FnOnce(&mut HuntSession) + 'static,
    {
        if !self.initialized {
            self.pending.push(Box::new(move |s: &mut SessionStore| s.mutate_current(f)));
            return;
        }
        let Some(current) = self.state.current.as_mut() else {
            return;
        };
        f(current);
        self.changed();
    }

    /// Add `delta` attempts. The counter never drops below zero.
    pub fn increment_counter(&mut self, delta: i64) {
        self.mutate_current(move |s| s.add_attempts(delta));
    }

    /// Set the counter back to zero.
    pub fn reset_counter(&mut self) {
        self.mutate_current(|s| s.attempt_counter = 0);
    }

    /// Rename the current session.
    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        self.mutate_current(move |s| s.title = title);
    }

    /// Replace all settings of the current session.
    pub fn update_settings(&mut self, settings: HuntSettings) {
        self.mutate_current(move |s| s.settings = settings);
    }

    /// Change the hunt method.
    pub fn set_method(&mut self, method: HuntMethod) {
        self.mutate_current(move |s| s.settings.method = method);
    }

    /// Toggle the shiny charm.
    pub fn set_shiny_charm(&mut self, active: bool) {
        self.mutate_current(move |s| s.settings.shiny_charm_active = active);
    }

    /// Toggle sparkling power.
    pub fn set_sparkling_power(&mut self, active: bool) {
        self.mutate_current(move |s| s.settings.sparkling_power_active = active);
    }

    /// Set the outbreak defeat count.
    pub fn set_outbreak_defeat_count(&mut self, count: u32) {
        self.mutate_current(move |s| s.settings.outbreak_defeat_count = count);
    }

    /// Archive the current session and start a fresh one.
    ///
    /// Observers are notified once, after both the archive and the new
    /// current session are in place.
    pub fn complete_current(&mut self) {
        if !self.initialized {
            self.pending.push(Box::new(Self::complete_current));
            return;
        }
        let Some(mut finished) = self.state.current.take() else {
            return;
        };
        finished.completed = true;
        tracing::debug!(id = %finished.id, attempts = finished.attempt_counter, "hunt completed");
        self.state.sessions.insert(0, finished);
        self.state.current = Some(self.fresh_session());
        self.changed();
    }

    /// Delete an archived session. Unknown ids are ignored.
    pub fn delete_archived(&mut self, id: &str) {
        if !self.initialized {
            let id = id.to_string();
            self.pending.push(Box::new(move |s: &mut SessionStore| s.delete_archived(&id)));
            return;
        }
        let before = self.state.sessions.len();
        self.state.sessions.retain(|s| s.id != id);
        if self.state.sessions.len() < before {
            self.changed();
        }
    }

    /// Copy title, counter, and settings of an archived session into the
    /// current one. The current session keeps its own id and creation time.
    /// Unknown ids are ignored.
    pub fn load_from_archive(&mut self, id: &str) {
        if !self.initialized {
            let id = id.to_string();
            self.pending.push(Box::new(move |s: &mut SessionStore| s.load_from_archive(&id)));
            return;
        }
        let Some((title, counter, settings)) = self
            .state
            .archived(id)
            .map(|s| (s.title.clone(), s.attempt_counter, s.settings))
        else {
            return;
        };
        let Some(current) = self.state.current.as_mut() else {
            return;
        };
        current.title = title;
        current.attempt_counter = counter;
        current.settings = settings;
        self.changed();
    }

    /// Block until every queued write has been attempted.
    pub fn flush(&self) {
        if let Some(writer) = &self.writer {
            writer.flush();
        }
    }

    fn fresh_session(&self) -> HuntSession {
        HuntSession::titled(self.config.default_title.clone())
    }

    fn changed(&mut self) {
        for (_, observer) in &mut self.observers {
            observer(&self.state);
        }
        self.persist();
    }

    fn persist(&self) {
        let Some(writer) = &self.writer else {
            return;
        };
        let Some(current) = &self.state.current else {
            return;
        };
        match (encode_archive(&self.state.sessions), encode_session(current)) {
            (Ok(archive), Ok(current)) => writer.submit(Snapshot { archive, current }),
            (Err(e), _) | (_, Err(e)) => tracing::warn!("cannot encode state, not saved: {e}"),
        }
    }
}
