//! Session registry
//!
//! A `RotationEngine` takes `&mut self` for every mutation and holds no locks of
//! its own. Hosts that serve several callers keep engines here: every session sits
//! behind its own mutex, so calls against one session are serialized while
//! separate sessions never contend.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::config::RotationConfig;
use crate::engine::RotationEngine;
use crate::error::Result;

pub type SessionId = Uuid;
pub type SharedEngine = Arc<Mutex<RotationEngine>>;

/// Process-wide session registry
pub static SESSIONS: Lazy<SessionStore> = Lazy::new(SessionStore::new);

#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, SharedEngine>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty engine for `config` and register it.
    pub fn create(&self, config: RotationConfig) -> Result<SessionId> {
        let engine = RotationEngine::new(config)?;
        Ok(self.insert(engine))
    }

    pub fn insert(&self, engine: RotationEngine) -> SessionId {
        let id = Uuid::new_v4();
        self.write().insert(id, Arc::new(Mutex::new(engine)));
        log::debug!("Registered session {}", id);
        id
    }

    pub fn get(&self, id: &SessionId) -> Option<SharedEngine> {
        self.read().get(id).cloned()
    }

    /// Run `f` with exclusive access to the session's engine.
    ///
    /// Returns `None` if no such session exists.
    pub fn with_session<R>(
        &self,
        id: &SessionId,
        f: impl FnOnce(&mut RotationEngine) -> R,
    ) -> Option<R> {
        let engine = self.get(id)?;
        let mut guard = engine.lock().unwrap_or_else(PoisonError::into_inner);
        Some(f(&mut *guard))
    }

    pub fn remove(&self, id: &SessionId) -> bool {
        let removed = self.write().remove(id).is_some();
        if removed {
            log::debug!("Removed session {}", id);
        }
        removed
    }

    pub fn ids(&self) -> Vec<SessionId> {
        self.read().keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<SessionId, SharedEngine>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<SessionId, SharedEngine>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }
}
