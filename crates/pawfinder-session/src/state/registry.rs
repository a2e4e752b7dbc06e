//! # Instance Registry
//!
//! Live component instances of one kind, keyed by id.
//!
//! ## Thread Safety
//! The map is wrapped in `Arc<Mutex<T>>` because:
//! 1. The host bridge may deliver events for different components from
//!    different threads
//! 2. Each transition must see the result of the previous one
//!
//! Every command holds the lock only for a single pure transition. A
//! poisoned lock is reported as [`SessionError::StatePoisoned`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

use crate::error::{SessionError, SessionResult};

#[derive(Debug)]
pub struct InstanceRegistry<T> {
    kind: &'static str,
    instances: Arc<Mutex<HashMap<Uuid, T>>>,
}

impl<T> Clone for InstanceRegistry<T> {
    fn clone(&self) -> Self {
        InstanceRegistry {
            kind: self.kind,
            instances: Arc::clone(&self.instances),
        }
    }
}

impl<T> InstanceRegistry<T> {
    /// `kind` names the component family in errors and logs.
    pub fn new(kind: &'static str) -> Self {
        InstanceRegistry {
            kind,
            instances: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    fn lock(&self) -> SessionResult<MutexGuard<'_, HashMap<Uuid, T>>> {
        self.instances
            .lock()
            .map_err(|_| SessionError::StatePoisoned(self.kind))
    }

    fn unknown(&self, id: Uuid) -> SessionError {
        SessionError::UnknownInstance {
            kind: self.kind,
            id,
        }
    }

    /// Stores a new instance under a fresh id.
    pub fn insert(&self, instance: T) -> SessionResult<Uuid> {
        let id = Uuid::new_v4();
        self.lock()?.insert(id, instance);
        Ok(id)
    }

    /// Replaces the instance with `transition(instance)` and reads the
    /// result through `read`.
    pub fn update<F, R, Q>(&self, id: Uuid, transition: F, read: R) -> SessionResult<Q>
    where
        F: FnOnce(T) -> T,
        R: FnOnce(&T) -> Q,
    {
        let mut instances = self.lock()?;
        let current = instances.remove(&id).ok_or_else(|| self.unknown(id))?;
        let next = transition(current);
        let out = read(&next);
        instances.insert(id, next);
        Ok(out)
    }

    /// Reads the instance without changing it.
    pub fn with<R, Q>(&self, id: Uuid, read: R) -> SessionResult<Q>
    where
        R: FnOnce(&T) -> Q,
    {
        let instances = self.lock()?;
        instances.get(&id).map(read).ok_or_else(|| self.unknown(id))
    }

    /// Drops the instance (component unmounted).
    pub fn remove(&self, id: Uuid) -> SessionResult<T> {
        self.lock()?.remove(&id).ok_or_else(|| self.unknown(id))
    }

    pub fn len(&self) -> SessionResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> SessionResult<bool> {
        Ok(self.lock()?.is_empty())
    }
}
