use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex};

use tracing::warn;

use super::{Lock, LockError, LockManager};

/// In-memory lock backed by `Mutex<bool>` + `Condvar`.
///
/// Unlike `std::sync::Mutex` it is not tied to a guard's lifetime, so it can
/// be handed around as `Arc<InMemoryLock>` and released from `LockGuard`.
pub struct InMemoryLock {
    state: Mutex<bool>,
    wake: Condvar,
}

impl InMemoryLock {
    pub fn new() -> Self {
        InMemoryLock {
            state: Mutex::new(false),
            wake: Condvar::new(),
        }
    }

    #[cfg(test)]
    fn try_lock(&self) -> bool {
        let mut locked = self.state.lock().unwrap();
        !std::mem::replace(&mut *locked, true)
    }
}

impl Default for InMemoryLock {
    fn default() -> Self {
        Self::new()
    }
}

impl Lock for InMemoryLock {
    fn lock(&self) -> Result<(), LockError> {
        let mut locked = self
            .state
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        while *locked {
            locked = self
                .wake
                .wait(locked)
                .map_err(|e| LockError::Poisoned(e.to_string()))?;
        }
        *locked = true;
        Ok(())
    }

    fn unlock(&self) -> Result<(), LockError> {
        let mut locked = self
            .state
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        if *locked {
            *locked = false;
            self.wake.notify_one();
        }
        Ok(())
    }
}

/// In-memory lock manager: one lazily created `InMemoryLock` per key, kept
/// only while some guard holds or waits on it.
#[derive(Default)]
pub struct InMemoryLockManager {
    locks: Mutex<HashMap<String, Arc<InMemoryLock>>>,
}

impl InMemoryLockManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys with a live lock.
    pub fn len(&self) -> Result<usize, LockError> {
        Ok(self
            .locks
            .lock()
            .map_err(|_| LockError::Poisoned("lock manager map poisoned".into()))?
            .len())
    }

    pub fn is_empty(&self) -> Result<bool, LockError> {
        Ok(self.len()? == 0)
    }

    #[cfg(test)]
    pub(crate) fn try_acquire(&self, key: &str) -> Option<super::LockGuard<'_, Self>> {
        let lock = self.get_lock(key).unwrap();
        if lock.try_lock() {
            Some(super::LockGuard::new(self, key, lock))
        } else {
            self.release(key, &lock);
            None
        }
    }
}

impl LockManager for InMemoryLockManager {
    type Lock = InMemoryLock;

    fn get_lock(&self, key: &str) -> Result<Arc<InMemoryLock>, LockError> {
        if key.is_empty() {
            return Err(LockError::AcquireFailed("empty lock key".into()));
        }
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| LockError::Poisoned("lock manager map poisoned".into()))?;
        Ok(locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(InMemoryLock::new()))
            .clone())
    }

    fn release(&self, key: &str, lock: &Arc<InMemoryLock>) {
        let mut locks = match self.locks.lock() {
            Ok(locks) => locks,
            Err(_) => {
                warn!(key, "lock manager map poisoned; entry kept");
                return;
            }
        };
        // New handles are only cloned under this mutex, so a count of two
        // (the map's and the caller's) means nobody else holds or waits.
        let idle = locks
            .get(key)
            .is_some_and(|cached| Arc::ptr_eq(cached, lock) && Arc::strong_count(lock) == 2);
        if idle {
            locks.remove(key);
        }
    }
}
