use std::sync::Arc;

use super::{Lock, LockError, LockGuard};

/// Hands out one lock per key.
///
/// Repeated calls with the same key must return the same logical lock while
/// anyone holds or waits on it.
pub trait LockManager: Send + Sync {
    /// The concrete lock type returned by this manager.
    type Lock: Lock;

    /// Get (or create) the lock for `key`.
    fn get_lock(&self, key: &str) -> Result<Arc<Self::Lock>, LockError>;

    /// Called once a handle from `get_lock` is done with. Managers that cache
    /// a lock per key drop the entry here when no other handle remains.
    fn release(&self, key: &str, lock: &Arc<Self::Lock>) {
        let _ = (key, lock);
    }

    /// Block until the lock for `key` is held. It is released when the
    /// returned guard drops.
    fn acquire(&self, key: &str) -> Result<LockGuard<'_, Self>, LockError> {
        let lock = self.get_lock(key)?;
        if let Err(e) = lock.lock() {
            self.release(key, &lock);
            return Err(e);
        }
        Ok(LockGuard::new(self, key, lock))
    }
}
