use std::sync::Arc;

use tracing::warn;

use super::{Lock, LockManager};

/// Holds a lock until dropped.
///
/// Early returns, `?` and panics all pass through `Drop`, so a failed
/// placement can never leave its product locked. After unlocking, the guard
/// hands its handle back to the manager so idle keys are forgotten.
pub struct LockGuard<'a, M: LockManager + ?Sized> {
    manager: &'a M,
    key: String,
    lock: Arc<M::Lock>,
}

impl<'a, M: LockManager + ?Sized> LockGuard<'a, M> {
    pub(crate) fn new(manager: &'a M, key: &str, lock: Arc<M::Lock>) -> Self {
        Self {
            manager,
            key: key.to_string(),
            lock,
        }
    }
}

impl<M: LockManager + ?Sized> Drop for LockGuard<'_, M> {
    fn drop(&mut self) {
        if let Err(e) = self.lock.unlock() {
            warn!(key = %self.key, error = %e, "failed to release lock");
        }
        self.manager.release(&self.key, &self.lock);
    }
}
