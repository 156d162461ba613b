use super::LockError;

/// A single lock instance.
///
/// The in-memory implementation uses `Mutex` + `Condvar`; a store shared
/// between processes would back this with its own primitive (advisory
/// locks, leases).
pub trait Lock: Send + Sync {
    /// Acquire the lock, blocking until it becomes available.
    fn lock(&self) -> Result<(), LockError>;

    /// Release the lock.
    fn unlock(&self) -> Result<(), LockError>;
}
