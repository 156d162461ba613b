//! Per-key mutual exclusion.
//!
//! Order placement reads a product, checks its stock and writes it back.
//! Two placements for the same product must not interleave inside that
//! sequence, so each one holds the product's lock for its duration.
//! Placements for different products use different locks and never wait
//! on each other.
//!
//! ```ignore
//! let locks = InMemoryLockManager::new();
//! let _guard = locks.acquire("products:42")?;
//! // read, check, write ...
//! // released when `_guard` drops
//! ```

mod error;
mod guard;
mod in_memory;
mod lock;
mod lock_manager;

pub use error::LockError;
pub use guard::LockGuard;
pub use in_memory::{InMemoryLock, InMemoryLockManager};
pub use lock::Lock;
pub use lock_manager::LockManager;
