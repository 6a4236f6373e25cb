//! Keyed async locks serialising lifecycle operations
//!
//! Every mutating booking operation takes exactly one key before it opens its
//! database transaction, so two requests touching the same vehicle (or the
//! same reservation) never interleave their check and their write. Waiting is
//! bounded: a request that cannot get the key in time fails with
//! `DomainError::Unavailable` and may be retried. A key's mutex lives in the
//! registry only while someone holds or awaits it.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::shared::{DomainError, DomainResult};

/// What a lock protects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockKey {
    /// The (vehicle, interval) space of a vehicle's live reservations
    Vehicle(i32),
    /// One reservation's status, payment and damage records
    Reservation(i32),
}

impl fmt::Display for LockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vehicle(id) => write!(f, "vehicle:{}", id),
            Self::Reservation(id) => write!(f, "reservation:{}", id),
        }
    }
}

/// Registry of per-key mutexes shared by all services.
#[derive(Debug)]
pub struct KeyedLocks {
    locks: DashMap<LockKey, Arc<Mutex<()>>>,
    timeout: Duration,
}

pub type SharedLocks = Arc<KeyedLocks>;

impl KeyedLocks {
    pub fn new(timeout: Duration) -> Self {
        Self {
            locks: DashMap::new(),
            timeout,
        }
    }

    pub fn shared(timeout: Duration) -> SharedLocks {
        Arc::new(Self::new(timeout))
    }

    /// Wait for exclusive ownership of `key`, at most for the configured timeout.
    pub async fn acquire(&self, key: LockKey) -> DomainResult<KeyGuard<'_>> {
        // Clone the Arc out so the shard guard is released before awaiting.
        let lock = self
            .locks
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let acquired = tokio::time::timeout(self.timeout, lock.lock_owned()).await;
        match acquired {
            Ok(guard) => Ok(KeyGuard {
                locks: self,
                key,
                guard: Some(guard),
            }),
            Err(_) => {
                self.evict_idle(&key);
                Err(DomainError::Unavailable(format!(
                    "Timed out after {}ms waiting for {}",
                    self.timeout.as_millis(),
                    key
                )))
            }
        }
    }

    /// Number of keys currently held or awaited.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    // The map's own Arc is the only reference left once nobody holds or
    // awaits the key. remove_if runs under the shard write lock, so no new
    // waiter can clone the mutex between the count check and the removal.
    fn evict_idle(&self, key: &LockKey) {
        self.locks
            .remove_if(key, |_, lock| Arc::strong_count(lock) == 1);
    }
}

/// Exclusive ownership of one key; releasing it evicts the key when idle.
#[derive(Debug)]
pub struct KeyGuard<'a> {
    locks: &'a KeyedLocks,
    key: LockKey,
    guard: Option<OwnedMutexGuard<()>>,
}

impl KeyGuard<'_> {
    pub fn key(&self) -> LockKey {
        self.key
    }
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        // The owned guard keeps its own Arc clone; release it first.
        drop(self.guard.take());
        self.locks.evict_idle(&self.key);
    }
}

impl Default for KeyedLocks {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}
