//! TTL read cache
//!
//! `key -> (value, expiry)`. An entry read after its expiry is treated as
//! absent and dropped; expired entries are also purged whenever a new one is
//! stored. There is no fine-grained invalidation: writers clear the whole
//! cache.
//!
//! Every [`invalidate_all`](QueryCache::invalidate_all) bumps a generation
//! counter. A reader takes the generation before loading and hands it back to
//! [`set`](QueryCache::set); a value computed from a document loaded before a
//! write finished is then discarded instead of being cached.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

/// Default time-to-live of a cached read
pub const DEFAULT_TTL: Duration = Duration::from_secs(15);

#[derive(Debug)]
struct Entry<V> {
    value: V,
    expires_at: Instant,
}

#[derive(Debug)]
struct Inner<V> {
    generation: u64,
    entries: HashMap<String, Entry<V>>,
}

#[derive(Debug)]
pub struct QueryCache<V> {
    ttl: Duration,
    inner: Mutex<Inner<V>>,
}

impl<V: Clone> QueryCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Mutex::new(Inner {
                generation: 0,
                entries: HashMap::new(),
            }),
        }
    }

    /// Current generation, taken by a reader before it loads
    pub fn generation(&self) -> u64 {
        self.inner.lock().generation
    }

    /// Live value for `key`, if any
    pub fn get(&self, key: &str) -> Option<V> {
        let mut inner = self.inner.lock();
        match inner.entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                inner.entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store `value` under `key` for one TTL from now
    ///
    /// Returns `false` and stores nothing when the cache was invalidated
    /// since `generation` was taken.
    pub fn set(&self, generation: u64, key: impl Into<String>, value: V) -> bool {
        let now = Instant::now();
        let mut inner = self.inner.lock();
        if inner.generation != generation {
            return false;
        }
        inner.entries.retain(|_, e| e.expires_at > now);
        inner.entries.insert(
            key.into(),
            Entry {
                value,
                expires_at: now + self.ttl,
            },
        );
        true
    }

    /// Drop every entry and start a new generation
    pub fn invalidate_all(&self) {
        let mut inner = self.inner.lock();
        inner.generation = inner.generation.wrapping_add(1);
        inner.entries.clear();
    }

    /// Number of entries that have not expired yet
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.inner
            .lock()
            .entries
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> Default for QueryCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
