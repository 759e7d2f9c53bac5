//! Size-weighted LRU cache for host texture resources.

use lru::LruCache;
use tracing::trace;

/// Guest-side identity of a cached texture (its backing address).
pub type TextureKey = u64;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub replacements: u64,
}

struct CacheEntry<V> {
    value: V,
    size_bytes: u64,
}

/// An LRU map from [`TextureKey`] to host resources, budgeted in bytes.
///
/// Entries are weighted by caller-declared sizes against a fixed byte
/// capacity; exceeding it pops least-recently-used entries. Every removed
/// value (evicted, replaced or dropped with the cache) is handed to the
/// release function injected at construction, exactly once.
///
/// [`lock`]/[`unlock`] fence eviction: while the depth is non-zero nothing
/// is evicted no matter how far the budget is exceeded, and the unlock that
/// returns the depth to zero runs the deferred sweep. Replacement under the
/// same key still releases the old value while locked; the fence defers
/// capacity pressure, not explicit overwrites.
///
/// [`lock`]: ResourceCache::lock
/// [`unlock`]: ResourceCache::unlock
pub struct ResourceCache<V> {
    entries: LruCache<TextureKey, CacheEntry<V>>,
    capacity_bytes: u64,
    total_bytes: u64,
    lock_depth: u32,
    release: Box<dyn FnMut(V)>,
    stats: CacheStats,
}

impl<V> ResourceCache<V> {
    pub fn new(capacity_bytes: u64, release: impl FnMut(V) + 'static) -> Self {
        Self {
            entries: LruCache::unbounded(),
            capacity_bytes,
            total_bytes: 0,
            lock_depth: 0,
            release: Box::new(release),
            stats: CacheStats::default(),
        }
    }

    /// Inserts or replaces the entry under `key`, marking it
    /// most-recently-used.
    pub fn insert(&mut self, key: TextureKey, value: V, size_bytes: u64) {
        let entry = CacheEntry { value, size_bytes };
        if let Some(old) = self.entries.put(key, entry) {
            debug_assert!(self.total_bytes >= old.size_bytes);
            self.total_bytes -= old.size_bytes;
            (self.release)(old.value);
            self.stats.replacements += 1;
        }
        self.total_bytes += size_bytes;
        if self.lock_depth == 0 {
            self.evict_to_capacity();
        }
    }

    /// Looks up `key`, refreshing its recency on a hit.
    pub fn get(&mut self, key: TextureKey) -> Option<&V> {
        match self.entries.get(&key) {
            Some(entry) => {
                self.stats.hits += 1;
                Some(&entry.value)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Declared size of the entry under `key`, without touching recency.
    pub fn peek_size(&self, key: TextureKey) -> Option<u64> {
        self.entries.peek(&key).map(|entry| entry.size_bytes)
    }

    /// Defers eviction until the matching [`unlock`](ResourceCache::unlock).
    /// Locks nest.
    pub fn lock(&mut self) {
        self.lock_depth += 1;
    }

    /// Releases one lock level. The call that returns the depth to zero runs
    /// the deferred eviction sweep.
    ///
    /// # Panics
    ///
    /// Panics when the cache is not locked; an unbalanced unlock is a caller
    /// bug worth failing fast on.
    pub fn unlock(&mut self) {
        assert!(self.lock_depth > 0, "texture cache unlock without a matching lock");
        self.lock_depth -= 1;
        if self.lock_depth == 0 {
            self.evict_to_capacity();
        }
    }

    /// Runs `f` with the cache locked; the lock is released on the way out
    /// so callers cannot leak it on early return.
    pub fn locked<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.lock();
        let out = f(self);
        self.unlock();
        out
    }

    pub fn is_locked(&self) -> bool {
        self.lock_depth > 0
    }

    pub fn lock_depth(&self) -> u32 {
        self.lock_depth
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn capacity_bytes(&self) -> u64 {
        self.capacity_bytes
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    fn evict_to_capacity(&mut self) {
        while self.total_bytes > self.capacity_bytes {
            let Some((key, entry)) = self.entries.pop_lru() else {
                break;
            };
            debug_assert!(self.total_bytes >= entry.size_bytes);
            self.total_bytes -= entry.size_bytes;
            (self.release)(entry.value);
            self.stats.evictions += 1;
            trace!(key, size_bytes = entry.size_bytes, "evicted texture cache entry");
        }
    }
}

impl<V> Drop for ResourceCache<V> {
    fn drop(&mut self) {
        while let Some((_, entry)) = self.entries.pop_lru() {
            (self.release)(entry.value);
        }
    }
}
