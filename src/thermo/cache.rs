//! Bounded resolution cache.
//!
//! Resolving a component can be the most expensive step of a query, and
//! interactive clients tend to repeat the same state point. [`Cached`] wraps a
//! backend and memoises `resolve` per `(component, temperature, pressure)` in a
//! least-recently-used cache of fixed capacity.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::thermo::{
    BackendResult, ChemicalHandle, Property, PropertyBackend, PropertyValue,
    Provenance, SearchHit, StatePoint,
};

/// Least-recently-used map with a fixed capacity.
///
/// Entries are kept in recency order: the front is the eviction candidate,
/// the back the most recently used entry.
#[derive(Debug)]
pub struct LruCache<K, V> {
    entries: IndexMap<K, V>,
    capacity: usize,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates an empty cache. A capacity of zero stores nothing.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns the value for `key` and marks it most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let index = self.entries.get_index_of(key)?;
        let last = self.entries.len() - 1;
        self.entries.move_index(index, last);
        self.entries.get_index(last).map(|(_, value)| value)
    }

    /// Inserts or replaces `key`, evicting the least recently used entry when full.
    pub fn insert(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        if let Some(index) = self.entries.get_index_of(&key) {
            let last = self.entries.len() - 1;
            self.entries[index] = value;
            self.entries.move_index(index, last);
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.shift_remove_index(0);
        }
        self.entries.insert(key, value);
    }

    /// Returns `true` if `key` is cached, without touching recency.
    #[cfg(test)]
    fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Cache key: normalised component name plus the exact state point bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StateKey {
    component: String,
    temperature: u64,
    pressure: u64,
}

impl StateKey {
    fn new(component: &str, state: StatePoint) -> Self {
        Self {
            component: component.trim().to_lowercase(),
            temperature: state.temperature.to_bits(),
            pressure: state.pressure.to_bits(),
        }
    }
}

/// Counters describing cache effectiveness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups forwarded to the wrapped backend.
    pub misses: u64,
    /// Entries currently cached.
    pub entries: usize,
    /// Maximum number of entries.
    pub capacity: usize,
}

/// A backend decorator that memoises successful resolutions.
///
/// Failed resolutions are not cached.
#[derive(Debug)]
pub struct Cached<B> {
    inner: B,
    cache: LruCache<StateKey, ChemicalHandle>,
    hits: u64,
    misses: u64,
}

impl<B: PropertyBackend> Cached<B> {
    /// Wraps `inner` with a cache of the given capacity.
    #[must_use]
    pub fn new(inner: B, capacity: usize) -> Self {
        Self {
            inner,
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }
}

impl<B: PropertyBackend> PropertyBackend for Cached<B> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn resolve(&mut self, component: &str, state: StatePoint) -> BackendResult<ChemicalHandle> {
        let key = StateKey::new(component, state);
        if let Some(handle) = self.cache.get(&key) {
            self.hits += 1;
            tracing::trace!(component, "Resolution cache hit");
            return Ok(handle.clone());
        }

        self.misses += 1;
        let handle = self.inner.resolve(component, state)?;
        self.cache.insert(key, handle.clone());
        Ok(handle)
    }

    fn property(&self, handle: &ChemicalHandle, property: Property) -> BackendResult<PropertyValue> {
        self.inner.property(handle, property)
    }

    fn describe(&self, handle: &ChemicalHandle, property: Property) -> Provenance {
        self.inner.describe(handle, property)
    }

    fn search(&self, query: &str) -> Vec<SearchHit> {
        self.inner.search(query)
    }

    fn components(&self) -> Vec<String> {
        self.inner.components()
    }

    fn properties(&self) -> &'static [Property] {
        self.inner.properties()
    }

    fn cache_stats(&self) -> Option<CacheStats> {
        Some(CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.cache.len(),
            capacity: self.cache.capacity(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thermo::mock::MockBackend;

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.get(&"a"), Some(&1));

        cache.insert("c", 3);
        assert!(cache.contains(&"a"));
        assert!(!cache.contains(&"b"));
        assert!(cache.contains(&"c"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn reinsert_refreshes_recency() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("a", 10);
        cache.insert("c", 3);

        assert_eq!(cache.get(&"a"), Some(&10));
        assert!(!cache.contains(&"b"));
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let mut cache = LruCache::new(0);
        cache.insert("a", 1);
        assert!(cache.is_empty());
        assert_eq!(cache.get(&"a"), None);
    }

    #[test]
    fn repeated_resolution_hits_cache() {
        let mut backend = Cached::new(MockBackend::new(), 4);
        let state = StatePoint::new(298.15, 101_325.0).unwrap();

        let first = backend.resolve("water", state).unwrap();
        let second = backend.resolve("Water ", state).unwrap();
        assert_eq!(first, second);

        let stats = backend.cache_stats().unwrap();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn different_state_points_are_distinct_keys() {
        let mut backend = Cached::new(MockBackend::new(), 4);
        backend
            .resolve("water", StatePoint::new(298.15, 101_325.0).unwrap())
            .unwrap();
        backend
            .resolve("water", StatePoint::new(308.15, 101_325.0).unwrap())
            .unwrap();

        let stats = backend.cache_stats().unwrap();
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.entries, 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let mut backend = Cached::new(MockBackend::new(), 4);
        let state = StatePoint::new(298.15, 101_325.0).unwrap();
        assert!(backend.resolve("unobtainium", state).is_err());
        assert!(backend.resolve("unobtainium", state).is_err());

        let stats = backend.cache_stats().unwrap();
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.entries, 0);
    }
}
