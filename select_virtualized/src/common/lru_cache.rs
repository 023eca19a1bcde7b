// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Bounded memo cache used by the group header formatter.
//!
//! The same group headers come back into the window over and over while the user
//! scrolls, so formatted headers are memoized per `(group key, header height)`. The
//! number of groups is caller controlled and can be large, so the cache is bounded and
//! evicts the least recently used entry once it is full.
//!
//! Lookups go through [`rustc_hash::FxHashMap`]. Keys are internal layout data (group
//! keys and heights), so hash flooding resistance is not needed.

use std::hash::Hash;

use rustc_hash::{FxBuildHasher, FxHashMap};

#[derive(Clone, Debug)]
struct CacheEntry<V> {
    value: V,
    last_access: u64,
}

/// A least recently used cache with a fixed capacity.
///
/// Recency is tracked with a monotonic access counter. Eviction scans for the smallest
/// counter, which is `O(n)`, but only happens on a miss when the cache is full.
#[derive(Debug)]
pub struct LruCache<K, V> {
    map: FxHashMap<K, CacheEntry<V>>,
    capacity: usize,
    access_counter: u64,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// # Panics
    ///
    /// Panics if capacity is 0.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Cache capacity must be greater than 0");
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
            capacity,
            access_counter: 0,
        }
    }

    /// Marks the entry as recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.access_counter += 1;
        let access_counter = self.access_counter;
        self.map.get_mut(key).map(|entry| {
            entry.last_access = access_counter;
            &entry.value
        })
    }

    /// Returns the previous value for the key, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.access_counter += 1;

        if self.map.len() >= self.capacity && !self.map.contains_key(&key) {
            self.evict_least_recently_used();
        }

        let entry = CacheEntry {
            value,
            last_access: self.access_counter,
        };
        self.map.insert(key, entry).map(|it| it.value)
    }

    /// Returns a clone of the cached value, computing and caching it on a miss.
    pub fn get_or_insert_with(&mut self, key: K, compute: impl FnOnce() -> V) -> V {
        if let Some(value) = self.get(&key) {
            return value.clone();
        }
        let value = compute();
        self.insert(key, value.clone());
        value
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.access_counter = 0;
    }

    #[must_use]
    pub fn len(&self) -> usize { self.map.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    #[must_use]
    pub fn capacity(&self) -> usize { self.capacity }

    /// Does NOT update the recency of the entry.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool { self.map.contains_key(key) }

    fn evict_least_recently_used(&mut self) {
        let maybe_lru_key = self
            .map
            .iter()
            .min_by_key(|(_, entry)| entry.last_access)
            .map(|(key, _)| key.clone());
        if let Some(lru_key) = maybe_lru_key {
            self.map.remove(&lru_key);
        }
    }
}
