use std::{collections::BTreeMap, hash::Hash};

use ahash::AHashMap;

use crate::error::OsmViewError;

/// Bounded least-recently-used cache.
///
/// Recency is a monotonically increasing tick per access; `order` maps ticks
/// back to keys so the oldest entry is always the first one.
#[derive(Debug, Clone)]
pub struct QueryCache<K, V> {
    capacity: usize,
    tick: u64,
    entries: AHashMap<K, (V, u64)>,
    order: BTreeMap<u64, K>,
}

impl<K: Hash + Eq + Clone, V> QueryCache<K, V> {
    pub fn new(capacity: usize) -> Result<Self, OsmViewError> {
        if capacity == 0 {
            return Err(OsmViewError::invalid("cache capacity must be at least 1"));
        }
        Ok(Self { capacity, tick: 0, entries: AHashMap::new(), order: BTreeMap::new() })
    }

    pub fn capacity(&self) -> usize { self.capacity }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn contains(&self, key: &K) -> bool { self.entries.contains_key(key) }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Look up `key`, marking it most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let tick = self.next_tick();
        let (_, used) = self.entries.get_mut(key)?;
        let old = std::mem::replace(used, tick);
        if let Some(k) = self.order.remove(&old) {
            self.order.insert(tick, k);
        }
        self.entries.get(key).map(|(v, _)| v)
    }

    /// Insert or replace `key`, evicting the least recently used entry when full.
    /// Returns the evicted key, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<K> {
        let tick = self.next_tick();
        if let Some((_, old)) = self.entries.remove(&key) {
            self.order.remove(&old);
        }

        let mut evicted = None;
        if self.entries.len() >= self.capacity {
            if let Some((_, oldest)) = self.order.pop_first() {
                self.entries.remove(&oldest);
                evicted = Some(oldest);
            }
        }

        self.order.insert(tick, key.clone());
        self.entries.insert(key, (value, tick));
        evicted
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_invalid() {
        assert!(QueryCache::<u32, u32>::new(0).is_err());
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = QueryCache::new(2).unwrap();
        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.get(&"a"), Some(&1));

        let evicted = cache.insert("c", 3);
        assert_eq!(evicted, Some("b"));
        assert!(cache.contains(&"a"));
        assert!(!cache.contains(&"b"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn replacing_refreshes_without_evicting() {
        let mut cache = QueryCache::new(2).unwrap();
        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.insert("a", 10), None);
        assert_eq!(cache.get(&"a"), Some(&10));
        assert_eq!(cache.insert("c", 3), Some("b"));
    }

    #[test]
    fn miss_leaves_order_alone() {
        let mut cache = QueryCache::new(1).unwrap();
        cache.insert(1, "one");
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&1), Some(&"one"));
    }

    #[test]
    fn clear_empties() {
        let mut cache = QueryCache::new(3).unwrap();
        cache.insert(1, ());
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.insert(2, ()), None);
    }
}
