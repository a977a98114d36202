//! Bounded memo of photometric transform results.
//!
//! Keys are `(hex, light id)` pairs. When an insert pushes the map past its
//! capacity, one entry is evicted according to the [`EvictionPolicy`].

use std::collections::{HashMap, VecDeque};

use crate::color::HexColor;

/// Default maximum number of cached transforms.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Which entry to drop once the cache is over capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// Drop the oldest inserted entry. Lookups do not refresh entries.
    #[default]
    InsertionOrder,
    /// Drop the least recently inserted or looked-up entry.
    LeastRecentlyUsed,
}

type Key = (HexColor, String);

/// Bounded `(hex, light id) → hex` map.
#[derive(Debug, Clone)]
pub struct TransformCache {
    capacity: usize,
    policy: EvictionPolicy,
    entries: HashMap<Key, HexColor>,
    // Front is the next eviction candidate.
    order: VecDeque<Key>,
}

impl Default for TransformCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, EvictionPolicy::default())
    }
}

impl TransformCache {
    /// Creates an empty cache. A capacity of 0 is raised to 1.
    pub fn new(capacity: usize, policy: EvictionPolicy) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            policy,
            entries: HashMap::with_capacity(capacity + 1),
            order: VecDeque::with_capacity(capacity + 1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a cached result. Under LRU this marks the entry as used.
    pub fn get(&mut self, hex: &HexColor, light_id: &str) -> Option<HexColor> {
        let key = (hex.clone(), light_id.to_string());
        let hit = self.entries.get(&key).cloned()?;
        if self.policy == EvictionPolicy::LeastRecentlyUsed {
            self.touch(&key);
        }
        Some(hit)
    }

    /// Stores a result, evicting one entry if the capacity is exceeded.
    pub fn insert(&mut self, hex: HexColor, light_id: &str, result: HexColor) {
        let key = (hex, light_id.to_string());
        if self.entries.insert(key.clone(), result).is_some() {
            if self.policy == EvictionPolicy::LeastRecentlyUsed {
                self.touch(&key);
            }
            return;
        }
        self.order.push_back(key);
        if self.entries.len() > self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.entries.remove(&evicted);
                log::trace!("transform cache evicted {} under '{}'", evicted.0, evicted.1);
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn touch(&mut self, key: &Key) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }
}
