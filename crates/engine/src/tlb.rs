use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::{FrameId, PageId};

/// Default number of translations the TLB caches.
pub const DEFAULT_TLB_CAPACITY: usize = 4;

/// Hit and miss counters accumulated by a [`Tlb`] over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlbStats {
    /// Lookups served from the cache.
    pub hits: u64,
    /// Lookups that fell through to the page table.
    pub misses: u64,
}

impl TlbStats {
    /// Percentage of lookups served from the cache, `0.0` when no lookups
    /// occurred.
    #[must_use]
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64 * 100.0
        }
    }
}

/// A fully associative translation lookaside buffer with LRU eviction.
///
/// Recency is a total order over the cached pages: a lookup hit or an
/// `update` moves the page to most recently used, and an insert at capacity
/// evicts the least recently used entry first. [`Tlb::invalidate`] must run
/// before a vacated frame is rebound, so a stale translation is never
/// observable.
#[derive(Debug, Clone)]
pub struct Tlb {
    entries: HashMap<PageId, FrameId>,
    /// Cached pages, least recently used first.
    order: Vec<PageId>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for Tlb {
    fn default() -> Self {
        Self::new(DEFAULT_TLB_CAPACITY)
    }
}

impl Tlb {
    /// Creates an empty TLB caching at most `capacity` translations.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::default(),
            order: Vec::with_capacity(capacity),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Looks up the cached frame for `page`, counting a hit or a miss.
    ///
    /// A hit refreshes the page to most recently used; a miss changes
    /// nothing but the counter.
    pub fn lookup(&mut self, page: PageId) -> Option<FrameId> {
        if let Some(&frame) = self.entries.get(&page) {
            self.hits += 1;
            self.touch(page);
            Some(frame)
        } else {
            self.misses += 1;
            None
        }
    }

    /// Caches the translation `page -> frame`.
    ///
    /// If `page` is already cached its binding and recency are refreshed
    /// without eviction. Otherwise, at capacity, the least recently used
    /// entry is evicted to make room.
    pub fn update(&mut self, page: PageId, frame: FrameId) {
        if self.entries.contains_key(&page) {
            self.order.retain(|&cached| cached != page);
        } else if self.entries.len() >= self.capacity && !self.order.is_empty() {
            let lru = self.order.remove(0);
            self.entries.remove(&lru);
        }
        self.entries.insert(page, frame);
        self.order.push(page);
    }

    /// Drops the cached translation for `page`. No-op when absent.
    pub fn invalidate(&mut self, page: PageId) {
        if self.entries.remove(&page).is_some() {
            self.order.retain(|&cached| cached != page);
        }
    }

    /// Moves `page` to the most recently used position.
    fn touch(&mut self, page: PageId) {
        if let Some(pos) = self.order.iter().position(|&cached| cached == page) {
            self.order.remove(pos);
            self.order.push(page);
        }
    }

    /// Number of cached translations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of cached translations.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Hit and miss counters so far.
    #[must_use]
    pub fn stats(&self) -> TlbStats {
        TlbStats { hits: self.hits, misses: self.misses }
    }

    /// Percentage of lookups served from the cache.
    #[must_use]
    pub fn hit_ratio(&self) -> f64 {
        self.stats().hit_ratio()
    }
}
