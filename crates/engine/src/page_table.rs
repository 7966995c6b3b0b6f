use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Identifier of a virtual page, as drawn from a reference string.
pub type PageId = u64;

/// Index of a physical frame, in `[0, frame_size)`.
pub type FrameId = u64;

/// A single-level page table mapping resident pages to physical frames.
///
/// Only resident pages have entries. Eviction removes the victim's entry
/// before the replacement page is installed, so the key set always equals
/// the set of pages currently held in frames.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTable {
    entries: HashMap<PageId, FrameId>,
}

impl PageTable {
    /// Creates an empty page table.
    #[must_use]
    pub fn new() -> Self {
        Self { entries: HashMap::default() }
    }

    /// Returns the frame holding `page`, if the page is resident.
    #[must_use]
    pub fn frame_of(&self, page: PageId) -> Option<FrameId> {
        self.entries.get(&page).copied()
    }

    /// Returns whether `page` is resident.
    #[must_use]
    pub fn contains(&self, page: PageId) -> bool {
        self.entries.contains_key(&page)
    }

    /// Maps `page` to `frame`, replacing any previous mapping for `page`.
    pub fn insert(&mut self, page: PageId, frame: FrameId) {
        self.entries.insert(page, frame);
    }

    /// Removes the mapping for `page`, returning the frame it occupied.
    pub fn remove(&mut self, page: PageId) -> Option<FrameId> {
        self.entries.remove(&page)
    }

    /// Number of resident pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no pages are resident.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(page, frame)` mappings in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (PageId, FrameId)> + '_ {
        self.entries.iter().map(|(&page, &frame)| (page, frame))
    }
}
