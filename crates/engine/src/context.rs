use crate::{tlb::DEFAULT_TLB_CAPACITY, translate::DEFAULT_PAGE_SIZE};

/// Context shared by every run a [`crate::Simulator`] performs.
///
/// The context fixes the translation parameters; the workload and frame
/// count vary per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimContext {
    /// Number of translations the TLB caches.
    pub tlb_capacity: usize,
    /// Page size in bytes.
    pub page_size: u64,
    /// Seed for synthesized address offsets. Runs over the same workload
    /// and seed see identical virtual addresses.
    pub offset_seed: u64,
}

impl Default for SimContext {
    fn default() -> Self {
        Self {
            tlb_capacity: DEFAULT_TLB_CAPACITY,
            page_size: DEFAULT_PAGE_SIZE,
            offset_seed: 0,
        }
    }
}

impl SimContext {
    /// Create a new context builder. See [`SimContextBuilder`] for more details.
    #[must_use]
    pub fn builder() -> SimContextBuilder {
        SimContextBuilder::new()
    }
}

/// A builder for [`SimContext`].
#[derive(Debug, Clone)]
pub struct SimContextBuilder {
    tlb_capacity: usize,
    page_size: u64,
    offset_seed: u64,
}

impl Default for SimContextBuilder {
    fn default() -> Self {
        let SimContext { tlb_capacity, page_size, offset_seed } = SimContext::default();
        Self { tlb_capacity, page_size, offset_seed }
    }
}

impl SimContextBuilder {
    /// Create a new [`SimContextBuilder`].
    ///
    /// Prefer using [`SimContext::builder`].
    #[must_use]
    pub fn new() -> Self {
        SimContextBuilder::default()
    }

    /// Set the number of translations the TLB caches.
    pub fn tlb_capacity(&mut self, tlb_capacity: usize) -> &mut Self {
        self.tlb_capacity = tlb_capacity;
        self
    }

    /// Set the page size in bytes.
    ///
    /// # Panics
    /// Panics if `page_size` is zero.
    pub fn page_size(&mut self, page_size: u64) -> &mut Self {
        assert!(page_size > 0, "page size must be at least one byte");
        self.page_size = page_size;
        self
    }

    /// Set the seed used for synthesized address offsets.
    pub fn offset_seed(&mut self, offset_seed: u64) -> &mut Self {
        self.offset_seed = offset_seed;
        self
    }

    /// Build and return the [`SimContext`].
    ///
    /// The builder keeps its settings and may be reused.
    pub fn build(&mut self) -> SimContext {
        SimContext {
            tlb_capacity: self.tlb_capacity,
            page_size: self.page_size,
            offset_seed: self.offset_seed,
        }
    }
}
