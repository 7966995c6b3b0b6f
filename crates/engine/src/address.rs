use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::PageId;

/// Supplies byte offsets when virtual addresses are synthesized from a
/// reference string.
///
/// Offsets are the only external input to address synthesis; keeping them
/// behind this seam keeps the engine itself free of ambient randomness.
pub trait OffsetSource {
    /// Returns an offset in `[0, page_size)`.
    fn next_offset(&mut self, page_size: u64) -> u64;
}

/// Offset source drawing from a seeded RNG.
///
/// Two sources built from the same seed yield the same offset sequence, so
/// synthesized addresses are reproducible run to run.
#[derive(Debug, Clone)]
pub struct SeededOffsets {
    rng: StdRng,
}

impl SeededOffsets {
    /// Creates a source for `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl OffsetSource for SeededOffsets {
    fn next_offset(&mut self, page_size: u64) -> u64 {
        self.rng.gen_range(0..page_size)
    }
}

/// Offset source that always returns zero, placing every synthesized
/// address on its page boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageAlignedOffsets;

impl OffsetSource for PageAlignedOffsets {
    fn next_offset(&mut self, _page_size: u64) -> u64 {
        0
    }
}

/// Synthesizes one virtual address per reference.
///
/// Each address lands on its reference's page, at an offset drawn from
/// `offsets`.
pub fn synthesize_addresses(
    references: &[PageId],
    page_size: u64,
    offsets: &mut dyn OffsetSource,
) -> Vec<u64> {
    references.iter().map(|&page| page * page_size + offsets.next_offset(page_size)).collect()
}
