use super::{PolicyKind, ReplacementPolicy};
use crate::PageId;

/// Belady's optimal replacement.
///
/// On a fault, every resident page's next use is located in the remaining
/// reference string; the page used farthest in the future is evicted, and a
/// page never used again counts as infinitely far. Requires the full
/// reference string up front, so it serves as the lower bound the other
/// policies are measured against.
#[derive(Debug, Clone, Copy, Default)]
pub struct Optimal;

impl ReplacementPolicy for Optimal {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Optimal
    }

    fn evict_and_admit(
        &mut self,
        frames: &mut Vec<PageId>,
        page: PageId,
        _index: usize,
        remaining: &[PageId],
    ) -> PageId {
        let mut victim_slot = 0;
        let mut farthest: Option<usize> = None;
        for (slot, &resident) in frames.iter().enumerate() {
            let next_use = remaining
                .iter()
                .position(|&upcoming| upcoming == resident)
                .unwrap_or(usize::MAX);
            // Strictly greater, so the first slot achieving the maximum wins.
            if farthest.is_none_or(|seen| next_use > seen) {
                farthest = Some(next_use);
                victim_slot = slot;
            }
        }

        let victim = frames[victim_slot];
        frames[victim_slot] = page;
        victim
    }
}
