use super::{PolicyKind, ReplacementPolicy};
use crate::PageId;

/// First-in-first-out replacement.
///
/// The frame list is kept in arrival order, so the front is always the
/// longest-resident page. Hits change nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fifo;

impl ReplacementPolicy for Fifo {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Fifo
    }

    fn evict_and_admit(
        &mut self,
        frames: &mut Vec<PageId>,
        page: PageId,
        _index: usize,
        _remaining: &[PageId],
    ) -> PageId {
        let victim = frames.remove(0);
        frames.push(page);
        victim
    }
}
