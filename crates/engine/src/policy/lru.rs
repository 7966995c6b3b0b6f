use super::{PolicyKind, ReplacementPolicy};
use crate::PageId;

/// Least-recently-used replacement.
///
/// The frame list doubles as the recency order: a hit moves the page to
/// the back, so the front is always the page whose most recent access is
/// oldest.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lru;

impl ReplacementPolicy for Lru {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lru
    }

    fn touch(&mut self, frames: &mut Vec<PageId>, page: PageId, _index: usize) {
        if let Some(pos) = frames.iter().position(|&resident| resident == page) {
            frames.remove(pos);
            frames.push(page);
        }
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
