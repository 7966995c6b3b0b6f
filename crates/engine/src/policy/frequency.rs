use hashbrown::HashMap;

use super::{PolicyKind, ReplacementPolicy};
use crate::PageId;

/// Recency and frequency hybrid replacement.
///
/// Every reference bumps the page's frequency and stamps its last access,
/// the current reference included. On a fault each resident page is scored
/// `(index - last_access) / frequency`, age per unit of use, and the
/// highest score is evicted; ties keep the earliest-scanned slot. A page
/// referenced often survives long gaps, a page referenced once ages out
/// quickly.
#[derive(Debug, Clone, Default)]
pub struct RecencyFrequency {
    frequency: HashMap<PageId, u64>,
    last_access: HashMap<PageId, usize>,
}

impl ReplacementPolicy for RecencyFrequency {
    fn kind(&self) -> PolicyKind {
        PolicyKind::RecencyFrequency
    }

    fn observe(&mut self, page: PageId, index: usize) {
        *self.frequency.entry(page).or_insert(0) += 1;
        self.last_access.insert(page, index);
    }

    fn evict_and_admit(
        &mut self,
        frames: &mut Vec<PageId>,
        page: PageId,
        index: usize,
        _remaining: &[PageId],
    ) -> PageId {
        let mut victim_slot = 0;
        let mut highest: Option<f64> = None;
        for (slot, &resident) in frames.iter().enumerate() {
            let last = self.last_access.get(&resident).copied().unwrap_or(0);
            let frequency = self.frequency.get(&resident).copied().unwrap_or(0);
            // Resident pages have been observed, so frequency is nonzero and
            // their last access precedes the faulting reference.
            debug_assert!(frequency > 0, "resident page {resident} was never observed");
            let score = (index - last) as f64 / frequency as f64;
            if highest.is_none_or(|seen| score > seen) {
                highest = Some(score);
                victim_slot = slot;
            }
        }

        let victim = frames[victim_slot];
        frames[victim_slot] = page;
        victim
    }
}
