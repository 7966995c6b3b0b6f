use super::{PolicyKind, ReplacementPolicy};
use crate::{step::ClockState, FrameId, PageId};

/// Second-chance replacement with a circular hand.
///
/// One reference bit per occupied slot: set on insertion and on every hit,
/// cleared as the hand sweeps past. On a fault the hand scans from its
/// current slot, clearing set bits, until it finds a clear one; that slot
/// is the victim. The hand advances past every slot it visits, the victim
/// included, and stays put during the initial fill. Hand and bits persist
/// across references and are part of the observable trace.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    hand: usize,
    bits: Vec<bool>,
}

impl ReplacementPolicy for Clock {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Clock
    }

    fn touch(&mut self, frames: &mut Vec<PageId>, page: PageId, _index: usize) {
        if let Some(slot) = frames.iter().position(|&resident| resident == page) {
            self.bits[slot] = true;
        }
    }

    fn admit(&mut self, frames: &mut Vec<PageId>, page: PageId) -> FrameId {
        frames.push(page);
        self.bits.push(true);
        frames.len() as FrameId - 1
    }

    fn evict_and_admit(
        &mut self,
        frames: &mut Vec<PageId>,
        page: PageId,
        _index: usize,
        _remaining: &[PageId],
    ) -> PageId {
        // At most one full sweep clears every bit, so a victim is always
        // found within 2 * frames.len() visits.
        let slots = frames.len();
        loop {
            if self.bits[self.hand] {
                self.bits[self.hand] = false;
                self.hand = (self.hand + 1) % slots;
            } else {
                let victim = frames[self.hand];
                frames[self.hand] = page;
                self.bits[self.hand] = true;
                self.hand = (self.hand + 1) % slots;
                return victim;
            }
        }
    }

    fn clock_state(&self) -> Option<ClockState> {
        Some(ClockState { hand: self.hand, reference_bits: self.bits.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::Clock;
    use crate::policy::ReplacementPolicy;

    #[test]
    fn fill_sets_bits_without_moving_the_hand() {
        let mut policy = Clock::default();
        let mut frames = Vec::new();

        assert_eq!(policy.admit(&mut frames, 7), 0);
        assert_eq!(policy.admit(&mut frames, 0), 1);

        let state = policy.clock_state().unwrap();
        assert_eq!(state.hand, 0);
        assert_eq!(state.reference_bits, vec![true, true]);
    }

    #[test]
    fn full_sweep_clears_bits_then_takes_the_starting_slot() {
        let mut policy = Clock::default();
        let mut frames = Vec::new();
        for page in [7, 0, 1] {
            policy.admit(&mut frames, page);
        }

        // All bits set: the hand clears 0, 1, 2, wraps, and takes slot 0.
        let victim = policy.evict_and_admit(&mut frames, 2, 3, &[]);
        assert_eq!(victim, 7);
        assert_eq!(frames, vec![2, 0, 1]);

        let state = policy.clock_state().unwrap();
        assert_eq!(state.hand, 1);
        assert_eq!(state.reference_bits, vec![true, false, false]);
    }

    #[test]
    fn hit_gives_a_second_chance() {
        let mut policy = Clock::default();
        let mut frames = Vec::new();
        for page in [7, 0, 1] {
            policy.admit(&mut frames, page);
        }
        policy.evict_and_admit(&mut frames, 2, 3, &[]); // frames [2, 0, 1], hand 1

        // Page 0 gets its bit back, so the next scan passes it over.
        policy.touch(&mut frames, 0, 4);
        let victim = policy.evict_and_admit(&mut frames, 3, 5, &[]);

        assert_eq!(victim, 1);
        assert_eq!(frames, vec![2, 0, 3]);
        assert_eq!(policy.clock_state().unwrap().hand, 0);
    }
}
