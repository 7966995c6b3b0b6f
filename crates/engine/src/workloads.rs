//! Reference strings used for testing.

#[allow(dead_code)]
#[allow(missing_docs)]
pub mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use crate::PageId;

    /// A canned instructional scenario: a reference string and the frame
    /// count it is meant to be run with.
    #[derive(Debug, Clone, Copy)]
    pub struct CannedWorkload {
        pub name: &'static str,
        pub references: &'static [PageId],
        pub frame_size: usize,
    }

    /// One very frequent page against a stream of recent pages. Scoring by
    /// recency and frequency keeps the frequent page resident where FIFO
    /// and LRU evict it.
    pub const FREQUENCY_SKEW: CannedWorkload = CannedWorkload {
        name: "frequency skew",
        references: &[1, 1, 1, 1, 2, 3, 1],
        frame_size: 2,
    };

    /// Linear page access, a pure capacity-miss pattern.
    pub const SEQUENTIAL_SCAN: CannedWorkload = CannedWorkload {
        name: "sequential scan",
        references: &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
        frame_size: 4,
    };

    /// A working set that is revisited, rewarding recency tracking.
    pub const TEMPORAL_LOCALITY: CannedWorkload = CannedWorkload {
        name: "temporal locality",
        references: &[1, 2, 3, 2, 1, 4, 5, 4, 1, 2, 3, 4, 5],
        frame_size: 3,
    };

    /// The classic textbook second-chance walkthrough.
    pub const CLOCK_DEMO: CannedWorkload = CannedWorkload {
        name: "clock demo",
        references: &[7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2],
        frame_size: 3,
    };

    /// FIFO faults more on this string with four frames than with three.
    pub const BELADY_ANOMALY: CannedWorkload = CannedWorkload {
        name: "belady anomaly",
        references: &[1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5],
        frame_size: 3,
    };

    /// Every canned scenario.
    pub const ALL: &[CannedWorkload] =
        &[FREQUENCY_SKEW, SEQUENTIAL_SCAN, TEMPORAL_LOCALITY, CLOCK_DEMO, BELADY_ANOMALY];

    /// The first `pages` pages, in ascending order.
    #[must_use]
    pub fn sequential(pages: u64) -> Vec<PageId> {
        (1..=pages).collect()
    }

    /// A seeded uniform-random reference string over pages `0..pages`.
    #[must_use]
    pub fn uniform_random(length: usize, pages: u64, seed: u64) -> Vec<PageId> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..length).map(|_| rng.gen_range(0..pages)).collect()
    }
}
