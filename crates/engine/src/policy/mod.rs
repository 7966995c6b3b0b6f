//! Replacement policy definitions & implementations for the [`crate::PolicyRun`].

mod clock;
mod fifo;
mod frequency;
mod lru;
mod optimal;

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

pub use clock::Clock;
pub use fifo::Fifo;
pub use frequency::RecencyFrequency;
pub use lru::Lru;
pub use optimal::Optimal;

use crate::{step::ClockState, FrameId, PageId};

/// Identifies one of the five replacement policies.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    Enum,
)]
pub enum PolicyKind {
    /// Evict the longest-resident page, in arrival order.
    #[default]
    Fifo,
    /// Evict the page whose most recent access is oldest.
    Lru,
    /// Evict the page whose next use is farthest in the future (Belady).
    Optimal,
    /// Evict the page with the highest age-per-access score, a recency and
    /// frequency hybrid.
    RecencyFrequency,
    /// Second chance: a circular scan that spares pages with their
    /// reference bit set.
    Clock,
}

impl PolicyKind {
    /// The display name of the policy.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Fifo => "FIFO",
            Self::Lru => "LRU",
            Self::Optimal => "Optimal",
            Self::RecencyFrequency => "Recency-Frequency",
            Self::Clock => "Clock",
        }
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = Self::iter().find(|kind| kind.as_str().eq_ignore_ascii_case(s));
        match kind {
            Some(kind) => Ok(kind),
            None => Err(format!("Invalid policy: {s}")),
        }
    }
}

impl Display for PolicyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// A page replacement policy.
///
/// Implementations own only their ordering bookkeeping. The shared per-run
/// state, which consists of the frame list, the page table, and the TLB,
/// belongs to the run driving the policy; the frame list is passed in so
/// each policy can keep it in its own bookkeeping order.
pub trait ReplacementPolicy: Send + Sync {
    /// Which policy this is.
    fn kind(&self) -> PolicyKind;

    /// Called once per reference, before the hit or fault is decided.
    fn observe(&mut self, _page: PageId, _index: usize) {}

    /// A reference hit a resident page. Updates recency bookkeeping only.
    fn touch(&mut self, _frames: &mut Vec<PageId>, _page: PageId, _index: usize) {}

    /// Installs `page` while at least one frame is still free, returning
    /// the frame it was placed in.
    fn admit(&mut self, frames: &mut Vec<PageId>, page: PageId) -> FrameId {
        frames.push(page);
        frames.len() as FrameId - 1
    }

    /// Chooses a victim, replaces it with `page`, and returns the victim.
    ///
    /// Called only when the frame list is full. `remaining` holds the
    /// references after the current one, for policies that look ahead.
    fn evict_and_admit(
        &mut self,
        frames: &mut Vec<PageId>,
        page: PageId,
        index: usize,
        remaining: &[PageId],
    ) -> PageId;

    /// Hand position and reference bits to embed in the step, if the
    /// policy carries them.
    fn clock_state(&self) -> Option<ClockState> {
        None
    }
}

/// Creates a fresh state machine for `kind`.
///
/// Every run gets its own instance; no bookkeeping carries over between
/// runs.
#[must_use]
pub fn new_policy(kind: PolicyKind) -> Box<dyn ReplacementPolicy> {
    match kind {
        PolicyKind::Fifo => Box::new(Fifo::default()),
        PolicyKind::Lru => Box::new(Lru::default()),
        PolicyKind::Optimal => Box::new(Optimal::default()),
        PolicyKind::RecencyFrequency => Box::new(RecencyFrequency::default()),
        PolicyKind::Clock => Box::new(Clock::default()),
    }
}
