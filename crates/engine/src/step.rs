use serde::{Deserialize, Serialize};

use crate::PageId;

/// Clock policy state captured in a [`Step`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockState {
    /// Slot the hand points at, after any scan for this reference.
    pub hand: usize,
    /// One reference bit per occupied slot, in frame order.
    pub reference_bits: Vec<bool>,
}

/// The trace record for one page reference.
///
/// Steps are immutable once appended; the step sequence is the complete
/// observable history of a run. Two runs over identical inputs produce
/// equal step sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Position of the reference in the input string, starting at zero.
    pub index: usize,
    /// The referenced page.
    pub page: PageId,
    /// Frame contents after the reference was resolved, in the policy's
    /// bookkeeping order.
    pub frames: Vec<PageId>,
    /// Whether the reference faulted.
    pub fault: bool,
    /// Whether the translation fell through to the page table.
    pub tlb_miss: bool,
    /// The virtual address translated for this reference.
    pub virtual_address: u64,
    /// The physical address the translation produced.
    pub physical_address: u64,
    /// Hand position and reference bits, present for the Clock policy only.
    pub clock: Option<ClockState>,
}
