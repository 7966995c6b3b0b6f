use serde::{Deserialize, Serialize};

use crate::{page_table::PageTable, tlb::Tlb, FrameId, PageId};

/// Default page size in bytes.
pub const DEFAULT_PAGE_SIZE: u64 = 4096;

/// The outcome of successfully translating one virtual address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// The physical address the virtual address maps to.
    pub physical_address: u64,
    /// The frame that provided the translation.
    pub frame: FrameId,
    /// Whether the lookup had to fall through to the page table.
    pub tlb_miss: bool,
}

/// Virtual page number of `va` under `page_size`.
#[must_use]
pub fn page_number(va: u64, page_size: u64) -> PageId {
    va / page_size
}

/// Byte offset of `va` within its page.
#[must_use]
pub fn page_offset(va: u64, page_size: u64) -> u64 {
    va % page_size
}

/// Translates `va` through the TLB, then the page table.
///
/// A TLB hit returns immediately with `tlb_miss = false`. On a TLB miss the
/// page table is consulted; if the page is resident the translation is
/// cached via [`Tlb::update`] and returned with `tlb_miss = true`. Returns
/// `None` when the page is not resident: the fault is the caller's to
/// service, and translation is retried only after the page is installed.
pub fn translate(va: u64, page_size: u64, table: &PageTable, tlb: &mut Tlb) -> Option<Translation> {
    let page = page_number(va, page_size);
    let offset = page_offset(va, page_size);

    if let Some(frame) = tlb.lookup(page) {
        return Some(Translation {
            physical_address: frame * page_size + offset,
            frame,
            tlb_miss: false,
        });
    }

    let frame = table.frame_of(page)?;
    tlb.update(page, frame);
    Some(Translation { physical_address: frame * page_size + offset, frame, tlb_miss: true })
}
