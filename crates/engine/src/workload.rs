use serde::{Deserialize, Serialize};

use crate::{errors::SimulationError, PageId};

/// A page reference string plus, optionally, the virtual addresses that
/// produced it.
///
/// When no addresses are supplied the engine synthesizes one per reference
/// from the run context's page size and offset seed. Supplied addresses must
/// place each address on its reference's page; the replacement policies are
/// driven by the reference string, translation by the addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    references: Vec<PageId>,
    addresses: Option<Vec<u64>>,
}

impl Workload {
    /// Creates a workload from a reference string.
    pub fn new(references: Vec<PageId>) -> Result<Self, SimulationError> {
        if references.is_empty() {
            return Err(SimulationError::EmptyReferenceString);
        }
        Ok(Self { references, addresses: None })
    }

    /// Creates a workload from a reference string and the matching virtual
    /// addresses, one per reference.
    pub fn with_addresses(
        references: Vec<PageId>,
        addresses: Vec<u64>,
    ) -> Result<Self, SimulationError> {
        if references.is_empty() {
            return Err(SimulationError::EmptyReferenceString);
        }
        if addresses.len() != references.len() {
            return Err(SimulationError::AddressLengthMismatch {
                expected: references.len(),
                actual: addresses.len(),
            });
        }
        Ok(Self { references, addresses: Some(addresses) })
    }

    /// The page reference string.
    #[must_use]
    pub fn references(&self) -> &[PageId] {
        &self.references
    }

    /// The supplied virtual addresses, if any.
    #[must_use]
    pub fn addresses(&self) -> Option<&[u64]> {
        self.addresses.as_deref()
    }

    /// Number of references.
    #[must_use]
    pub fn len(&self) -> usize {
        self.references.len()
    }

    /// Always false: construction rejects empty reference strings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}
