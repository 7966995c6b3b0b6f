use thiserror::Error;

/// Errors surfaced by a simulation run.
///
/// Input validation happens before any step executes, so a run either
/// produces a complete trace or no trace at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// The number of physical frames must be at least one.
    #[error("invalid frame size: {0} (must be >= 1)")]
    InvalidFrameSize(usize),
    /// The reference string must contain at least one page reference.
    #[error("empty reference string")]
    EmptyReferenceString,
    /// A supplied virtual-address sequence must pair one address with each
    /// page reference.
    #[error("virtual address sequence length {actual} does not match reference string length {expected}")]
    AddressLengthMismatch {
        /// Length of the reference string.
        expected: usize,
        /// Length of the supplied address sequence.
        actual: usize,
    },
    /// Engine bookkeeping disagreed with itself mid-run. The run aborts
    /// instead of returning a partial trace.
    #[error("internal invariant violation: {0}")]
    InvariantViolation(String),
}
