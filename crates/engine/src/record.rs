use serde::{Deserialize, Serialize};

use crate::{policy::PolicyKind, step::Step, tlb::TlbStats};

/// The complete outcome of one policy's run over a workload.
///
/// Owned by the caller; a run never shares state with another run. The
/// step sequence is the full trace, and the counters summarize it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// The policy that produced this trace.
    pub policy: PolicyKind,
    /// Number of physical frames the run was given.
    pub frame_size: usize,
    /// Per-reference trace, in input order.
    pub steps: Vec<Step>,
    /// Number of steps that faulted.
    pub fault_count: u64,
    /// TLB counters at the end of the run.
    pub tlb: TlbStats,
}

impl SimulationResult {
    /// Number of references served without a fault.
    #[must_use]
    pub fn hit_count(&self) -> u64 {
        self.steps.len() as u64 - self.fault_count
    }

    /// Percentage of references that faulted, `0.0` for an empty trace.
    #[must_use]
    pub fn fault_rate(&self) -> f64 {
        if self.steps.is_empty() {
            0.0
        } else {
            self.fault_count as f64 / self.steps.len() as f64 * 100.0
        }
    }

    /// Number of references processed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns whether the trace is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
