use std::fmt::{Display, Formatter, Result as FmtResult};

use enum_map::EnumMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{policy::PolicyKind, record::SimulationResult};

/// Results of running every policy over one shared workload.
///
/// Every run saw the same reference string and the same virtual address
/// sequence, so fault counts and TLB hit ratios are directly comparable
/// across policies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Per-policy results.
    pub results: EnumMap<PolicyKind, SimulationResult>,
}

impl Comparison {
    /// The result for `kind`.
    #[must_use]
    pub fn result(&self, kind: PolicyKind) -> &SimulationResult {
        &self.results[kind]
    }

    /// Policies with their fault counts, fewest faults first.
    ///
    /// The sort is stable, so ties keep the declaration order of
    /// [`PolicyKind`].
    #[must_use]
    pub fn fewest_faults(&self) -> Vec<(PolicyKind, u64)> {
        PolicyKind::iter()
            .map(|kind| (kind, self.results[kind].fault_count))
            .sorted_by_key(|&(_, faults)| faults)
            .collect()
    }
}

impl Display for Comparison {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let references = self.results[PolicyKind::Fifo].len();
        let frame_size = self.results[PolicyKind::Fifo].frame_size;
        writeln!(f, "results ({references} references, {frame_size} frames):")?;
        for (kind, faults) in self.fewest_faults() {
            let ratio = self.results[kind].tlb.hit_ratio();
            writeln!(f, "  {kind}: {faults} page faults, tlb hit ratio {ratio:.1}%")?;
        }
        Ok(())
    }
}
