use enum_map::EnumMap;
use strum::IntoEnumIterator;

use crate::{
    address::{synthesize_addresses, SeededOffsets},
    context::SimContext,
    errors::SimulationError,
    page_table::PageTable,
    policy::{new_policy, PolicyKind, ReplacementPolicy},
    record::SimulationResult,
    report::Comparison,
    step::Step,
    tlb::Tlb,
    translate::translate,
    workload::Workload,
    PageId,
};

/// One policy's run over a reference string: a deterministic fold producing
/// one [`Step`] per reference.
///
/// The run owns its frame list, page table, and TLB; nothing is shared with
/// any other run. References and addresses are borrowed from the caller and
/// must be equally long.
pub struct PolicyRun<'a> {
    policy: Box<dyn ReplacementPolicy>,
    references: &'a [PageId],
    addresses: &'a [u64],
    frame_size: usize,
    page_size: u64,
    frames: Vec<PageId>,
    table: PageTable,
    tlb: Tlb,
    cursor: usize,
    fault_count: u64,
}

impl<'a> PolicyRun<'a> {
    /// Creates a run for `kind`, validating the inputs before any state is
    /// touched.
    pub fn new(
        kind: PolicyKind,
        references: &'a [PageId],
        addresses: &'a [u64],
        frame_size: usize,
        context: &SimContext,
    ) -> Result<Self, SimulationError> {
        if frame_size < 1 {
            return Err(SimulationError::InvalidFrameSize(frame_size));
        }
        if references.is_empty() {
            return Err(SimulationError::EmptyReferenceString);
        }
        if addresses.len() != references.len() {
            return Err(SimulationError::AddressLengthMismatch {
                expected: references.len(),
                actual: addresses.len(),
            });
        }

        Ok(Self {
            policy: new_policy(kind),
            references,
            addresses,
            frame_size,
            page_size: context.page_size,
            frames: Vec::with_capacity(frame_size),
            table: PageTable::new(),
            tlb: Tlb::new(context.tlb_capacity),
            cursor: 0,
            fault_count: 0,
        })
    }

    /// Which policy this run is driving.
    #[must_use]
    pub fn kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    /// The current frame contents, in the policy's bookkeeping order.
    #[must_use]
    pub fn frames(&self) -> &[PageId] {
        &self.frames
    }

    /// The current page table.
    #[must_use]
    pub fn page_table(&self) -> &PageTable {
        &self.table
    }

    /// Faults observed so far.
    #[must_use]
    pub fn fault_count(&self) -> u64 {
        self.fault_count
    }

    /// Returns whether every reference has been consumed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.references.len()
    }

    /// Advances by one reference and returns its step, or `None` once the
    /// reference string is exhausted.
    pub fn step(&mut self) -> Result<Option<Step>, SimulationError> {
        if self.is_finished() {
            return Ok(None);
        }
        let index = self.cursor;
        let page = self.references[index];
        let virtual_address = self.addresses[index];

        self.policy.observe(page, index);

        let fault = !self.table.contains(page);
        if fault {
            self.service_fault(page, index)?;
            self.fault_count += 1;
        } else {
            self.policy.touch(&mut self.frames, page, index);
        }

        let translation =
            translate(virtual_address, self.page_size, &self.table, &mut self.tlb).ok_or_else(
                || {
                    SimulationError::InvariantViolation(format!(
                        "page {page} not translatable at reference {index} after fault service"
                    ))
                },
            )?;

        let step = Step {
            index,
            page,
            frames: self.frames.clone(),
            fault,
            tlb_miss: translation.tlb_miss,
            virtual_address,
            physical_address: translation.physical_address,
            clock: self.policy.clock_state(),
        };
        self.cursor += 1;
        Ok(Some(step))
    }

    /// Installs `page`, evicting a victim first when the frames are full.
    ///
    /// On eviction the victim's page table entry is removed and its TLB
    /// entry invalidated before the new page inherits the frame.
    fn service_fault(&mut self, page: PageId, index: usize) -> Result<(), SimulationError> {
        if self.frames.len() < self.frame_size {
            let frame = self.policy.admit(&mut self.frames, page);
            self.table.insert(page, frame);
        } else {
            let remaining = &self.references[index + 1..];
            let victim = self.policy.evict_and_admit(&mut self.frames, page, index, remaining);
            let frame = self.table.remove(victim).ok_or_else(|| {
                SimulationError::InvariantViolation(format!(
                    "victim page {victim} had no page table entry at reference {index}"
                ))
            })?;
            self.tlb.invalidate(victim);
            self.table.insert(page, frame);
            tracing::trace!(page, victim, frame, index, "page evicted");
        }
        Ok(())
    }

    /// Folds [`Self::step`] over the whole reference string.
    pub fn run(mut self) -> Result<SimulationResult, SimulationError> {
        let mut steps = Vec::with_capacity(self.references.len());
        while let Some(step) = self.step()? {
            steps.push(step);
        }
        Ok(SimulationResult {
            policy: self.kind(),
            frame_size: self.frame_size,
            steps,
            fault_count: self.fault_count,
            tlb: self.tlb.stats(),
        })
    }
}

/// Runs replacement policies over workloads under one [`SimContext`].
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    context: SimContext,
}

impl Simulator {
    /// Creates a simulator with `context`.
    #[must_use]
    pub fn new(context: SimContext) -> Self {
        Self { context }
    }

    /// The context every run uses.
    #[must_use]
    pub fn context(&self) -> &SimContext {
        &self.context
    }

    /// Runs one policy over `workload` with `frame_size` physical frames.
    pub fn run(
        &self,
        kind: PolicyKind,
        workload: &Workload,
        frame_size: usize,
    ) -> Result<SimulationResult, SimulationError> {
        let addresses = self.resolve_addresses(workload);
        self.run_resolved(kind, workload.references(), &addresses, frame_size)
    }

    /// Runs all five policies over `workload`, every run seeing the same
    /// reference string and the same virtual addresses.
    pub fn compare(
        &self,
        workload: &Workload,
        frame_size: usize,
    ) -> Result<Comparison, SimulationError> {
        let addresses = self.resolve_addresses(workload);
        let mut results = EnumMap::default();
        for kind in PolicyKind::iter() {
            results[kind] =
                self.run_resolved(kind, workload.references(), &addresses, frame_size)?;
        }
        Ok(Comparison { results })
    }

    fn run_resolved(
        &self,
        kind: PolicyKind,
        references: &[PageId],
        addresses: &[u64],
        frame_size: usize,
    ) -> Result<SimulationResult, SimulationError> {
        tracing::debug_span!("run", policy = %kind, frame_size).in_scope(|| {
            let run = PolicyRun::new(kind, references, addresses, frame_size, &self.context)?;
            let result = run.run()?;
            tracing::debug!(
                faults = result.fault_count,
                tlb_hits = result.tlb.hits,
                tlb_misses = result.tlb.misses,
                "run complete"
            );
            Ok(result)
        })
    }

    /// Addresses for one run: supplied by the workload, or synthesized
    /// deterministically from the context seed.
    fn resolve_addresses(&self, workload: &Workload) -> Vec<u64> {
        match workload.addresses() {
            Some(addresses) => addresses.to_vec(),
            None => {
                let mut offsets = SeededOffsets::new(self.context.offset_seed);
                synthesize_addresses(workload.references(), self.context.page_size, &mut offsets)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use hashbrown::HashSet;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::{PolicyRun, Simulator};
    use crate::{
        address::{synthesize_addresses, PageAlignedOffsets},
        errors::SimulationError,
        policy::PolicyKind,
        utils::setup_logger,
        workloads::tests::{
            sequential, uniform_random, CannedWorkload, BELADY_ANOMALY, CLOCK_DEMO,
            FREQUENCY_SKEW, SEQUENTIAL_SCAN, TEMPORAL_LOCALITY,
        },
        PageId, SimContext, Workload,
    };

    fn workload(references: &[PageId]) -> Workload {
        Workload::new(references.to_vec()).unwrap()
    }

    #[rstest]
    #[case(PolicyKind::Fifo, 4, vec![3, 1])]
    #[case(PolicyKind::Lru, 4, vec![3, 1])]
    #[case(PolicyKind::Optimal, 3, vec![1, 3])]
    #[case(PolicyKind::RecencyFrequency, 3, vec![1, 3])]
    #[case(PolicyKind::Clock, 4, vec![3, 1])]
    fn frequency_skew_fault_counts(
        #[case] kind: PolicyKind,
        #[case] faults: u64,
        #[case] final_frames: Vec<PageId>,
    ) {
        let simulator = Simulator::default();
        let result = simulator
            .run(kind, &workload(FREQUENCY_SKEW.references), FREQUENCY_SKEW.frame_size)
            .unwrap();

        assert_eq!(result.fault_count, faults);
        assert_eq!(result.steps.last().unwrap().frames, final_frames);
    }

    #[test]
    fn only_scoring_policies_keep_the_hot_page() {
        // The final reference revisits page 1, which FIFO and LRU evicted
        // but Optimal and recency-frequency scoring kept resident.
        let simulator = Simulator::default();
        let comparison = simulator
            .compare(&workload(FREQUENCY_SKEW.references), FREQUENCY_SKEW.frame_size)
            .unwrap();

        for kind in [PolicyKind::Optimal, PolicyKind::RecencyFrequency] {
            assert!(!comparison.result(kind).steps.last().unwrap().fault);
        }
        for kind in [PolicyKind::Fifo, PolicyKind::Lru, PolicyKind::Clock] {
            assert!(comparison.result(kind).steps.last().unwrap().fault);
        }
    }

    #[test]
    fn fifo_shows_the_belady_anomaly() {
        let simulator = Simulator::default();
        let workload = workload(BELADY_ANOMALY.references);

        let three = simulator.run(PolicyKind::Fifo, &workload, 3).unwrap();
        let four = simulator.run(PolicyKind::Fifo, &workload, 4).unwrap();

        assert_eq!(three.fault_count, 9);
        assert_eq!(four.fault_count, 10);
    }

    #[rstest]
    #[case(FREQUENCY_SKEW)]
    #[case(SEQUENTIAL_SCAN)]
    #[case(TEMPORAL_LOCALITY)]
    #[case(CLOCK_DEMO)]
    #[case(BELADY_ANOMALY)]
    fn optimal_is_a_lower_bound(#[case] canned: CannedWorkload) {
        let simulator = Simulator::default();
        let comparison =
            simulator.compare(&workload(canned.references), canned.frame_size).unwrap();

        let optimal = comparison.result(PolicyKind::Optimal).fault_count;
        for kind in PolicyKind::iter() {
            assert!(
                comparison.result(kind).fault_count >= optimal,
                "{kind} beat Optimal on {}",
                canned.name
            );
        }
        assert_eq!(comparison.fewest_faults().len(), PolicyKind::iter().count());
    }

    #[rstest]
    #[case(11)]
    #[case(29)]
    #[case(73)]
    fn optimal_lower_bound_holds_on_random_workloads(#[case] seed: u64) {
        let simulator = Simulator::default();
        let workload = Workload::new(uniform_random(80, 8, seed)).unwrap();

        let comparison = simulator.compare(&workload, 3).unwrap();
        let optimal = comparison.result(PolicyKind::Optimal).fault_count;
        for kind in PolicyKind::iter() {
            assert!(comparison.result(kind).fault_count >= optimal);
        }
    }

    #[test]
    fn distinct_pages_fault_under_every_policy() {
        let simulator = Simulator::default();
        let workload = Workload::new(sequential(30)).unwrap();

        let comparison = simulator.compare(&workload, 4).unwrap();
        for kind in PolicyKind::iter() {
            let result = comparison.result(kind);
            assert_eq!(result.fault_count, 30);
            assert_eq!(result.tlb.hits, 0);
        }
    }

    #[test]
    fn traces_are_deterministic() {
        setup_logger();
        let context = SimContext::builder().offset_seed(7).build();
        let first = Simulator::new(context.clone())
            .compare(&workload(TEMPORAL_LOCALITY.references), TEMPORAL_LOCALITY.frame_size)
            .unwrap();
        let second = Simulator::new(context)
            .compare(&workload(TEMPORAL_LOCALITY.references), TEMPORAL_LOCALITY.frame_size)
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn offset_seed_changes_addresses_but_not_faults() {
        let seeded = |seed: u64| {
            Simulator::new(SimContext::builder().offset_seed(seed).build())
                .run(PolicyKind::Lru, &workload(CLOCK_DEMO.references), CLOCK_DEMO.frame_size)
                .unwrap()
        };

        let first = seeded(1);
        let second = seeded(2);

        assert_eq!(first.fault_count, second.fault_count);
        assert_eq!(first.tlb, second.tlb);
    }

    #[rstest]
    #[case(PolicyKind::Fifo)]
    #[case(PolicyKind::Lru)]
    #[case(PolicyKind::Optimal)]
    #[case(PolicyKind::RecencyFrequency)]
    #[case(PolicyKind::Clock)]
    fn counters_match_the_trace(#[case] kind: PolicyKind) {
        let simulator = Simulator::default();
        let result = simulator
            .run(kind, &workload(TEMPORAL_LOCALITY.references), TEMPORAL_LOCALITY.frame_size)
            .unwrap();

        let faults_in_trace = result.steps.iter().filter(|step| step.fault).count() as u64;
        assert_eq!(result.fault_count, faults_in_trace);
        assert_eq!(result.hit_count(), result.len() as u64 - faults_in_trace);

        // One TLB lookup per reference.
        assert_eq!(result.tlb.hits + result.tlb.misses, result.len() as u64);
        let ratio = result.tlb.hit_ratio();
        assert!((0.0..=100.0).contains(&ratio));

        // A fault always translates through the page table.
        assert!(result.steps.iter().filter(|step| step.fault).all(|step| step.tlb_miss));
    }

    #[rstest]
    #[case(PolicyKind::Fifo)]
    #[case(PolicyKind::Lru)]
    #[case(PolicyKind::Optimal)]
    #[case(PolicyKind::RecencyFrequency)]
    #[case(PolicyKind::Clock)]
    fn frames_match_the_page_table_every_step(#[case] kind: PolicyKind) {
        let context = SimContext::default();
        let addresses = synthesize_addresses(
            CLOCK_DEMO.references,
            context.page_size,
            &mut PageAlignedOffsets,
        );
        let mut run =
            PolicyRun::new(kind, CLOCK_DEMO.references, &addresses, CLOCK_DEMO.frame_size, &context)
                .unwrap();

        while let Some(step) = run.step().unwrap() {
            assert!(step.frames.len() <= CLOCK_DEMO.frame_size);

            let resident: HashSet<PageId> = step.frames.iter().copied().collect();
            assert_eq!(resident.len(), step.frames.len(), "duplicate page in frames");

            let mapped: HashSet<PageId> = run.page_table().iter().map(|(page, _)| page).collect();
            assert_eq!(resident, mapped);

            let frames_used: HashSet<u64> =
                run.page_table().iter().map(|(_, frame)| frame).collect();
            assert_eq!(frames_used.len(), run.page_table().len(), "frame bound twice");
            assert!(frames_used.iter().all(|&frame| frame < CLOCK_DEMO.frame_size as u64));
        }
        assert!(run.is_finished());
    }

    #[test]
    fn evicted_page_misses_the_tlb_after_rebind() {
        let context = SimContext::default();
        let references: &[PageId] = &[1, 2, 3, 1];
        let addresses =
            synthesize_addresses(references, context.page_size, &mut PageAlignedOffsets);
        let workload = Workload::with_addresses(references.to_vec(), addresses).unwrap();

        let result = Simulator::new(context.clone())
            .run(PolicyKind::Lru, &workload, 2)
            .unwrap();

        // Page 1 is evicted at the third reference and faults back in at
        // the fourth, inheriting frame 1 from page 2. Its old TLB entry
        // must not resurface.
        assert_eq!(result.fault_count, 4);
        let last = result.steps.last().unwrap();
        assert!(last.fault);
        assert!(last.tlb_miss);
        assert_eq!(last.physical_address, context.page_size);
    }

    #[test]
    fn clock_trace_carries_hand_and_bits() {
        let simulator = Simulator::default();
        let result = simulator
            .run(PolicyKind::Clock, &workload(CLOCK_DEMO.references), CLOCK_DEMO.frame_size)
            .unwrap();

        for step in &result.steps {
            let clock = step.clock.as_ref().unwrap();
            assert_eq!(clock.reference_bits.len(), step.frames.len());
            assert!(clock.hand < CLOCK_DEMO.frame_size);
        }

        let fifo = simulator
            .run(PolicyKind::Fifo, &workload(CLOCK_DEMO.references), CLOCK_DEMO.frame_size)
            .unwrap();
        assert!(fifo.steps.iter().all(|step| step.clock.is_none()));
    }

    #[test]
    fn rejects_invalid_frame_size() {
        let simulator = Simulator::default();
        let result = simulator.run(PolicyKind::Fifo, &workload(&[1, 2]), 0);
        assert_eq!(result.unwrap_err(), SimulationError::InvalidFrameSize(0));

        let comparison = simulator.compare(&workload(&[1, 2]), 0);
        assert_eq!(comparison.unwrap_err(), SimulationError::InvalidFrameSize(0));
    }

    #[test]
    fn rejects_mismatched_address_lengths() {
        let context = SimContext::default();
        let references: &[PageId] = &[1, 2, 3];
        let addresses = [context.page_size];

        let run = PolicyRun::new(PolicyKind::Fifo, references, &addresses, 2, &context);
        assert_eq!(
            run.err(),
            Some(SimulationError::AddressLengthMismatch { expected: 3, actual: 1 })
        );
    }

    #[test]
    fn misdirected_addresses_abort_the_run() {
        // The second address points at page 9 while the reference string
        // says page 2, so translation faults on a page the table never had.
        let context = SimContext::default();
        let workload =
            Workload::with_addresses(vec![1, 2], vec![context.page_size, 9 * context.page_size])
                .unwrap();

        let result = Simulator::new(context).run(PolicyKind::Fifo, &workload, 2);
        assert!(matches!(result, Err(SimulationError::InvariantViolation(_))));
    }

    #[test]
    fn step_after_exhaustion_returns_none() {
        let context = SimContext::default();
        let references: &[PageId] = &[4, 4];
        let addresses =
            synthesize_addresses(references, context.page_size, &mut PageAlignedOffsets);
        let mut run =
            PolicyRun::new(PolicyKind::Fifo, references, &addresses, 1, &context).unwrap();

        assert!(run.step().unwrap().is_some());
        assert!(run.step().unwrap().is_some());
        assert!(run.step().unwrap().is_none());
        assert!(run.step().unwrap().is_none());
        assert_eq!(run.fault_count(), 1);
        assert_eq!(run.frames(), &[4]);
    }
}
