//! Shortest Remaining Time First (preemptive SJF).

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::{Dispatch, SchedulingPolicy};
use crate::models::{ProcessId, ProcessRegistry, Time};

type SrtfKey = (Time, ProcessId, usize);

/// Shortest Remaining Time First.
///
/// Runs the arrived process with the least remaining burst for a single
/// tick, then decides again, so a newly arrived shorter job preempts the
/// incumbent at the next tick boundary. Ties go to the lower process ID.
///
/// The ready set is a min-heap keyed on `(remaining_burst, id)`. Only the
/// dispatched process changes its key, and it is out of the heap while it
/// runs, so no decrease-key is needed.
///
/// # Reference
/// Schrage (1968), optimal for mean flow time with preemption.
#[derive(Debug, Clone, Default)]
pub struct Srtf {
    ready: BinaryHeap<Reverse<SrtfKey>>,
}

impl Srtf {
    /// Creates the policy.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, index: usize, registry: &ProcessRegistry) {
        let remaining = registry.state(index).remaining_burst;
        self.ready
            .push(Reverse((remaining, registry.spec(index).id, index)));
    }
}

impl SchedulingPolicy for Srtf {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time First"
    }

    fn reset(&mut self) {
        self.ready.clear();
    }

    fn admit(&mut self, index: usize, registry: &ProcessRegistry) {
        self.push(index, registry);
    }

    fn select(&mut self, _now: Time, _registry: &ProcessRegistry) -> Option<Dispatch> {
        let Reverse((_, _, index)) = self.ready.pop()?;
        Some(Dispatch { index, duration: 1 })
    }

    fn preempted(&mut self, index: usize, registry: &ProcessRegistry) {
        self.push(index, registry);
    }
}
