//! First-Come-First-Served.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::{Dispatch, SchedulingPolicy};
use crate::models::{ProcessId, ProcessRegistry, Time};

type FcfsKey = (Time, Time, ProcessId, usize);

/// First-Come-First-Served (non-preemptive).
///
/// Among arrived processes, runs the one with the earliest arrival for its
/// whole burst. Equal arrivals go to the shorter burst, then to the lower ID.
/// A dispatched process is never interrupted.
///
/// Because the ready set only ever holds processes with
/// `arrival_time <= now`, this reproduces a single global sort by
/// `(arrival_time, burst_time, id)` with idle jumps between arrivals.
#[derive(Debug, Clone, Default)]
pub struct Fcfs {
    ready: BinaryHeap<Reverse<FcfsKey>>,
}

impl Fcfs {
    /// Creates the policy.
    pub fn new() -> Self {
        Self::default()
    }

    fn key(index: usize, registry: &ProcessRegistry) -> FcfsKey {
        let spec = registry.spec(index);
        (spec.arrival_time, spec.burst_time, spec.id, index)
    }
}

impl SchedulingPolicy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn description(&self) -> &'static str {
        "First-Come-First-Served"
    }

    fn reset(&mut self) {
        self.ready.clear();
    }

    fn admit(&mut self, index: usize, registry: &ProcessRegistry) {
        self.ready.push(Reverse(Self::key(index, registry)));
    }

    fn select(&mut self, _now: Time, registry: &ProcessRegistry) -> Option<Dispatch> {
        let Reverse((_, _, _, index)) = self.ready.pop()?;
        Some(Dispatch {
            index,
            duration: registry.state(index).remaining_burst,
        })
    }

    fn preempted(&mut self, index: usize, registry: &ProcessRegistry) {
        // Unreachable with full-burst dispatches; keep the process runnable.
        self.admit(index, registry);
    }
}
