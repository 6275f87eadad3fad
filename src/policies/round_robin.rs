//! Round-robin with a fixed time quantum.

use std::collections::VecDeque;

use super::{Dispatch, SchedulingPolicy};
use crate::models::{ProcessRegistry, ProcessSpec, Time};
use crate::validation::{validate_quantum, ValidationResult};

/// Round-robin scheduling.
///
/// Keeps an explicit FIFO ready queue. The head runs for
/// `min(remaining_burst, quantum)` ticks. Processes that arrive during that
/// slice are queued before the incumbent goes back to the tail, so a fresh
/// arrival is never overtaken by the process it arrived behind.
///
/// A quantum of zero or less is rejected by [`SchedulingPolicy::validate`].
#[derive(Debug, Clone)]
pub struct RoundRobin {
    quantum: Time,
    ready: VecDeque<usize>,
}

impl RoundRobin {
    /// Creates the policy with the given time quantum.
    pub fn new(quantum: Time) -> Self {
        Self {
            quantum,
            ready: VecDeque::new(),
        }
    }

    /// Time quantum (ticks).
    pub fn quantum(&self) -> Time {
        self.quantum
    }

    /// Registration indices currently queued, head first.
    pub fn queued(&self) -> impl Iterator<Item = usize> + '_ {
        self.ready.iter().copied()
    }
}

impl SchedulingPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn description(&self) -> &'static str {
        "Round-Robin"
    }

    fn validate(&self, _specs: &[ProcessSpec]) -> ValidationResult {
        validate_quantum(self.quantum).map_err(|e| vec![e])
    }

    fn reset(&mut self) {
        self.ready.clear();
    }

    fn admit(&mut self, index: usize, _registry: &ProcessRegistry) {
        debug_assert!(!self.ready.contains(&index), "Process {index} queued twice");
        self.ready.push_back(index);
    }

    fn select(&mut self, _now: Time, registry: &ProcessRegistry) -> Option<Dispatch> {
        let index = self.ready.pop_front()?;
        let remaining = registry.state(index).remaining_burst;
        Some(Dispatch {
            index,
            duration: remaining.min(self.quantum),
        })
    }

    fn preempted(&mut self, index: usize, _registry: &ProcessRegistry) {
        self.ready.push_back(index);
    }
}
