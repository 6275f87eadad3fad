//! Preemptive priority scheduling.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::{Dispatch, SchedulingPolicy};
use crate::models::{ProcessId, ProcessRegistry, ProcessSpec, Time};
use crate::validation::{validate_priorities, ValidationResult};

type PriorityKey = (i32, Reverse<ProcessId>, usize);

/// Preemptive priority scheduling.
///
/// Runs the arrived process with the highest priority number for one tick,
/// then decides again. A higher-priority arrival preempts the incumbent at
/// the next tick boundary. Ties go to the lower process ID. Priorities are
/// static: there is no aging.
///
/// Every process must carry a priority; [`SchedulingPolicy::validate`]
/// reports each one that does not.
#[derive(Debug, Clone, Default)]
pub struct PriorityPolicy {
    ready: BinaryHeap<PriorityKey>,
}

impl PriorityPolicy {
    /// Creates the policy.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, index: usize, registry: &ProcessRegistry) {
        let spec = registry.spec(index);
        // Validated before the run starts
        let priority = spec.priority.unwrap_or(i32::MIN);
        self.ready.push((priority, Reverse(spec.id), index));
    }
}

impl SchedulingPolicy for PriorityPolicy {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn description(&self) -> &'static str {
        "Preemptive Priority (higher number first)"
    }

    fn validate(&self, specs: &[ProcessSpec]) -> ValidationResult {
        validate_priorities(specs)
    }

    fn reset(&mut self) {
        self.ready.clear();
    }

    fn admit(&mut self, index: usize, registry: &ProcessRegistry) {
        self.push(index, registry);
    }

    fn select(&mut self, _now: Time, _registry: &ProcessRegistry) -> Option<Dispatch> {
        let (_, _, index) = self.ready.pop()?;
        Some(Dispatch { index, duration: 1 })
    }

    fn preempted(&mut self, index: usize, registry: &ProcessRegistry) {
        self.push(index, registry);
    }
}
