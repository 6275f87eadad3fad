//! Process registry: specs plus their mutable runtime state.
//!
//! The registry is created by the simulator at the start of a run and
//! dropped when the run ends. Policies only ever see it through a shared
//! reference; every mutation goes through the simulator.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{ProcessId, ProcessSpec, Time};

/// Runtime state of one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessState {
    /// CPU time still needed. Non-increasing, reaches 0 exactly once.
    pub remaining_burst: Time,
    /// Whether the process has finished.
    pub completed: bool,
    /// Clock value when `remaining_burst` hit 0. Set iff `completed`.
    pub completion_time: Option<Time>,
    /// Start tick of every dispatch, in order.
    pub start_times: Vec<Time>,
}

impl ProcessState {
    /// Fresh state for a process needing `burst_time` ticks.
    pub fn new(burst_time: Time) -> Self {
        Self {
            remaining_burst: burst_time,
            completed: false,
            completion_time: None,
            start_times: Vec::new(),
        }
    }

    /// First tick at which the process held the CPU.
    pub fn first_start(&self) -> Option<Time> {
        self.start_times.first().copied()
    }
}

/// The canonical process set of one simulation run.
///
/// Processes are addressed by their registration index (the position in
/// the input slice). An arrival-ordered index with a cursor lets the
/// simulator admit new arrivals without rescanning the whole set.
#[derive(Debug, Clone)]
pub struct ProcessRegistry {
    specs: Vec<ProcessSpec>,
    states: Vec<ProcessState>,
    by_id: HashMap<ProcessId, usize>,
    // Indices sorted by (arrival_time, id)
    arrival_order: Vec<usize>,
    arrival_cursor: usize,
    completed_count: usize,
}

impl ProcessRegistry {
    /// Builds a registry from validated specs.
    pub fn new(specs: &[ProcessSpec]) -> Self {
        let specs = specs.to_vec();
        let states = specs
            .iter()
            .map(|s| ProcessState::new(s.burst_time))
            .collect();
        let by_id = specs.iter().enumerate().map(|(i, s)| (s.id, i)).collect();

        let mut arrival_order: Vec<usize> = (0..specs.len()).collect();
        arrival_order.sort_by(|&a, &b| {
            specs[a]
                .arrival_time
                .cmp(&specs[b].arrival_time)
                .then_with(|| specs[a].id.cmp(&specs[b].id))
        });

        Self {
            specs,
            states,
            by_id,
            arrival_order,
            arrival_cursor: 0,
            completed_count: 0,
        }
    }

    /// Number of registered processes.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the registry holds no processes.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Spec at a registration index.
    pub fn spec(&self, index: usize) -> &ProcessSpec {
        &self.specs[index]
    }

    /// State at a registration index.
    pub fn state(&self, index: usize) -> &ProcessState {
        &self.states[index]
    }

    /// All specs, in registration order.
    pub fn specs(&self) -> &[ProcessSpec] {
        &self.specs
    }

    /// All states, in registration order.
    pub fn states(&self) -> &[ProcessState] {
        &self.states
    }

    /// Registration index of a process ID.
    pub fn index_of(&self, id: ProcessId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    /// Arrival time of the earliest process not yet admitted.
    pub fn next_arrival(&self) -> Option<Time> {
        self.arrival_order
            .get(self.arrival_cursor)
            .map(|&i| self.specs[i].arrival_time)
    }

    /// Removes and returns every not-yet-admitted process with
    /// `arrival_time <= now`, ordered by `(arrival_time, id)`.
    pub fn take_arrivals(&mut self, now: Time) -> Vec<usize> {
        let start = self.arrival_cursor;
        let arrived = self.arrival_order[start..]
            .iter()
            .take_while(|&&i| self.specs[i].arrival_time <= now) // contiguous, order is sorted
            .count();
        self.arrival_cursor += arrived;
        self.arrival_order[start..start + arrived].to_vec()
    }

    /// Number of completed processes.
    pub fn completed_count(&self) -> usize {
        self.completed_count
    }

    /// Whether every process has completed.
    pub fn all_completed(&self) -> bool {
        self.completed_count == self.specs.len()
    }

    /// Runs process `index` for `duration` ticks starting at `start`.
    ///
    /// Returns `true` if the process completed during this dispatch.
    pub(crate) fn apply_dispatch(&mut self, index: usize, start: Time, duration: Time) -> bool {
        debug_assert!(
            start >= self.specs[index].arrival_time,
            "Process {} dispatched before arrival",
            self.specs[index].id
        );

        let state = &mut self.states[index];
        debug_assert!(!state.completed, "Dispatched a completed process");
        debug_assert!(
            duration > 0 && duration <= state.remaining_burst,
            "Dispatch length {duration} out of range (remaining {})",
            state.remaining_burst
        );

        state.start_times.push(start);
        state.remaining_burst -= duration;

        if state.remaining_burst == 0 {
            state.completed = true;
            state.completion_time = Some(start + duration);
            self.completed_count += 1;
            true
        } else {
            false
        }
    }
}
