//! Per-process result record.

use serde::{Deserialize, Serialize};

use super::{ProcessId, ProcessSpec, ProcessState, Time};

/// Completion record of one process after a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Process identifier.
    pub id: ProcessId,
    /// Arrival tick.
    pub arrival_time: Time,
    /// Original burst (ticks).
    pub burst_time: Time,
    /// Priority, if one was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Tick at which the process finished.
    pub completion_time: Time,
    /// completion - arrival.
    pub turnaround_time: Time,
    /// turnaround - burst.
    pub waiting_time: Time,
    /// first dispatch - arrival.
    pub response_time: Time,
}

impl ProcessRecord {
    /// Derives the record from a spec and its terminal state.
    ///
    /// Returns `None` if the process has not completed.
    pub fn from_state(spec: &ProcessSpec, state: &ProcessState) -> Option<Self> {
        let completion_time = state.completion_time?;
        let first_start = state.first_start()?;
        let turnaround_time = completion_time - spec.arrival_time;

        Some(Self {
            id: spec.id,
            arrival_time: spec.arrival_time,
            burst_time: spec.burst_time,
            priority: spec.priority,
            completion_time,
            turnaround_time,
            waiting_time: turnaround_time - spec.burst_time,
            response_time: first_start - spec.arrival_time,
        })
    }
}
