//! Process (input) model.
//!
//! A process is a unit of CPU work described by when it becomes
//! runnable and how much CPU time it needs.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use serde::{Deserialize, Serialize};

/// Simulation time in integer ticks, relative to the epoch (t=0).
pub type Time = i64;

/// Process identifier.
pub type ProcessId = u32;

/// An immutable process description.
///
/// # Time Representation
/// All times are integer ticks on an idealized clock. There is no
/// relation to wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Unique process identifier.
    pub id: ProcessId,
    /// Tick at which the process becomes runnable.
    pub arrival_time: Time,
    /// Total CPU time required (ticks).
    pub burst_time: Time,
    /// Scheduling priority (higher = more important).
    /// Only the priority policy requires it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

impl ProcessSpec {
    /// Creates a process without a priority.
    pub fn new(id: ProcessId, arrival_time: Time, burst_time: Time) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            priority: None,
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }
}

impl From<(ProcessId, Time, Time)> for ProcessSpec {
    fn from((id, arrival_time, burst_time): (ProcessId, Time, Time)) -> Self {
        Self::new(id, arrival_time, burst_time)
    }
}

impl From<(ProcessId, Time, Time, i32)> for ProcessSpec {
    fn from((id, arrival_time, burst_time, priority): (ProcessId, Time, Time, i32)) -> Self {
        Self::new(id, arrival_time, burst_time).with_priority(priority)
    }
}
