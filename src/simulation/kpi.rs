//! Simulation quality metrics (KPIs).
//!
//! Computes the standard CPU scheduling indicators from the completion
//! records and the Gantt trace of a finished run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Turnaround | Mean of completion - arrival |
//! | Avg Waiting | Mean of turnaround - burst |
//! | Avg Response | Mean of first dispatch - arrival |
//! | Makespan | End of the last trace segment |
//! | CPU Utilization | busy time / makespan |
//! | Throughput | processes / makespan |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::models::{GanttTrace, ProcessRecord, Time};

/// Aggregate performance indicators of one run.
///
/// All means are arithmetic means over every process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationKpi {
    /// Mean turnaround time (ticks).
    pub average_turnaround_time: f64,
    /// Mean waiting time (ticks).
    pub average_waiting_time: f64,
    /// Mean response time (ticks).
    pub average_response_time: f64,
    /// Largest waiting time of any single process.
    pub max_waiting_time: Time,
    /// Latest completion time.
    pub makespan: Time,
    /// Ticks during which the CPU ran a process.
    pub busy_time: Time,
    /// Ticks in `[0, makespan)` during which the CPU was idle.
    pub idle_time: Time,
    /// Fraction of `[0, makespan)` spent busy (0.0..1.0).
    pub cpu_utilization: f64,
    /// Completed processes per tick.
    pub throughput: f64,
}

impl SimulationKpi {
    /// Computes KPIs from completion records and the trace.
    ///
    /// # Arguments
    /// * `records` - Completion records of all processes.
    /// * `trace` - The merged Gantt trace of the same run.
    pub fn calculate(records: &[ProcessRecord], trace: &GanttTrace) -> Self {
        let makespan = trace.makespan();
        let busy_time = trace.busy_time();

        let mut total_turnaround: f64 = 0.0;
        let mut total_waiting: f64 = 0.0;
        let mut total_response: f64 = 0.0;
        let mut max_waiting: Time = 0;

        for rec in records {
            total_turnaround += rec.turnaround_time as f64;
            total_waiting += rec.waiting_time as f64;
            total_response += rec.response_time as f64;
            max_waiting = max_waiting.max(rec.waiting_time);
        }

        let mean = |total: f64| {
            if records.is_empty() {
                0.0
            } else {
                total / records.len() as f64
            }
        };

        let (cpu_utilization, throughput) = if makespan <= 0 {
            (0.0, 0.0)
        } else {
            (
                busy_time as f64 / makespan as f64,
                records.len() as f64 / makespan as f64,
            )
        };

        Self {
            average_turnaround_time: mean(total_turnaround),
            average_waiting_time: mean(total_waiting),
            average_response_time: mean(total_response),
            max_waiting_time: max_waiting,
            makespan,
            busy_time,
            idle_time: makespan - busy_time,
            cpu_utilization,
            throughput,
        }
    }
}
