//! CPU scheduling policies.
//!
//! Each policy owns its ready structure and answers one question for the
//! simulator: which arrived process runs next, and for how long.
//!
//! | Policy | Preemptive | Dispatch length | Ready structure |
//! |--------|-----------|-----------------|-----------------|
//! | [`Fcfs`] | no | full remaining burst | min-heap on (arrival, burst, id) |
//! | [`Srtf`] | yes | 1 tick | min-heap on (remaining, id) |
//! | [`PriorityPolicy`] | yes | 1 tick | max-heap on (priority, -id) |
//! | [`RoundRobin`] | yes | min(remaining, quantum) | FIFO queue |
//!
//! # Usage
//!
//! ```
//! use cpu_schedule::models::ProcessSpec;
//! use cpu_schedule::policies::RoundRobin;
//! use cpu_schedule::simulation::Simulator;
//!
//! let specs = vec![ProcessSpec::new(1, 0, 5), ProcessSpec::new(2, 1, 3)];
//! let outcome = Simulator::new(RoundRobin::new(2)).run(&specs).unwrap();
//! assert_eq!(outcome.record(2).unwrap().completion_time, 7);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod fcfs;
mod priority;
mod round_robin;
mod srtf;

pub use fcfs::Fcfs;
pub use priority::PriorityPolicy;
pub use round_robin::RoundRobin;
pub use srtf::Srtf;

use std::fmt::Debug;

use crate::models::{ProcessRegistry, ProcessSpec, Time};
use crate::validation::ValidationResult;

/// A dispatch decision: run process `index` for `duration` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// Registration index of the chosen process.
    pub index: usize,
    /// Ticks to run before the next decision.
    pub duration: Time,
}

/// A CPU scheduling policy.
///
/// The simulator drives a policy through a fixed protocol:
///
/// 1. [`reset`](Self::reset) once at the start of a run.
/// 2. [`admit`](Self::admit) for each process as it arrives, in
///    `(arrival_time, id)` order.
/// 3. [`select`](Self::select) whenever the CPU is free. The chosen
///    process leaves the ready structure.
/// 4. After the dispatch, newly arrived processes are admitted first, then
///    [`preempted`](Self::preempted) returns the incumbent if it still has
///    work left.
///
/// Policies only read the registry; the simulator applies every mutation.
pub trait SchedulingPolicy: Send + Sync + Debug {
    /// Short policy name (e.g., "FCFS", "RR").
    fn name(&self) -> &'static str;

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }

    /// Checks policy-specific requirements on the input and parameters.
    fn validate(&self, _specs: &[ProcessSpec]) -> ValidationResult {
        Ok(())
    }

    /// Clears all per-run state.
    fn reset(&mut self);

    /// Makes an arrived process eligible for selection.
    fn admit(&mut self, index: usize, registry: &ProcessRegistry);

    /// Chooses the next process to run, or `None` if nothing is ready.
    fn select(&mut self, now: Time, registry: &ProcessRegistry) -> Option<Dispatch>;

    /// Returns an interrupted, still incomplete process to the ready structure.
    fn preempted(&mut self, index: usize, registry: &ProcessRegistry);
}
