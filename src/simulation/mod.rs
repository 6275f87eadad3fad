//! Simulation driver, metrics and reporting.
//!
//! Runs a [`SchedulingPolicy`](crate::policies::SchedulingPolicy) over a
//! process set on an idealized integer clock and derives the outputs.
//!
//! # Outputs
//!
//! - **Records**: completion, turnaround, waiting and response time per process.
//! - **Trace**: merged Gantt segments; idle time is implied by gaps.
//! - **KPI**: `SimulationKpi` computes averages, makespan and utilization.
//!
//! # Determinism
//!
//! A run is a pure function of the process set, the policy and its
//! parameters. Every tie is broken by process ID.

mod driver;
mod kpi;
mod report;

pub use driver::{compare, simulate, SimulationOutcome, Simulator};
pub use kpi::SimulationKpi;
pub use report::Report;
