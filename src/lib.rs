//! Discrete-time CPU scheduling simulator.
//!
//! Simulates classic uniprocessor scheduling policies over a fixed process
//! set and reports completion records, a merged Gantt trace, and aggregate
//! metrics (average turnaround and waiting time).
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ProcessSpec`, `ProcessState`,
//!   `ProcessRegistry`, `GanttSegment`, `GanttTrace`, `ProcessRecord`
//! - **`policies`**: `Fcfs`, `Srtf`, `PriorityPolicy`, `RoundRobin` behind
//!   the `SchedulingPolicy` trait
//! - **`simulation`**: `Simulator` driver, `SimulationKpi`, text `Report`
//! - **`validation`**: Input checks (empty input, duplicate IDs, priorities, quantum)
//! - **`config`**: `PolicyConfig` and JSON `Workload` documents
//! - **`workload`**: Seeded random process-set generation
//!
//! # Example
//!
//! ```
//! use cpu_schedule::models::ProcessSpec;
//! use cpu_schedule::policies::Srtf;
//! use cpu_schedule::simulation::simulate;
//!
//! let specs = vec![
//!     ProcessSpec::new(1, 0, 7),
//!     ProcessSpec::new(2, 2, 4),
//!     ProcessSpec::new(3, 4, 1),
//!     ProcessSpec::new(4, 5, 4),
//! ];
//! let outcome = simulate(&specs, Srtf::new()).unwrap();
//! assert_eq!(outcome.completion_time(3), Some(5));
//! ```
//!
//! # Logging
//!
//! The simulator emits through the `log` facade: `info` per run, `debug`
//! per dispatch, `trace` per arrival and idle gap. No logger is installed
//! by the library.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod config;
pub mod models;
pub mod policies;
pub mod simulation;
pub mod validation;
pub mod workload;
