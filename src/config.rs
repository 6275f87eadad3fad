//! Policy configuration and workload documents.
//!
//! A workload document bundles a policy choice with a process set so a
//! run can be described in a single JSON file:
//!
//! ```json
//! {
//!   "policy": { "kind": "round_robin", "time_quantum": 2 },
//!   "processes": [
//!     { "id": 1, "arrival_time": 0, "burst_time": 5 },
//!     { "id": 2, "arrival_time": 1, "burst_time": 3 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::{ProcessSpec, Time};
use crate::policies::{Fcfs, PriorityPolicy, RoundRobin, SchedulingPolicy, Srtf};
use crate::simulation::{SimulationOutcome, Simulator};
use crate::validation::SimulationError;

/// Which policy to run, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyConfig {
    /// First-Come-First-Served.
    Fcfs,
    /// Shortest Remaining Time First.
    Srtf,
    /// Preemptive priority.
    Priority,
    /// Round-robin with the given quantum.
    RoundRobin {
        /// Time quantum (ticks).
        time_quantum: Time,
    },
}

impl PolicyConfig {
    /// Instantiates the configured policy.
    pub fn build(&self) -> Box<dyn SchedulingPolicy> {
        match *self {
            Self::Fcfs => Box::new(Fcfs::new()),
            Self::Srtf => Box::new(Srtf::new()),
            Self::Priority => Box::new(PriorityPolicy::new()),
            Self::RoundRobin { time_quantum } => Box::new(RoundRobin::new(time_quantum)),
        }
    }

    /// All four policies, round-robin with the given quantum.
    pub fn all(time_quantum: Time) -> [PolicyConfig; 4] {
        [
            Self::Fcfs,
            Self::Srtf,
            Self::Priority,
            Self::RoundRobin { time_quantum },
        ]
    }
}

/// Parses `fcfs`, `srtf` (alias `sjf`), `priority`, or `rr:<quantum>`
/// (alias `round_robin:<quantum>`). Case-insensitive.
impl FromStr for PolicyConfig {
    type Err = WorkloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let (name, arg) = match lower.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (lower.as_str(), None),
        };

        match (name, arg) {
            ("fcfs", None) => Ok(Self::Fcfs),
            ("srtf" | "sjf", None) => Ok(Self::Srtf),
            ("priority", None) => Ok(Self::Priority),
            ("rr" | "round_robin", Some(q)) => q
                .trim()
                .parse()
                .map(|time_quantum| Self::RoundRobin { time_quantum })
                .map_err(|_| WorkloadError::UnknownPolicy(s.to_string())),
            _ => Err(WorkloadError::UnknownPolicy(s.to_string())),
        }
    }
}

/// A policy plus the processes to run it on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workload {
    /// Policy to simulate.
    pub policy: PolicyConfig,
    /// Process set.
    pub processes: Vec<ProcessSpec>,
}

impl Workload {
    /// Creates a workload.
    pub fn new(policy: PolicyConfig, processes: Vec<ProcessSpec>) -> Self {
        Self { policy, processes }
    }

    /// Parses a workload from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, WorkloadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the workload as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, WorkloadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Runs the configured policy over the process set.
    pub fn run(&self) -> Result<SimulationOutcome, WorkloadError> {
        let outcome = Simulator::from_boxed(self.policy.build()).run(&self.processes)?;
        Ok(outcome)
    }
}

/// Error loading or running a workload.
#[derive(Debug)]
pub enum WorkloadError {
    /// The document is not valid workload JSON.
    Parse(serde_json::Error),
    /// A policy name could not be parsed.
    UnknownPolicy(String),
    /// The workload failed validation.
    Simulation(SimulationError),
}

impl fmt::Display for WorkloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "malformed workload: {e}"),
            Self::UnknownPolicy(name) => write!(f, "unknown policy: {name:?}"),
            Self::Simulation(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for WorkloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::UnknownPolicy(_) => None,
            Self::Simulation(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for WorkloadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<SimulationError> for WorkloadError {
    fn from(e: SimulationError) -> Self {
        Self::Simulation(e)
    }
}
