//! CPU scheduling domain models.
//!
//! Provides the data types shared by the policies and the simulator:
//! the immutable process description, its mutable runtime state, and the
//! output artifacts of a run.
//!
//! # Lifecycle
//!
//! | Type | Created | Mutated by | Dropped |
//! |------|---------|------------|---------|
//! | `ProcessSpec` | caller / workload loader | never | after the run |
//! | `ProcessState` | simulator, at run start | simulator only | at run end |
//! | `GanttTrace` | simulator | simulator only | caller-owned result |
//! | `ProcessRecord` | after the last completion | never | caller-owned result |

mod gantt;
mod process;
mod record;
mod registry;

pub use gantt::{GanttSegment, GanttTrace};
pub use process::{ProcessId, ProcessSpec, Time};
pub use record::ProcessRecord;
pub use registry::{ProcessRegistry, ProcessState};
