//! Gantt trace (execution record) model.
//!
//! A trace is the ordered list of CPU occupancy intervals produced by a
//! simulation run. Idle time is never stored: it is implied by the gap
//! between one segment's end and the next segment's start.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1.3

use serde::{Deserialize, Serialize};

use super::{ProcessId, Time};

/// One interval during which a single process held the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttSegment {
    /// Running process.
    pub process_id: ProcessId,
    /// Start tick (inclusive).
    pub start: Time,
    /// End tick (exclusive).
    pub end: Time,
}

impl GanttSegment {
    /// Creates a segment.
    pub fn new(process_id: ProcessId, start: Time, end: Time) -> Self {
        Self {
            process_id,
            start,
            end,
        }
    }

    /// Segment length (end - start).
    #[inline]
    pub fn duration(&self) -> Time {
        self.end - self.start
    }
}

impl From<(ProcessId, Time, Time)> for GanttSegment {
    fn from((process_id, start, end): (ProcessId, Time, Time)) -> Self {
        Self::new(process_id, start, end)
    }
}

/// Ordered, non-overlapping sequence of [`GanttSegment`]s.
///
/// Consecutive dispatches of the same process with no gap between them
/// are merged into one segment, so per-tick policies produce the same
/// trace shape as run-to-completion ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GanttTrace {
    segments: Vec<GanttSegment>,
}

impl GanttTrace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a dispatch interval, merging with the last segment when the
    /// same process continues without interruption.
    ///
    /// Empty intervals (`start >= end`) are ignored.
    pub fn record(&mut self, process_id: ProcessId, start: Time, end: Time) {
        if start >= end {
            return;
        }

        if let Some(last) = self.segments.last_mut() {
            debug_assert!(last.end <= start, "Trace segments must not overlap");
            if last.process_id == process_id && last.end == start {
                last.end = end;
                return;
            }
        }

        self.segments.push(GanttSegment::new(process_id, start, end));
    }

    /// All segments in start order.
    pub fn segments(&self) -> &[GanttSegment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the trace has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total CPU busy time.
    pub fn busy_time(&self) -> Time {
        self.segments.iter().map(GanttSegment::duration).sum()
    }

    /// End of the last segment (0 for an empty trace).
    pub fn makespan(&self) -> Time {
        self.segments.last().map(|s| s.end).unwrap_or(0)
    }

    /// Idle intervals `(start, end)` between segments, including a
    /// leading gap when the first segment starts after t=0.
    pub fn idle_gaps(&self) -> Vec<(Time, Time)> {
        let mut gaps = Vec::new();
        let mut cursor = 0;
        for seg in &self.segments {
            if seg.start > cursor {
                gaps.push((cursor, seg.start));
            }
            cursor = seg.end;
        }
        gaps
    }

    /// Process IDs in execution order, one per segment.
    pub fn sequence(&self) -> Vec<ProcessId> {
        self.segments.iter().map(|s| s.process_id).collect()
    }

    /// Segments belonging to a single process.
    pub fn segments_for(&self, process_id: ProcessId) -> Vec<&GanttSegment> {
        self.segments
            .iter()
            .filter(|s| s.process_id == process_id)
            .collect()
    }
}

impl<'a> IntoIterator for &'a GanttTrace {
    type Item = &'a GanttSegment;
    type IntoIter = std::slice::Iter<'a, GanttSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
