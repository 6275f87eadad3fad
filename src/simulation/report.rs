//! Plain-text rendering of a simulation outcome.
//!
//! Produces the per-process table, the Gantt sequence (with idle gaps made
//! explicit) and the two averages, rounded to two decimals.

use std::fmt;

use super::SimulationOutcome;

const HEADERS: [&str; 6] = [
    "Process ID",
    "Arrival",
    "Burst",
    "Completion",
    "Turnaround",
    "Waiting",
];

/// Text report over a [`SimulationOutcome`].
///
/// # Example
///
/// ```
/// use cpu_schedule::models::ProcessSpec;
/// use cpu_schedule::policies::Fcfs;
/// use cpu_schedule::simulation::simulate;
///
/// let outcome = simulate(&[ProcessSpec::new(1, 2, 3)], Fcfs::new()).unwrap();
/// let text = outcome.report().to_string();
/// assert!(text.contains("Gantt Chart: | idle 0-2 | P1 2-5 |"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    outcome: &'a SimulationOutcome,
}

impl<'a> Report<'a> {
    /// Creates a report over an outcome.
    pub fn new(outcome: &'a SimulationOutcome) -> Self {
        Self { outcome }
    }
}

impl SimulationOutcome {
    /// Text report of this outcome.
    pub fn report(&self) -> Report<'_> {
        Report::new(self)
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<[String; 6]> = self
            .outcome
            .records
            .iter()
            .map(|r| {
                [
                    r.id.to_string(),
                    r.arrival_time.to_string(),
                    r.burst_time.to_string(),
                    r.completion_time.to_string(),
                    r.turnaround_time.to_string(),
                    r.waiting_time.to_string(),
                ]
            })
            .collect();

        let mut widths = HEADERS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }

        writeln!(f, "{} Scheduling Results", self.outcome.policy)?;
        write_rule(f, &widths)?;
        write_row(f, &widths, HEADERS.iter().copied())?;
        write_rule(f, &widths)?;
        for row in &rows {
            write_row(f, &widths, row.iter().map(String::as_str))?;
        }
        write_rule(f, &widths)?;

        write!(f, "Gantt Chart:")?;
        let mut cursor = 0;
        for seg in &self.outcome.trace {
            if seg.start > cursor {
                write!(f, " | idle {}-{}", cursor, seg.start)?;
            }
            write!(f, " | P{} {}-{}", seg.process_id, seg.start, seg.end)?;
            cursor = seg.end;
        }
        writeln!(f, " |")?;

        writeln!(
            f,
            "Average Turnaround Time: {:.2}",
            self.outcome.kpi.average_turnaround_time
        )?;
        writeln!(
            f,
            "Average Waiting Time: {:.2}",
            self.outcome.kpi.average_waiting_time
        )
    }
}

fn write_rule(f: &mut fmt::Formatter<'_>, widths: &[usize]) -> fmt::Result {
    write!(f, "+")?;
    for width in widths {
        write!(f, "{}+", "-".repeat(width + 2))?;
    }
    writeln!(f)
}

fn write_row<'s>(
    f: &mut fmt::Formatter<'_>,
    widths: &[usize],
    cells: impl Iterator<Item = &'s str>,
) -> fmt::Result {
    write!(f, "|")?;
    for (width, cell) in widths.iter().zip(cells) {
        write!(f, " {:<width$} |", cell, width = *width)?;
    }
    writeln!(f)
}
