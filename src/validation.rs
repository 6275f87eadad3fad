//! Input validation for simulation runs.
//!
//! Checks the process set and the policy parameters before the simulator
//! starts stepping. Detects:
//! - Empty input
//! - Duplicate process IDs
//! - Negative arrival times and non-positive bursts
//! - Workloads whose finishing time would not fit in [`Time`]
//! - Missing priorities (priority policy only)
//! - Non-positive round-robin quanta
//!
//! The simulator never re-validates mid-run; everything here runs up front
//! and every problem found is reported at once.

use std::collections::HashSet;
use std::fmt;

use crate::models::{ProcessSpec, Time};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation and run errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// No processes were given.
    EmptyInput,
    /// Two processes share the same ID.
    DuplicateId,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process needs zero or negative CPU time.
    NonPositiveBurst,
    /// Round-robin quantum is zero or negative.
    InvalidQuantum,
    /// The priority policy was given a process without a priority.
    MissingPriority,
    /// The latest arrival plus all bursts exceeds the clock range.
    TimeOverflow,
    /// The policy stopped dispatching while processes were still incomplete.
    PolicyStalled,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Error returned when a simulation cannot start or cannot finish.
///
/// Carries every validation problem that was found, or a single
/// [`ValidationErrorKind::PolicyStalled`] entry when a run stopped early.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationError {
    /// All detected problems, in detection order.
    pub errors: Vec<ValidationError>,
}

impl SimulationError {
    /// Whether any of the errors is of the given kind.
    pub fn has(&self, kind: ValidationErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind == kind)
    }

    /// Kinds of all errors, in detection order.
    pub fn kinds(&self) -> Vec<ValidationErrorKind> {
        self.errors.iter().map(|e| e.kind).collect()
    }
}

impl From<Vec<ValidationError>> for SimulationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has(ValidationErrorKind::PolicyStalled) {
            write!(f, "simulation stalled")?;
        } else {
            write!(f, "invalid simulation input")?;
        }
        for (i, err) in self.errors.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{}", err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for SimulationError {}

/// Validates the process set for any policy.
///
/// Checks:
/// 1. At least one process
/// 2. No duplicate IDs
/// 3. `arrival_time >= 0`
/// 4. `burst_time > 0`
/// 5. latest arrival + total burst fits in [`Time`], which bounds the clock
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(specs: &[ProcessSpec]) -> ValidationResult {
    if specs.is_empty() {
        return Err(vec![ValidationError::new(
            ValidationErrorKind::EmptyInput,
            "No processes given",
        )]);
    }

    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for spec in specs {
        if !ids.insert(spec.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", spec.id),
            ));
        }

        if spec.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!(
                    "Process {} has negative arrival time {}",
                    spec.id, spec.arrival_time
                ),
            ));
        }

        if spec.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!(
                    "Process {} has non-positive burst time {}",
                    spec.id, spec.burst_time
                ),
            ));
        }
    }

    let latest_arrival = specs.iter().map(|s| s.arrival_time).max().unwrap_or(0);
    let horizon = specs
        .iter()
        .try_fold(latest_arrival, |acc, s| acc.checked_add(s.burst_time.max(0)));
    if horizon.is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            format!("Latest arrival {latest_arrival} plus total burst overflows the clock"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates that every process carries a priority.
pub fn validate_priorities(specs: &[ProcessSpec]) -> ValidationResult {
    let errors: Vec<ValidationError> = specs
        .iter()
        .filter(|s| s.priority.is_none())
        .map(|s| {
            ValidationError::new(
                ValidationErrorKind::MissingPriority,
                format!("Process {} has no priority", s.id),
            )
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a round-robin time quantum.
pub fn validate_quantum(quantum: Time) -> Result<(), ValidationError> {
    if quantum <= 0 {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidQuantum,
            format!("Time quantum must be positive, got {quantum}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input() {
        let specs = vec![ProcessSpec::new(1, 0, 5), ProcessSpec::new(2, 1, 3)];
        assert!(validate_processes(&specs).is_ok());
    }

    #[test]
    fn test_empty_input() {
        let errors = validate_processes(&[]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyInput);
    }

    #[test]
    fn test_duplicate_id() {
        let specs = vec![ProcessSpec::new(1, 0, 5), ProcessSpec::new(1, 2, 3)];
        let errors = validate_processes(&specs).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains('1')));
    }

    #[test]
    fn test_bad_times() {
        let specs = vec![ProcessSpec::new(1, -1, 5), ProcessSpec::new(2, 0, 0)];
        let errors = validate_processes(&specs).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeArrival));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonPositiveBurst));
    }

    #[test]
    fn test_time_overflow() {
        let specs = vec![ProcessSpec::new(1, Time::MAX - 1, 5)];
        let errors = validate_processes(&specs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::TimeOverflow);

        // Bursts summed across processes, not per process
        let specs = vec![
            ProcessSpec::new(1, 0, Time::MAX / 2),
            ProcessSpec::new(2, 0, Time::MAX / 2),
            ProcessSpec::new(3, 10, 5),
        ];
        assert!(validate_processes(&specs).is_err());

        let specs = vec![ProcessSpec::new(1, Time::MAX - 5, 5)];
        assert!(validate_processes(&specs).is_ok());
    }

    #[test]
    fn test_missing_priority() {
        let specs = vec![
            ProcessSpec::new(1, 0, 5).with_priority(3),
            ProcessSpec::new(2, 0, 5),
            ProcessSpec::new(3, 0, 5),
        ];
        let errors = validate_priorities(&specs).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::MissingPriority));
    }

    #[test]
    fn test_quantum() {
        assert!(validate_quantum(1).is_ok());
        assert_eq!(
            validate_quantum(0).unwrap_err().kind,
            ValidationErrorKind::InvalidQuantum
        );
        assert!(validate_quantum(-3).is_err());
    }

    #[test]
    fn test_simulation_error_display() {
        let err = SimulationError::from(vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate process ID: 4"),
            ValidationError::new(ValidationErrorKind::MissingPriority, "Process 2 has no priority"),
        ]);
        assert!(err.has(ValidationErrorKind::DuplicateId));
        assert!(!err.has(ValidationErrorKind::EmptyInput));
        assert_eq!(
            err.to_string(),
            "invalid simulation input: Duplicate process ID: 4; Process 2 has no priority"
        );

        let stalled = SimulationError::from(vec![ValidationError::new(
            ValidationErrorKind::PolicyStalled,
            "2 of 2 processes incomplete",
        )]);
        assert_eq!(stalled.to_string(), "simulation stalled: 2 of 2 processes incomplete");
    }
}
