//! One-line status messages for command feedback.

use std::fmt;

use crate::orchestrator::{SubmitOutcome, SubmitReport};

/// How a finished operation should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Warning,
    Failure,
}

/// A status line shown after an operation.
pub struct OperationStatus {
    pub message: String,
    pub kind: StatusKind,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Success,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Warning,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Failure,
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == StatusKind::Success
    }
}

impl From<&SubmitReport> for OperationStatus {
    fn from(report: &SubmitReport) -> Self {
        let trip_id = report.trip.id;
        let total = report.attachments.len();
        let attached = report.attached().count();

        match report.outcome() {
            SubmitOutcome::Complete => Self::success(format!(
                "Trip {trip_id} saved with all {total} selected item(s)"
            )),
            SubmitOutcome::Partial => Self::warning(format!(
                "Trip {trip_id} saved with {attached} of {total} item(s); the rest could not be attached"
            )),
            SubmitOutcome::Cancelled => Self::warning(format!(
                "Submission cancelled; trip {trip_id} kept with {attached} of {total} item(s)"
            )),
            SubmitOutcome::Compensated => Self::failure(format!(
                "Only {attached} of {total} item(s) could be attached; trip {trip_id} was deleted"
            )),
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            StatusKind::Success => "Success:",
            StatusKind::Warning => "Warning:",
            StatusKind::Failure => "Error:",
        };
        writeln!(f, "{label} {}", self.message)
    }
}
