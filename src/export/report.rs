use std::path::PathBuf;

use serde::Serialize;

use crate::foundation::error::{ErrorKind, KnobError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    Cancelled,
}

/// What happened to one output size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SizeOutcome {
    Success { paths: Vec<PathBuf> },
    Failed { kind: ErrorKind, message: String },
    Cancelled,
}

impl SizeOutcome {
    pub fn failed(err: &KnobError) -> Self {
        Self::Failed {
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SizeReport {
    pub size: u32,
    #[serde(flatten)]
    pub outcome: SizeOutcome,
}

/// Result of an export run. Sizes are listed in configured order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub status: RunStatus,
    pub sizes: Vec<SizeReport>,
}

impl ExportReport {
    /// Assemble a report; the run counts as cancelled when any size was.
    pub fn from_sizes(sizes: Vec<SizeReport>) -> Self {
        let status = if sizes
            .iter()
            .any(|s| matches!(s.outcome, SizeOutcome::Cancelled))
        {
            RunStatus::Cancelled
        } else {
            RunStatus::Completed
        };
        Self { status, sizes }
    }

    /// `true` when the run completed and every size succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.status == RunStatus::Completed && self.sizes.iter().all(|s| s.outcome.is_success())
    }

    pub fn written_paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.sizes.iter().flat_map(|s| match &s.outcome {
            SizeOutcome::Success { paths } => paths.as_slice(),
            _ => &[][..],
        })
    }

    pub fn size(&self, size: u32) -> Option<&SizeReport> {
        self.sizes.iter().find(|s| s.size == size)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/report.rs"]
mod tests;
