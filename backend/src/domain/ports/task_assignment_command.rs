//! Driving port for the task assignment workflow.

use async_trait::async_trait;
use roster::StaffType;
use serde::Serialize;

use super::PredefinedTask;
use crate::domain::Error;

/// Bulk assignment form as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskAssignmentRequest {
    /// Nurse or RMO.
    pub staff_type: StaffType,
    /// Staff member receiving the tasks.
    pub assignee: String,
    /// Patients the tasks apply to.
    pub admission_numbers: Vec<String>,
    /// Task descriptions.
    pub tasks: Vec<String>,
    /// Shift name, e.g. `Shift B`.
    pub shift: String,
    /// First day, `YYYY-MM-DD`.
    pub start_date: String,
}

/// Outcome of a bulk assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAssignmentReceipt {
    /// Rows written, one per patient and task.
    pub inserted: usize,
}

/// Task assignment use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskAssignmentCommand: Send + Sync {
    /// Predefined tasks offered to a category.
    async fn predefined(&self, staff_type: StaffType) -> Result<Vec<PredefinedTask>, Error>;

    /// Validate and write a bulk assignment.
    async fn assign(&self, request: TaskAssignmentRequest) -> Result<TaskAssignmentReceipt, Error>;
}
