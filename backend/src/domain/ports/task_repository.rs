//! Port for predefined tasks and task assignment tables.

use async_trait::async_trait;
use chrono::NaiveDate;
use roster::{Shift, StaffType};
use serde::{Deserialize, Serialize};

use super::define_port_error;

define_port_error! {
    /// Errors raised by task repository adapters.
    pub enum TaskRepositoryError {
        /// The backend could not be reached.
        Connection { message: String } =>
            service_unavailable("task repository unavailable: {message}"),
        /// The backend rejected or failed the request.
        Query { message: String } => internal("task repository error: {message}"),
    }
}

/// A `pre_defined_task` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredefinedTask {
    /// Backend identifier.
    pub id: i64,
    /// Task description.
    pub task: String,
    /// Category the task is offered to.
    pub staff_type: StaffType,
}

/// One task for one patient, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAssignmentRow {
    /// Admission number of the patient.
    pub admission_number: String,
    /// Task description.
    pub task: String,
    /// Assignee name.
    pub assignee: String,
    /// Shift the task belongs to.
    pub shift: Shift,
    /// First day of the task.
    pub start_date: NaiveDate,
}

/// Predefined task lookup and assignment inserts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Predefined tasks for one category.
    async fn predefined(&self, staff_type: StaffType) -> Result<Vec<PredefinedTask>, TaskRepositoryError>;

    /// Insert one assignment into the category's task table.
    async fn insert_assignment(
        &self,
        staff_type: StaffType,
        row: &TaskAssignmentRow,
    ) -> Result<(), TaskRepositoryError>;
}

/// Fixture implementation with no predefined tasks that discards inserts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTaskRepository;

#[async_trait]
impl TaskRepository for FixtureTaskRepository {
    async fn predefined(&self, _staff_type: StaffType) -> Result<Vec<PredefinedTask>, TaskRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert_assignment(
        &self,
        _staff_type: StaffType,
        _row: &TaskAssignmentRow,
    ) -> Result<(), TaskRepositoryError> {
        Ok(())
    }
}
