//! Predefined tasks and task assignment inserts.

use async_trait::async_trait;
use roster::StaffType;

use super::client::{Filter, PostgrestClient, Select};
use super::dto::{PredefinedTaskRowDto, TaskAssignmentInsertDto};
use super::patient_repository::task_table;
use crate::domain::ports::{PredefinedTask, TaskAssignmentRow, TaskRepository, TaskRepositoryError};

const PREDEFINED: &str = "pre_defined_task";

/// Task lookups against `pre_defined_task` and inserts into the per-category
/// assignment tables.
#[derive(Debug, Clone)]
pub struct PostgrestTaskRepository {
    client: PostgrestClient,
}

impl PostgrestTaskRepository {
    /// Wrap a shared client.
    #[must_use]
    pub const fn new(client: PostgrestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TaskRepository for PostgrestTaskRepository {
    async fn predefined(&self, staff_type: StaffType) -> Result<Vec<PredefinedTask>, TaskRepositoryError> {
        let select = Select::all()
            .filter(Filter::eq("staff_type", staff_type.as_str()))
            .order_asc("id");
        let rows: Vec<PredefinedTaskRowDto> = self.client.select(PREDEFINED, &select).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| row.into_domain(staff_type))
            .collect())
    }

    async fn insert_assignment(
        &self,
        staff_type: StaffType,
        row: &TaskAssignmentRow,
    ) -> Result<(), TaskRepositoryError> {
        let table = task_table(staff_type).ok_or_else(|| {
            TaskRepositoryError::query(format!("no task table for {staff_type} staff"))
        })?;
        self.client
            .insert(table, &TaskAssignmentInsertDto::from(row))
            .await?;
        Ok(())
    }
}
