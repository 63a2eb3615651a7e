//! Task assignment service.
//!
//! Requests are validated completely before anything is written; the insert
//! loop then writes one row per patient and task and stops at the first
//! failure.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use roster::{Shift, StaffType};
use serde_json::json;
use tracing::{info, warn};

use crate::domain::Error;
use crate::domain::ports::{
    PredefinedTask, TaskAssignmentCommand, TaskAssignmentReceipt, TaskAssignmentRequest,
    TaskAssignmentRow, TaskRepository,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn invalid(field: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field }))
}

fn assignable(staff_type: StaffType) -> Result<StaffType, Error> {
    match staff_type {
        StaffType::Nurse | StaffType::Rmo => Ok(staff_type),
        StaffType::Ot => Err(invalid(
            "staffType",
            "tasks can only be assigned to nurses or RMOs",
        )),
    }
}

fn non_blank(values: Vec<String>, field: &str, label: &str) -> Result<Vec<String>, Error> {
    let trimmed: Vec<String> = values
        .into_iter()
        .map(|value| value.trim().to_owned())
        .collect();
    if trimmed.is_empty() {
        return Err(invalid(field, format!("select at least one {label}")));
    }
    if trimmed.iter().any(String::is_empty) {
        return Err(invalid(field, format!("{label} entries must not be blank")));
    }
    Ok(trimmed)
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ValidAssignment {
    staff_type: StaffType,
    assignee: String,
    admission_numbers: Vec<String>,
    tasks: Vec<String>,
    shift: Shift,
    start_date: NaiveDate,
}

impl ValidAssignment {
    fn try_from_request(request: TaskAssignmentRequest) -> Result<Self, Error> {
        let staff_type = assignable(request.staff_type)?;
        let assignee = request.assignee.trim().to_owned();
        if assignee.is_empty() {
            return Err(invalid("assignee", "assignee is required"));
        }
        let admission_numbers = non_blank(request.admission_numbers, "admissionNumbers", "patient")?;
        let tasks = non_blank(request.tasks, "tasks", "task")?;
        let shift = request
            .shift
            .trim()
            .parse::<Shift>()
            .map_err(|_| invalid("shift", format!("unknown shift: {}", request.shift)))?;
        let start_date = NaiveDate::parse_from_str(request.start_date.trim(), DATE_FORMAT)
            .map_err(|_| invalid("startDate", "start date must be YYYY-MM-DD"))?;
        Ok(Self {
            staff_type,
            assignee,
            admission_numbers,
            tasks,
            shift,
            start_date,
        })
    }

    fn rows(&self) -> impl Iterator<Item = TaskAssignmentRow> + '_ {
        self.admission_numbers.iter().flat_map(move |admission| {
            self.tasks.iter().map(move |task| TaskAssignmentRow {
                admission_number: admission.clone(),
                task: task.clone(),
                assignee: self.assignee.clone(),
                shift: self.shift,
                start_date: self.start_date,
            })
        })
    }
}

/// Predefined task lookup and bulk assignment.
#[derive(Clone)]
pub struct TaskAssignmentService {
    repo: Arc<dyn TaskRepository>,
}

impl TaskAssignmentService {
    /// Create a service over the given repository.
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl TaskAssignmentCommand for TaskAssignmentService {
    async fn predefined(&self, staff_type: StaffType) -> Result<Vec<PredefinedTask>, Error> {
        let staff_type = assignable(staff_type)?;
        self.repo
            .predefined(staff_type)
            .await
            .map_err(Error::from)
    }

    async fn assign(&self, request: TaskAssignmentRequest) -> Result<TaskAssignmentReceipt, Error> {
        let valid = ValidAssignment::try_from_request(request)?;
        let mut inserted = 0_usize;
        for row in valid.rows() {
            if let Err(failure) = self.repo.insert_assignment(valid.staff_type, &row).await {
                warn!(error = %failure, inserted, "task assignment stopped");
                return Err(Error::from(failure).with_details(json!({ "inserted": inserted })));
            }
            inserted += 1;
        }
        info!(
            staff_type = %valid.staff_type,
            assignee = %valid.assignee,
            inserted,
            "tasks assigned"
        );
        Ok(TaskAssignmentReceipt { inserted })
    }
}
