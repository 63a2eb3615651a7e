//! Port for the patient tables feeding the overview dashboard.
//!
//! Each table is read in full; correlation by admission number happens in
//! the domain.

use async_trait::async_trait;
use roster::StaffType;
use serde::{Deserialize, Serialize};

use super::define_port_error;

define_port_error! {
    /// Errors raised by patient repository adapters.
    pub enum PatientRepositoryError {
        /// The backend could not be reached.
        Connection { message: String } =>
            service_unavailable("patient repository unavailable: {message}"),
        /// The backend rejected or failed the request.
        Query { message: String } => internal("patient repository error: {message}"),
    }
}

/// A `patient_admission` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admission {
    /// Admission number, the correlation key across tables.
    pub admission_number: String,
    /// Patient name.
    pub patient_name: String,
    /// Ward name as entered at admission.
    pub ward: Option<String>,
    /// Bed number.
    pub bed_number: Option<String>,
    /// Consultant in charge.
    pub consultant: Option<String>,
    /// Admission date as stored.
    pub admission_date: Option<String>,
}

/// An `ipd_admissions` row: the in-patient bed a patient holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpdAdmission {
    /// Admission number of the patient.
    pub admission_number: String,
    /// In-patient department number.
    pub ipd_number: Option<String>,
    /// Ward currently allocated.
    pub ward: Option<String>,
    /// Bed currently allocated.
    pub bed_number: Option<String>,
}

/// A `discharge` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discharge {
    /// Admission number of the discharged patient.
    pub admission_number: String,
    /// Discharge date as stored.
    pub discharge_date: Option<String>,
}

/// An `ot_information` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtSchedule {
    /// Admission number of the patient.
    pub admission_number: String,
    /// Procedure name.
    pub procedure: Option<String>,
    /// Scheduled date as stored.
    pub ot_date: Option<String>,
}

/// A row of `nurse_assign_task` or `rmo_assign_task`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedTask {
    /// Admission number of the patient.
    pub admission_number: String,
    /// Task description.
    pub task: String,
    /// Assignee name.
    pub assignee: Option<String>,
    /// Workflow status, e.g. "pending" or "completed".
    pub status: Option<String>,
}

impl AssignedTask {
    /// Whether the task still needs doing.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self
            .status
            .as_deref()
            .is_some_and(|status| status.trim().eq_ignore_ascii_case("completed"))
    }
}

/// Read access to admissions, IPD beds, discharges, OT schedules and tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// All admissions.
    async fn admissions(&self) -> Result<Vec<Admission>, PatientRepositoryError>;

    /// All in-patient bed allocations.
    async fn ipd_admissions(&self) -> Result<Vec<IpdAdmission>, PatientRepositoryError>;

    /// All discharges.
    async fn discharges(&self) -> Result<Vec<Discharge>, PatientRepositoryError>;

    /// All OT schedule entries.
    async fn ot_schedules(&self) -> Result<Vec<OtSchedule>, PatientRepositoryError>;

    /// Tasks assigned to one staff category.
    async fn assigned_tasks(
        &self,
        staff_type: StaffType,
    ) -> Result<Vec<AssignedTask>, PatientRepositoryError>;
}

/// Fixture implementation with no patients.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePatientRepository;

#[async_trait]
impl PatientRepository for FixturePatientRepository {
    async fn admissions(&self) -> Result<Vec<Admission>, PatientRepositoryError> {
        Ok(Vec::new())
    }

    async fn ipd_admissions(&self) -> Result<Vec<IpdAdmission>, PatientRepositoryError> {
        Ok(Vec::new())
    }

    async fn discharges(&self) -> Result<Vec<Discharge>, PatientRepositoryError> {
        Ok(Vec::new())
    }

    async fn ot_schedules(&self) -> Result<Vec<OtSchedule>, PatientRepositoryError> {
        Ok(Vec::new())
    }

    async fn assigned_tasks(
        &self,
        _staff_type: StaffType,
    ) -> Result<Vec<AssignedTask>, PatientRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(None, true)]
    #[case(Some("pending"), true)]
    #[case(Some("in progress"), true)]
    #[case(Some(" Completed "), false)]
    fn pending_unless_completed(#[case] status: Option<&str>, #[case] pending: bool) {
        let task = AssignedTask {
            admission_number: "A1".to_owned(),
            task: "Vitals".to_owned(),
            assignee: None,
            status: status.map(str::to_owned),
        };
        assert_eq!(task.is_pending(), pending);
    }
}
