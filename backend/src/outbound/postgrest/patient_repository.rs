//! Patient tables read for the overview dashboard.
//!
//! Every read is a plain select of one table; rows without an admission
//! number cannot be correlated and are dropped here.

use async_trait::async_trait;
use roster::StaffType;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::client::{PostgrestClient, Select};
use super::dto::{AdmissionRowDto, AssignedTaskRowDto, DischargeRowDto, IpdRowDto, OtRowDto};
use crate::domain::ports::{
    Admission, AssignedTask, Discharge, IpdAdmission, OtSchedule, PatientRepository,
    PatientRepositoryError,
};

const ADMISSIONS: &str = "patient_admission";
const IPD_ADMISSIONS: &str = "ipd_admissions";
const DISCHARGES: &str = "discharge";
const OT_SCHEDULES: &str = "ot_information";

/// Task table holding assignments for a staff category.
pub(super) fn task_table(staff_type: StaffType) -> Option<&'static str> {
    match staff_type {
        StaffType::Nurse => Some("nurse_assign_task"),
        StaffType::Rmo => Some("rmo_assign_task"),
        StaffType::Ot => None,
    }
}

/// Read-only access to admissions, IPD beds, discharges, OT schedules and tasks.
#[derive(Debug, Clone)]
pub struct PostgrestPatientRepository {
    client: PostgrestClient,
}

impl PostgrestPatientRepository {
    /// Wrap a shared client.
    #[must_use]
    pub const fn new(client: PostgrestClient) -> Self {
        Self { client }
    }

    async fn keyed_rows<Dto, T>(
        &self,
        table: &str,
        into_domain: fn(Dto) -> Option<T>,
    ) -> Result<Vec<T>, PatientRepositoryError>
    where
        Dto: DeserializeOwned + Send,
        T: Send,
    {
        let rows: Vec<Dto> = self.client.select(table, &Select::all()).await?;
        let total = rows.len();
        let records: Vec<T> = rows.into_iter().filter_map(into_domain).collect();
        if records.len() < total {
            debug!(table, skipped = total - records.len(), "ignored rows without an admission number");
        }
        Ok(records)
    }
}

#[async_trait]
impl PatientRepository for PostgrestPatientRepository {
    async fn admissions(&self) -> Result<Vec<Admission>, PatientRepositoryError> {
        self.keyed_rows(ADMISSIONS, AdmissionRowDto::into_domain).await
    }

    async fn ipd_admissions(&self) -> Result<Vec<IpdAdmission>, PatientRepositoryError> {
        self.keyed_rows(IPD_ADMISSIONS, IpdRowDto::into_domain).await
    }

    async fn discharges(&self) -> Result<Vec<Discharge>, PatientRepositoryError> {
        self.keyed_rows(DISCHARGES, DischargeRowDto::into_domain).await
    }

    async fn ot_schedules(&self) -> Result<Vec<OtSchedule>, PatientRepositoryError> {
        self.keyed_rows(OT_SCHEDULES, OtRowDto::into_domain).await
    }

    async fn assigned_tasks(
        &self,
        staff_type: StaffType,
    ) -> Result<Vec<AssignedTask>, PatientRepositoryError> {
        let Some(table) = task_table(staff_type) else {
            return Ok(Vec::new());
        };
        self.keyed_rows(table, AssignedTaskRowDto::into_domain).await
    }
}
