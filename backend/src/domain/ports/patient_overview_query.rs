//! Driving port for the patient overview dashboard.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::Error;

/// One patient on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientOverviewRow {
    /// Admission number.
    pub admission_number: String,
    /// Patient name.
    pub patient_name: String,
    /// In-patient department number, once a bed is allocated.
    pub ipd_number: Option<String>,
    /// Current ward: the IPD allocation if any, else the ward at admission.
    pub ward: Option<String>,
    /// Current bed, chosen the same way as the ward.
    pub bed_number: Option<String>,
    /// Consultant in charge.
    pub consultant: Option<String>,
    /// Admission date as stored.
    pub admission_date: Option<String>,
    /// Whether a discharge is recorded.
    pub discharged: bool,
    /// Scheduled procedure, if any.
    pub ot_procedure: Option<String>,
    /// Scheduled OT date, if any.
    pub ot_date: Option<String>,
    /// Nurse and RMO tasks not yet completed.
    pub pending_tasks: usize,
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewSummary {
    /// Patients admitted and not discharged.
    pub admitted: usize,
    /// Admitted patients holding an IPD bed.
    pub inpatients: usize,
    /// Patients with a discharge record.
    pub discharged: usize,
    /// Admitted patients with an OT schedule.
    pub in_ot: usize,
    /// Pending tasks across admitted patients.
    pub pending_tasks: usize,
}

/// Dashboard payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientOverview {
    /// Patient rows, ordered by admission number.
    pub patients: Vec<PatientOverviewRow>,
    /// Counters over every admission.
    pub summary: OverviewSummary,
}

/// Patient overview use case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientOverviewQuery: Send + Sync {
    /// Build the dashboard; discharged patients are listed only on request.
    async fn overview(&self, include_discharged: bool) -> Result<PatientOverview, Error>;
}
