//! Row DTOs for the backend tables.
//!
//! Columns are snake_case and loosely typed on the backend side: identifiers
//! and admission numbers may arrive as strings or numbers, optional text as
//! null or blank. The adapters decode into these DTOs first, then map into
//! domain records in one pass.

use chrono::NaiveDate;
use roster::{Shift, StaffType};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::ports::{
    Admission, AssignedTask, Discharge, IpdAdmission, LeaveEntry, OtSchedule, PredefinedTask,
    TaskAssignmentRow,
};
use crate::domain::{StaffDraft, StaffMember};

/// Status written with every new task assignment.
pub(super) const PENDING_STATUS: &str = "pending";

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text.trim().to_owned()).filter(|text| !text.is_empty()),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    })
}

#[derive(Debug, Deserialize)]
pub(super) struct LeaveRowDto {
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) staff_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) staff_type: Option<String>,
    pub(super) leave_date: NaiveDate,
}

impl LeaveRowDto {
    /// `None` for rows with no name or an unknown category.
    pub(super) fn into_domain(self) -> Option<LeaveEntry> {
        let staff_type = self.staff_type?.parse::<StaffType>().ok()?;
        Some(LeaveEntry {
            staff_name: self.staff_name?,
            staff_type,
            leave_date: self.leave_date,
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct LeaveInsertDto<'a> {
    pub(super) staff_name: &'a str,
    pub(super) staff_type: StaffType,
    pub(super) leave_date: NaiveDate,
}

impl<'a> From<&'a LeaveEntry> for LeaveInsertDto<'a> {
    fn from(entry: &'a LeaveEntry) -> Self {
        Self {
            staff_name: &entry.staff_name,
            staff_type: entry.staff_type,
            leave_date: entry.leave_date,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct StaffRowDto {
    pub(super) id: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) designation: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) department: Option<String>,
}

impl StaffRowDto {
    /// Prefer `name`; otherwise join first and last names. `None` when both
    /// are missing.
    pub(super) fn into_domain(self) -> Option<StaffMember> {
        let name = self.name.or_else(|| {
            let joined = [self.first_name.as_deref(), self.last_name.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
            Some(joined).filter(|joined| !joined.is_empty())
        })?;
        Some(StaffMember {
            id: self.id,
            name,
            designation: self.designation.unwrap_or_default(),
            phone_number: self.phone_number,
            email: self.email,
            department: self.department,
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct StaffWriteDto<'a> {
    pub(super) name: &'a str,
    pub(super) designation: &'a str,
    pub(super) phone_number: Option<&'a str>,
    pub(super) email: Option<&'a str>,
    pub(super) department: Option<&'a str>,
}

impl<'a> From<&'a StaffDraft> for StaffWriteDto<'a> {
    fn from(draft: &'a StaffDraft) -> Self {
        Self {
            name: &draft.name,
            designation: &draft.designation,
            phone_number: draft.phone_number.as_deref(),
            email: draft.email.as_deref(),
            department: draft.department.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AdmissionRowDto {
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) admission_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) patient_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) ward: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) bed_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) consultant: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) admission_date: Option<String>,
}

impl AdmissionRowDto {
    pub(super) fn into_domain(self) -> Option<Admission> {
        Some(Admission {
            admission_number: self.admission_number?,
            patient_name: self.patient_name.unwrap_or_default(),
            ward: self.ward,
            bed_number: self.bed_number,
            consultant: self.consultant,
            admission_date: self.admission_date,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct IpdRowDto {
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) admission_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) ipd_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) ward: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) bed_number: Option<String>,
}

impl IpdRowDto {
    pub(super) fn into_domain(self) -> Option<IpdAdmission> {
        Some(IpdAdmission {
            admission_number: self.admission_number?,
            ipd_number: self.ipd_number,
            ward: self.ward,
            bed_number: self.bed_number,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct DischargeRowDto {
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) admission_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) discharge_date: Option<String>,
}

impl DischargeRowDto {
    pub(super) fn into_domain(self) -> Option<Discharge> {
        Some(Discharge {
            admission_number: self.admission_number?,
            discharge_date: self.discharge_date,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct OtRowDto {
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) admission_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) procedure: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) ot_date: Option<String>,
}

impl OtRowDto {
    pub(super) fn into_domain(self) -> Option<OtSchedule> {
        Some(OtSchedule {
            admission_number: self.admission_number?,
            procedure: self.procedure,
            ot_date: self.ot_date,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AssignedTaskRowDto {
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) admission_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) task: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) assignee: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) status: Option<String>,
}

impl AssignedTaskRowDto {
    pub(super) fn into_domain(self) -> Option<AssignedTask> {
        Some(AssignedTask {
            admission_number: self.admission_number?,
            task: self.task.unwrap_or_default(),
            assignee: self.assignee,
            status: self.status,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct PredefinedTaskRowDto {
    pub(super) id: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(super) task: Option<String>,
}

impl PredefinedTaskRowDto {
    pub(super) fn into_domain(self, staff_type: StaffType) -> Option<PredefinedTask> {
        Some(PredefinedTask {
            id: self.id,
            task: self.task?,
            staff_type,
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct TaskAssignmentInsertDto<'a> {
    pub(super) admission_number: &'a str,
    pub(super) task: &'a str,
    pub(super) assignee: &'a str,
    pub(super) shift: Shift,
    pub(super) start_date: NaiveDate,
    pub(super) status: &'static str,
}

impl<'a> From<&'a TaskAssignmentRow> for TaskAssignmentInsertDto<'a> {
    fn from(row: &'a TaskAssignmentRow) -> Self {
        Self {
            admission_number: &row.admission_number,
            task: &row.task,
            assignee: &row.assignee,
            shift: row.shift,
            start_date: row.start_date,
            status: PENDING_STATUS,
        }
    }
}
