//! Patient overview service.
//!
//! Correlates admissions, IPD beds, discharges, OT schedules and assigned
//! tasks by admission number. The backend offers no join, so each table is read in
//! full and matched here.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use roster::StaffType;

use crate::domain::Error;
use crate::domain::ports::{
    Admission, AssignedTask, IpdAdmission, OtSchedule, OverviewSummary, PatientOverview, PatientOverviewQuery,
    PatientOverviewRow, PatientRepository,
};

fn key(admission_number: &str) -> &str {
    admission_number.trim()
}

/// Latest schedule per patient; stored dates are ISO so they compare as text.
fn latest_schedules(schedules: Vec<OtSchedule>) -> HashMap<String, OtSchedule> {
    let mut latest: HashMap<String, OtSchedule> = HashMap::new();
    for schedule in schedules {
        let admission = key(&schedule.admission_number).to_owned();
        match latest.get(&admission) {
            Some(kept) if kept.ot_date >= schedule.ot_date => {}
            _ => {
                latest.insert(admission, schedule);
            }
        }
    }
    latest
}

/// Current bed per patient; later rows replace earlier ones.
fn ipd_beds(beds: Vec<IpdAdmission>) -> HashMap<String, IpdAdmission> {
    beds.into_iter()
        .map(|bed| (key(&bed.admission_number).to_owned(), bed))
        .collect()
}

fn pending_counts<'a, I>(tasks: I) -> HashMap<String, usize>
where
    I: IntoIterator<Item = &'a AssignedTask>,
{
    let mut counts = HashMap::new();
    for task in tasks.into_iter().filter(|task| task.is_pending()) {
        *counts
            .entry(key(&task.admission_number).to_owned())
            .or_insert(0) += 1;
    }
    counts
}

fn correlate(
    admissions: Vec<Admission>,
    beds: &HashMap<String, IpdAdmission>,
    discharged: &HashSet<String>,
    schedules: &HashMap<String, OtSchedule>,
    pending: &HashMap<String, usize>,
) -> BTreeMap<String, PatientOverviewRow> {
    admissions
        .into_iter()
        .map(|admission| {
            let admission_number = key(&admission.admission_number).to_owned();
            let schedule = schedules.get(&admission_number);
            let bed = beds.get(&admission_number);
            let row = PatientOverviewRow {
                discharged: discharged.contains(&admission_number),
                ot_procedure: schedule.and_then(|entry| entry.procedure.clone()),
                ot_date: schedule.and_then(|entry| entry.ot_date.clone()),
                pending_tasks: pending.get(&admission_number).copied().unwrap_or(0),
                admission_number: admission_number.clone(),
                patient_name: admission.patient_name,
                ipd_number: bed.and_then(|bed| bed.ipd_number.clone()),
                ward: bed
                    .and_then(|bed| bed.ward.clone())
                    .or(admission.ward),
                bed_number: bed
                    .and_then(|bed| bed.bed_number.clone())
                    .or(admission.bed_number),
                consultant: admission.consultant,
                admission_date: admission.admission_date,
            };
            (admission_number, row)
        })
        .collect()
}

fn summarise<'a, I>(rows: I, schedules: &HashMap<String, OtSchedule>) -> OverviewSummary
where
    I: IntoIterator<Item = &'a PatientOverviewRow>,
{
    rows.into_iter()
        .fold(OverviewSummary::default(), |mut summary, row| {
            if row.discharged {
                summary.discharged += 1;
            } else {
                summary.admitted += 1;
                summary.pending_tasks += row.pending_tasks;
                if row.ipd_number.is_some() {
                    summary.inpatients += 1;
                }
                if schedules.contains_key(&row.admission_number) {
                    summary.in_ot += 1;
                }
            }
            summary
        })
}

/// Patient dashboard built from the patient tables.
#[derive(Clone)]
pub struct PatientOverviewService {
    repo: Arc<dyn PatientRepository>,
}

impl PatientOverviewService {
    /// Create a service over the given repository.
    pub fn new(repo: Arc<dyn PatientRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl PatientOverviewQuery for PatientOverviewService {
    async fn overview(&self, include_discharged: bool) -> Result<PatientOverview, Error> {
        let (admissions, beds, discharges, schedules, nurse_tasks, rmo_tasks) = tokio::try_join!(
            self.repo.admissions(),
            self.repo.ipd_admissions(),
            self.repo.discharges(),
            self.repo.ot_schedules(),
            self.repo.assigned_tasks(StaffType::Nurse),
            self.repo.assigned_tasks(StaffType::Rmo),
        )?;

        let discharged: HashSet<String> = discharges
            .iter()
            .map(|discharge| key(&discharge.admission_number).to_owned())
            .collect();
        let beds = ipd_beds(beds);
        let schedules = latest_schedules(schedules);
        let pending = pending_counts(nurse_tasks.iter().chain(&rmo_tasks));
        let rows = correlate(admissions, &beds, &discharged, &schedules, &pending);
        let summary = summarise(rows.values(), &schedules);

        let patients = rows
            .into_values()
            .filter(|row| include_discharged || !row.discharged)
            .collect();
        Ok(PatientOverview { patients, summary })
    }
}
