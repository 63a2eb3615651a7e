//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, the backup sink) are implemented by outbound
//! adapters; driving ports (board, staff admin, overview, task assignment)
//! are implemented by domain services and called by the HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod leave_repository;
mod patient_overview_query;
mod patient_repository;
mod roster_backup_sink;
mod roster_board;
mod roster_repository;
mod staff_admin;
mod staff_repository;
mod task_assignment_command;
mod task_repository;

#[cfg(test)]
pub use leave_repository::MockLeaveRepository;
pub use leave_repository::{
    FixtureLeaveRepository, LeaveEntry, LeaveRepository, LeaveRepositoryError,
};
#[cfg(test)]
pub use patient_overview_query::MockPatientOverviewQuery;
pub use patient_overview_query::{
    OverviewSummary, PatientOverview, PatientOverviewQuery, PatientOverviewRow,
};
#[cfg(test)]
pub use patient_repository::MockPatientRepository;
pub use patient_repository::{
    Admission, AssignedTask, Discharge, FixturePatientRepository, IpdAdmission, OtSchedule,
    PatientRepository, PatientRepositoryError,
};
#[cfg(test)]
pub use roster_backup_sink::MockRosterBackupSink;
pub use roster_backup_sink::{
    FixtureRosterBackupSink, RosterBackup, RosterBackupError, RosterBackupSink,
};
#[cfg(test)]
pub use roster_board::MockRosterBoard;
pub use roster_board::{BoardUpdate, BoardView, RemoveAssignmentRequest, RosterBoard};
#[cfg(test)]
pub use roster_repository::MockRosterRepository;
pub use roster_repository::{FixtureRosterRepository, RosterRepository, RosterRepositoryError};
#[cfg(test)]
pub use staff_admin::MockStaffAdmin;
pub use staff_admin::StaffAdmin;
#[cfg(test)]
pub use staff_repository::MockStaffRepository;
pub use staff_repository::{FixtureStaffRepository, StaffRepository, StaffRepositoryError};
#[cfg(test)]
pub use task_assignment_command::MockTaskAssignmentCommand;
pub use task_assignment_command::{
    TaskAssignmentCommand, TaskAssignmentReceipt, TaskAssignmentRequest,
};
#[cfg(test)]
pub use task_repository::MockTaskRepository;
pub use task_repository::{
    FixtureTaskRepository, PredefinedTask, TaskAssignmentRow, TaskRepository, TaskRepositoryError,
};
