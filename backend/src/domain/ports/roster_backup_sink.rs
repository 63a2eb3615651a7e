//! Port for local snapshots written when a roster save fails.

use async_trait::async_trait;
use roster::{AssignmentGrid, LeaveSets, Shift};
use serde::Serialize;

use super::define_port_error;

define_port_error! {
    /// Errors raised by backup sink adapters.
    pub enum RosterBackupError {
        /// Writing or reading the snapshot failed.
        Io { message: String } => service_unavailable("roster backup unavailable: {message}"),
        /// The snapshot could not be encoded.
        Encode { message: String } => internal("roster backup error: {message}"),
        /// The requested name is not a backup file.
        InvalidName { name: String } => invalid_request("not a roster backup file: {name}"),
    }
}

/// Everything needed to re-enter a roster whose save failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterBackup {
    /// Timestamp the failed save used.
    pub timestamp: String,
    /// Shifts whose rows were inserted before the failure.
    pub persisted_shifts: Vec<Shift>,
    /// Leave-filtered grid that was being saved.
    pub grid: AssignmentGrid,
    /// Leave sets at the time of the save.
    pub leave: LeaveSets,
    /// Failure reported by the backend.
    pub error: String,
    /// Trace id of the request that attempted the save.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// Stores and serves backup snapshots.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterBackupSink: Send + Sync {
    /// Persist a snapshot and return its file name.
    async fn write(&self, backup: &RosterBackup) -> Result<String, RosterBackupError>;

    /// Read a snapshot back by file name; `None` when it does not exist.
    async fn read(&self, name: &str) -> Result<Option<Vec<u8>>, RosterBackupError>;
}

/// Fixture implementation that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRosterBackupSink;

#[async_trait]
impl RosterBackupSink for FixtureRosterBackupSink {
    async fn write(&self, _backup: &RosterBackup) -> Result<String, RosterBackupError> {
        Ok("roster-backup-fixture.json".to_owned())
    }

    async fn read(&self, _name: &str) -> Result<Option<Vec<u8>>, RosterBackupError> {
        Ok(None)
    }
}
