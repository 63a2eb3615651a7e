//! Port for the `leave` table.
//!
//! Leave is recorded per staff member, category and calendar day. The board
//! only ever looks at today's entries.

use async_trait::async_trait;
use chrono::NaiveDate;
use roster::StaffType;
use serde::{Deserialize, Serialize};

use super::define_port_error;

define_port_error! {
    /// Errors raised by leave repository adapters.
    pub enum LeaveRepositoryError {
        /// The backend could not be reached.
        Connection { message: String } =>
            service_unavailable("leave repository unavailable: {message}"),
        /// The backend rejected or failed the request.
        Query { message: String } => internal("leave repository error: {message}"),
    }
}

/// One staff member on leave for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveEntry {
    /// Name as shown on the board.
    pub staff_name: String,
    /// Staff category.
    pub staff_type: StaffType,
    /// Day the leave applies to.
    pub leave_date: NaiveDate,
}

/// Persistence of leave entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaveRepository: Send + Sync {
    /// All entries recorded for `date`.
    async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<LeaveEntry>, LeaveRepositoryError>;

    /// Insert one entry.
    async fn insert(&self, entry: &LeaveEntry) -> Result<(), LeaveRepositoryError>;

    /// Delete every row matching the entry's name, category and date.
    async fn delete(&self, entry: &LeaveEntry) -> Result<(), LeaveRepositoryError>;

    /// Delete every entry for `date`.
    async fn delete_for_date(&self, date: NaiveDate) -> Result<(), LeaveRepositoryError>;
}

/// Fixture implementation with nobody on leave that discards writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLeaveRepository;

#[async_trait]
impl LeaveRepository for FixtureLeaveRepository {
    async fn list_for_date(&self, _date: NaiveDate) -> Result<Vec<LeaveEntry>, LeaveRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _entry: &LeaveEntry) -> Result<(), LeaveRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _entry: &LeaveEntry) -> Result<(), LeaveRepositoryError> {
        Ok(())
    }

    async fn delete_for_date(&self, _date: NaiveDate) -> Result<(), LeaveRepositoryError> {
        Ok(())
    }
}
