//! Driving port for the roster board and today's leave.
//!
//! Every mutation goes through one board so grid invariants are enforced in a
//! single place. Responses carry the refreshed board and any notices.

use async_trait::async_trait;
use chrono::NaiveDate;
use roster::{AssignmentGrid, LeaveSets, Shift, StaffDirectory, StaffRecord, StaffType, Ward};
use serde::Serialize;

use crate::domain::{Confirmation, Error, Notice};

/// Snapshot of the board as the roster screen renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    /// Day the leave sets apply to.
    pub date: NaiveDate,
    /// Ward → shift → assigned staff.
    pub grid: AssignmentGrid,
    /// Pending multi-selection.
    pub selection: Vec<StaffRecord>,
    /// Today's leave.
    pub leave: LeaveSets,
    /// Rosterable staff by category.
    pub directory: StaffDirectory,
    /// Number of assignments across all cells.
    pub assignment_count: usize,
}

/// Result of a board operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardUpdate {
    /// Messages for the user, in the order they were raised.
    pub notices: Vec<Notice>,
    /// Board after the operation.
    pub board: BoardView,
}

/// Remove one staff member from one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveAssignmentRequest {
    /// Derived identifier, e.g. `nurse_Mary_Jane`.
    pub staff_id: String,
    /// Ward of the cell.
    pub ward: Ward,
    /// Shift of the cell.
    pub shift: Shift,
}

/// Roster board use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterBoard: Send + Sync {
    /// Current board, with leave rolled over if the day has changed.
    async fn view(&self) -> BoardView;

    /// Re-read today's leave from the backend and sweep the board.
    async fn refresh_leave(&self) -> Result<BoardUpdate, Error>;

    /// Re-read leave, staff and the latest roster rows.
    async fn reload(&self) -> Result<BoardUpdate, Error>;

    /// Assign one or more staff to a cell.
    async fn assign(&self, ward: Ward, shift: Shift, staff: Vec<StaffRecord>) -> Result<BoardUpdate, Error>;

    /// Remove one staff member from a cell.
    async fn remove_assignment(&self, request: RemoveAssignmentRequest) -> Result<BoardUpdate, Error>;

    /// Replace the pending selection.
    async fn set_selection(&self, staff: Vec<StaffRecord>) -> Result<BoardUpdate, Error>;

    /// Assign the pending selection to a cell and clear it.
    async fn assign_selection(&self, ward: Ward, shift: Shift) -> Result<BoardUpdate, Error>;

    /// Empty every cell.
    async fn clear_assignments(&self, confirmation: Confirmation) -> Result<BoardUpdate, Error>;

    /// Append the leave-filtered grid to the roster table.
    async fn save(&self) -> Result<BoardUpdate, Error>;

    /// Record a staff member on leave today.
    async fn add_leave(&self, name: String, staff_type: StaffType) -> Result<BoardUpdate, Error>;

    /// Withdraw today's leave for a staff member.
    async fn remove_leave(&self, name: String, staff_type: StaffType) -> Result<BoardUpdate, Error>;

    /// Withdraw all of today's leave.
    async fn clear_leave(&self, confirmation: Confirmation) -> Result<BoardUpdate, Error>;

    /// Contents of a backup written by a failed save.
    async fn backup(&self, name: String) -> Result<Vec<u8>, Error>;
}
