//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;
use chrono::NaiveDate;
use roster::{AssignmentGrid, LeaveSets, StaffDirectory};

use crate::domain::Notice;
use crate::domain::ports::{
    BoardUpdate, BoardView, MockPatientOverviewQuery, MockRosterBoard, MockStaffAdmin,
    MockTaskAssignmentCommand,
};
use crate::inbound::http::state::HttpState;

/// Mocks for every driving port; set expectations, then call
/// [`TestPorts::into_state`].
#[derive(Default)]
pub struct TestPorts {
    pub board: MockRosterBoard,
    pub staff: MockStaffAdmin,
    pub patients: MockPatientOverviewQuery,
    pub tasks: MockTaskAssignmentCommand,
}

impl TestPorts {
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(self.board),
            Arc::new(self.staff),
            Arc::new(self.patients),
            Arc::new(self.tasks),
        ))
    }
}

/// An empty board dated 2 March 2026.
pub fn empty_board() -> BoardView {
    BoardView {
        date: NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date"),
        grid: AssignmentGrid::new(),
        selection: Vec::new(),
        leave: LeaveSets::new(),
        directory: StaffDirectory::new(),
        assignment_count: 0,
    }
}

/// A board update carrying the given notices and an empty board.
pub fn update_with(notices: Vec<Notice>) -> BoardUpdate {
    BoardUpdate {
        notices,
        board: empty_board(),
    }
}
