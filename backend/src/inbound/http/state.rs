//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{PatientOverviewQuery, RosterBoard, StaffAdmin, TaskAssignmentCommand};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Roster board and today's leave.
    pub board: Arc<dyn RosterBoard>,
    /// Staff master CRUD.
    pub staff: Arc<dyn StaffAdmin>,
    /// Patient dashboard.
    pub patients: Arc<dyn PatientOverviewQuery>,
    /// Predefined tasks and bulk assignment.
    pub tasks: Arc<dyn TaskAssignmentCommand>,
}

impl HttpState {
    /// Construct state from the driving ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use ward_ops::domain::ports::{
    ///     FixtureLeaveRepository, FixturePatientRepository, FixtureRosterBackupSink,
    ///     FixtureRosterRepository, FixtureStaffRepository, FixtureTaskRepository,
    /// };
    /// use ward_ops::domain::{
    ///     DEFAULT_ROSTER_WINDOW, PatientOverviewService, RosterBoardService, RosterClock,
    ///     RosterPorts, RosterSession, StaffAdminService, TaskAssignmentService,
    /// };
    /// use ward_ops::inbound::http::state::HttpState;
    ///
    /// let clock = RosterClock::from_minutes(Arc::new(DefaultClock), 330).expect("offset");
    /// let backups = Arc::new(FixtureRosterBackupSink);
    /// let session = RosterSession::new(
    ///     RosterPorts {
    ///         roster: Arc::new(FixtureRosterRepository),
    ///         staff: Arc::new(FixtureStaffRepository),
    ///         leave: Arc::new(FixtureLeaveRepository),
    ///         backups: backups.clone(),
    ///     },
    ///     clock,
    ///     DEFAULT_ROSTER_WINDOW,
    /// );
    /// let state = HttpState::new(
    ///     Arc::new(RosterBoardService::new(session, backups)),
    ///     Arc::new(StaffAdminService::new(Arc::new(FixtureStaffRepository))),
    ///     Arc::new(PatientOverviewService::new(Arc::new(FixturePatientRepository))),
    ///     Arc::new(TaskAssignmentService::new(Arc::new(FixtureTaskRepository))),
    /// );
    /// let _board = state.board.clone();
    /// ```
    pub fn new(
        board: Arc<dyn RosterBoard>,
        staff: Arc<dyn StaffAdmin>,
        patients: Arc<dyn PatientOverviewQuery>,
        tasks: Arc<dyn TaskAssignmentCommand>,
    ) -> Self {
        Self {
            board,
            staff,
            patients,
            tasks,
        }
    }
}
