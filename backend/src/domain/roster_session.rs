//! Single-writer state for the roster board.
//!
//! [`RosterSession`] owns the grid, the pending selection, the staff
//! directory and the leave cache. Every mutation takes `&mut self`; callers
//! serialise access (see [`crate::domain::RosterBoardService`]).

use std::collections::HashSet;
use std::sync::Arc;

use roster::{
    AssignOutcome, AssignmentGrid, RosterRow, RosterSaveRow, Shift, StaffDirectory, StaffRecord,
    StaffType, Ward, build_save_rows, parse_latest, parse_roster,
};
use serde_json::json;
use tracing::{error, info, warn};

use crate::domain::leave_registry::{LeaveChange, LeaveRegistry};
use crate::domain::ports::{
    BoardView, LeaveRepository, RosterBackup, RosterBackupSink, RosterRepository,
    RosterRepositoryError, StaffRepository,
};
use crate::domain::{
    Confirmation, Error, Notice, RosterClock, TraceId, directory_from_members,
};

/// Number of recent roster rows read when none is configured.
pub const DEFAULT_ROSTER_WINDOW: usize = 30;

/// Driven ports the session talks to.
#[derive(Clone)]
pub struct RosterPorts {
    /// Append-only roster table.
    pub roster: Arc<dyn RosterRepository>,
    /// Staff master table.
    pub staff: Arc<dyn StaffRepository>,
    /// Leave table.
    pub leave: Arc<dyn LeaveRepository>,
    /// Local snapshots for failed saves.
    pub backups: Arc<dyn RosterBackupSink>,
}

fn cell_label(ward: Ward, shift: Shift) -> String {
    format!("{ward}, {shift}")
}

fn joined_names(records: &[StaffRecord]) -> String {
    records
        .iter()
        .map(StaffRecord::name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn assignment_notices(outcome: &AssignOutcome, ward: Ward, shift: Shift) -> Vec<Notice> {
    let cell = cell_label(ward, shift);
    let mut notices = Vec::new();
    if outcome.changed() {
        notices.push(Notice::success(format!(
            "Assigned {} to {cell}",
            joined_names(&outcome.assigned)
        )));
    }
    if outcome.duplicates > 0 {
        notices.push(Notice::info(format!(
            "{} already assigned to {cell}",
            outcome.duplicates
        )));
    }
    if outcome.on_leave > 0 {
        notices.push(Notice::warning(format!(
            "{} on leave today and not assigned",
            outcome.on_leave
        )));
    }
    notices
}

/// Roster board state and the operations that mutate it.
pub struct RosterSession {
    roster: Arc<dyn RosterRepository>,
    staff: Arc<dyn StaffRepository>,
    backups: Arc<dyn RosterBackupSink>,
    leave: LeaveRegistry,
    clock: RosterClock,
    window: usize,
    grid: AssignmentGrid,
    selection: Vec<StaffRecord>,
    directory: StaffDirectory,
}

impl RosterSession {
    /// Create an empty session; call [`Self::load`] to populate it.
    pub fn new(ports: RosterPorts, clock: RosterClock, window: usize) -> Self {
        let RosterPorts {
            roster,
            staff,
            leave,
            backups,
        } = ports;
        Self {
            roster,
            staff,
            backups,
            leave: LeaveRegistry::new(leave, clock.clone()),
            clock,
            window: window.max(1),
            grid: AssignmentGrid::new(),
            selection: Vec::new(),
            directory: StaffDirectory::new(),
        }
    }

    /// Board snapshot.
    #[must_use]
    pub fn view(&self) -> BoardView {
        BoardView {
            date: self.leave.cached_day(),
            grid: self.grid.clone(),
            selection: self.selection.clone(),
            leave: self.leave.current().clone(),
            directory: self.directory.clone(),
            assignment_count: self.grid.assignment_count(),
        }
    }

    /// Read today's leave, the staff directory and the newest row per shift.
    ///
    /// Fresh leave is swept from the board as soon as it arrives, so a later
    /// staff or roster failure never leaves staff on leave in the grid.
    ///
    /// # Errors
    ///
    /// Returns the first backend failure; the board keeps its previous grid
    /// minus anyone on leave.
    pub async fn load(&mut self) -> Result<Vec<Notice>, Error> {
        let mut notices = self.refresh_leave().await?;
        let members = self.staff.list().await?;
        self.directory = directory_from_members(&members);
        let rows = self.roster.recent_rows(self.window).await?;
        self.grid = parse_latest(rows, self.leave.current(), &self.directory);
        self.sweep();
        let count = self.grid.assignment_count();
        info!(assignments = count, "roster loaded");
        notices.push(Notice::info(format!("Loaded roster with {count} assignments")));
        Ok(notices)
    }

    /// Re-read today's leave and sweep the board.
    ///
    /// # Errors
    ///
    /// Returns the registry error; the board is unchanged.
    pub async fn refresh_leave(&mut self) -> Result<Vec<Notice>, Error> {
        let previous = self.leave.cached_day();
        let on_leave = self.leave.fetch_for_today().await?.len();
        let today = self.leave.cached_day();
        if previous != today {
            info!(%previous, %today, on_leave, "leave rolled over to a new day");
        }
        Ok(if self.sweep() {
            vec![Notice::warning(
                "Removed staff on leave today from the roster and selection",
            )]
        } else {
            Vec::new()
        })
    }

    /// Refresh leave when the cached day has ended.
    ///
    /// # Errors
    ///
    /// Returns the registry error when the refresh is needed and fails.
    pub async fn roll_over(&mut self) -> Result<Vec<Notice>, Error> {
        if !self.leave.is_stale() {
            return Ok(Vec::new());
        }
        self.refresh_leave().await
    }

    /// Assign one or more staff to a cell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::invalid_request`] when no staff are given.
    pub fn assign(
        &mut self,
        ward: Ward,
        shift: Shift,
        staff: Vec<StaffRecord>,
    ) -> Result<Vec<Notice>, Error> {
        if staff.is_empty() {
            return Err(Error::invalid_request("no staff to assign"));
        }
        let staff = Self::named(staff)?;
        let outcome = self.grid.assign(ward, shift, staff, self.leave.current());
        Ok(assignment_notices(&outcome, ward, shift))
    }

    /// Replace the pending selection, dropping duplicates and staff on leave.
    ///
    /// # Errors
    ///
    /// Returns [`Error::invalid_request`] when a record has a blank name.
    pub fn set_selection(&mut self, staff: Vec<StaffRecord>) -> Result<Vec<Notice>, Error> {
        let staff = Self::named(staff)?;
        let mut seen = HashSet::new();
        let mut on_leave = 0_usize;
        let mut selection = Vec::with_capacity(staff.len());
        for record in staff {
            if self.leave.current().is_on_leave(&record) {
                on_leave += 1;
            } else if seen.insert(record.id().to_owned()) {
                selection.push(record);
            }
        }
        self.selection = selection;
        let mut notices = vec![Notice::info(format!(
            "{} staff selected",
            self.selection.len()
        ))];
        if on_leave > 0 {
            notices.push(Notice::warning(format!(
                "{on_leave} on leave today and not selected"
            )));
        }
        Ok(notices)
    }

    /// Assign the pending selection to a cell, then clear it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::invalid_request`] when nothing is selected.
    pub fn assign_selection(&mut self, ward: Ward, shift: Shift) -> Result<Vec<Notice>, Error> {
        if self.selection.is_empty() {
            return Err(Error::invalid_request("no staff selected"));
        }
        let selection = std::mem::take(&mut self.selection);
        let outcome = self.grid.assign(ward, shift, selection, self.leave.current());
        Ok(assignment_notices(&outcome, ward, shift))
    }

    /// Remove one staff member from a cell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::not_found`] when the cell does not hold the id.
    pub fn remove_assignment(
        &mut self,
        staff_id: &str,
        ward: Ward,
        shift: Shift,
    ) -> Result<Vec<Notice>, Error> {
        let removed = self.grid.remove(staff_id, ward, shift).ok_or_else(|| {
            Error::not_found(format!(
                "{staff_id} is not assigned to {}",
                cell_label(ward, shift)
            ))
        })?;
        Ok(vec![Notice::success(format!(
            "Removed {} from {}",
            removed.name(),
            cell_label(ward, shift)
        ))])
    }

    /// Empty every cell once confirmed.
    pub fn clear_assignments(&mut self, confirmation: Confirmation) -> Vec<Notice> {
        if !confirmation.is_confirmed() {
            return vec![Notice::info("Clear cancelled")];
        }
        self.grid.clear();
        vec![Notice::success("Cleared all assignments")]
    }

    /// Record leave for today and sweep the board.
    ///
    /// # Errors
    ///
    /// Returns the registry error; the board is unchanged.
    pub async fn add_leave(&mut self, name: &str, staff_type: StaffType) -> Result<Vec<Notice>, Error> {
        let change = self.leave.add(name, staff_type).await?;
        let name = name.trim();
        let mut notices = vec![match change {
            LeaveChange::Added => Notice::success(format!("{name} marked on leave today")),
            LeaveChange::AlreadyRecorded => Notice::info(format!("{name} is already on leave today")),
        }];
        if self.sweep() {
            notices.push(Notice::warning(format!(
                "Removed {name} from the roster and selection"
            )));
        }
        Ok(notices)
    }

    /// Withdraw today's leave for a staff member.
    ///
    /// # Errors
    ///
    /// Returns the registry error.
    pub async fn remove_leave(
        &mut self,
        name: &str,
        staff_type: StaffType,
    ) -> Result<Vec<Notice>, Error> {
        let was_cached = self.leave.remove(name, staff_type).await?;
        let name = name.trim();
        Ok(vec![if was_cached {
            Notice::success(format!("{name} is no longer on leave"))
        } else {
            Notice::info(format!("{name} was not on leave today"))
        }])
    }

    /// Withdraw all of today's leave once confirmed.
    ///
    /// # Errors
    ///
    /// Returns the registry error.
    pub async fn clear_leave(&mut self, confirmation: Confirmation) -> Result<Vec<Notice>, Error> {
        let cleared = self.leave.clear_all(confirmation).await?;
        Ok(vec![if cleared {
            Notice::success("Cleared all leave for today")
        } else {
            Notice::info("Clear cancelled")
        }])
    }

    /// Append the leave-filtered grid as one row per shift.
    ///
    /// Rows are inserted in shift order and the first failure stops the
    /// rest. Rows already inserted stay; a local backup of what was being
    /// saved is written instead. The in-memory grid keeps staff who went on
    /// leave after loading; only the persisted copy drops them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::service_unavailable`] with `persistedShifts`,
    /// `timestamp` and `backupFile` details when an insert fails.
    pub async fn save(&mut self) -> Result<Vec<Notice>, Error> {
        let validated = self.grid.without_leave(self.leave.current());
        let timestamp = self.clock.timestamp();
        let rows = build_save_rows(&validated, &timestamp)
            .map_err(|err| Error::internal(format!("failed to encode roster: {err}")))?;

        let mut persisted = Vec::with_capacity(rows.len());
        for row in &rows {
            if let Err(failure) = self.roster.insert_row(row).await {
                return Err(self
                    .backup_failed_save(validated, timestamp, persisted, &failure)
                    .await);
            }
            persisted.push(row.shift);
        }
        info!(%timestamp, assignments = validated.assignment_count(), "roster saved");

        let mut notices = vec![Notice::success(format!("Roster saved at {timestamp}"))];
        if let Err(refresh_error) = self.refresh_after_save().await {
            warn!(error = %refresh_error, "reload after save failed; showing saved rows");
            self.show_saved(rows);
            notices.push(Notice::warning(
                "Roster saved but could not be reloaded; showing the saved copy",
            ));
        }
        Ok(notices)
    }

    async fn refresh_after_save(&mut self) -> Result<(), Error> {
        self.refresh_leave().await?;
        let rows = self.roster.recent_rows(self.window).await?;
        self.grid = parse_latest(rows, self.leave.current(), &self.directory);
        self.sweep();
        Ok(())
    }

    fn show_saved(&mut self, saved: Vec<RosterSaveRow>) {
        let rows: Vec<RosterRow> = saved.into_iter().map(RosterRow::from).collect();
        self.grid = parse_roster(&rows, self.leave.current(), &self.directory);
        self.sweep();
    }

    async fn backup_failed_save(
        &self,
        grid: AssignmentGrid,
        timestamp: String,
        persisted_shifts: Vec<Shift>,
        failure: &RosterRepositoryError,
    ) -> Error {
        warn!(
            error = %failure,
            persisted = persisted_shifts.len(),
            "roster save aborted; writing local backup"
        );
        let message = format!(
            "Roster save failed after {} of {} shifts: {failure}",
            persisted_shifts.len(),
            Shift::ALL.len()
        );
        let backup = RosterBackup {
            timestamp,
            persisted_shifts,
            grid,
            leave: self.leave.current().clone(),
            error: failure.to_string(),
            trace_id: TraceId::current_string(),
        };
        let backup_file = match self.backups.write(&backup).await {
            Ok(name) => {
                warn!(file = %name, "roster backup written");
                Some(name)
            }
            Err(backup_error) => {
                error!(error = %backup_error, "roster backup could not be written");
                None
            }
        };
        let shift_names: Vec<&str> = backup
            .persisted_shifts
            .iter()
            .map(|shift| shift.name())
            .collect();
        Error::service_unavailable(message).with_details(json!({
            "timestamp": backup.timestamp,
            "persistedShifts": shift_names,
            "backupFile": backup_file,
        }))
    }

    /// Remove staff on leave from the grid and the selection.
    fn sweep(&mut self) -> bool {
        let leave = self.leave.current();
        let grid_changed = self.grid.sweep_leave(leave);
        let before = self.selection.len();
        self.selection.retain(|record| !leave.is_on_leave(record));
        grid_changed || self.selection.len() != before
    }

    fn named(staff: Vec<StaffRecord>) -> Result<Vec<StaffRecord>, Error> {
        if staff.iter().any(|record| record.name().trim().is_empty()) {
            return Err(Error::invalid_request("staff names must not be blank"));
        }
        Ok(staff)
    }
}

#[cfg(test)]
#[path = "roster_session_tests.rs"]
mod tests;
