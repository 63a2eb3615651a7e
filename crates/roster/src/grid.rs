//! In-memory ward × shift assignment grid.
//!
//! The grid is session state rebuilt from persisted rows; the roster table is
//! the source of truth. Two invariants hold after every public mutation:
//! a cell never holds the same staff identifier twice, and staff on leave are
//! removed as soon as [`AssignmentGrid::sweep_leave`] runs with the new sets.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cell::WardCellPayload;
use crate::layout::{Shift, Ward};
use crate::leave::LeaveSets;
use crate::staff::StaffRecord;

/// Result of an [`AssignmentGrid::assign`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignOutcome {
    /// Records that were appended to the cell.
    pub assigned: Vec<StaffRecord>,
    /// Records skipped because the cell already held them.
    pub duplicates: usize,
    /// Records skipped because the staff member is on leave.
    pub on_leave: usize,
}

impl AssignOutcome {
    /// Whether any record landed in the cell.
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.assigned.is_empty()
    }
}

/// Mapping of ward → shift → ordered staff assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AssignmentGrid {
    cells: BTreeMap<Ward, BTreeMap<Shift, Vec<StaffRecord>>>,
}

impl Default for AssignmentGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl AssignmentGrid {
    /// Create a grid with every ward × shift cell present and empty.
    #[must_use]
    pub fn new() -> Self {
        let cells = Ward::ALL
            .into_iter()
            .map(|ward| {
                let shifts = Shift::ALL
                    .into_iter()
                    .map(|shift| (shift, Vec::new()))
                    .collect();
                (ward, shifts)
            })
            .collect();
        Self { cells }
    }

    /// Records assigned to one cell, in insertion order.
    #[must_use]
    pub fn cell(&self, ward: Ward, shift: Shift) -> &[StaffRecord] {
        self.cells
            .get(&ward)
            .and_then(|shifts| shifts.get(&shift))
            .map_or(&[], Vec::as_slice)
    }

    fn cell_mut(&mut self, ward: Ward, shift: Shift) -> &mut Vec<StaffRecord> {
        self.cells
            .entry(ward)
            .or_default()
            .entry(shift)
            .or_default()
    }

    /// Whether the cell already holds the identifier.
    #[must_use]
    pub fn contains(&self, ward: Ward, shift: Shift, staff_id: &str) -> bool {
        self.cell(ward, shift)
            .iter()
            .any(|record| record.id() == staff_id)
    }

    /// Append one or more records to a cell.
    ///
    /// Records already in the cell (including earlier records of the same
    /// call) and staff on leave are skipped without error.
    pub fn assign<I>(&mut self, ward: Ward, shift: Shift, records: I, leave: &LeaveSets) -> AssignOutcome
    where
        I: IntoIterator<Item = StaffRecord>,
    {
        let mut outcome = AssignOutcome::default();
        let cell = self.cell_mut(ward, shift);
        for record in records {
            if leave.is_on_leave(&record) {
                outcome.on_leave += 1;
            } else if cell.iter().any(|existing| existing.id() == record.id()) {
                outcome.duplicates += 1;
            } else {
                cell.push(record.clone());
                outcome.assigned.push(record);
            }
        }
        outcome
    }

    /// Remove the first record with the identifier from a cell.
    pub fn remove(&mut self, staff_id: &str, ward: Ward, shift: Shift) -> Option<StaffRecord> {
        let cell = self.cell_mut(ward, shift);
        let position = cell.iter().position(|record| record.id() == staff_id)?;
        Some(cell.remove(position))
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        for shifts in self.cells.values_mut() {
            for cell in shifts.values_mut() {
                cell.clear();
            }
        }
    }

    /// Remove everyone on leave from every cell.
    ///
    /// Returns `true` when at least one record was removed. A second call
    /// with the same leave sets is a no-op and returns `false`.
    pub fn sweep_leave(&mut self, leave: &LeaveSets) -> bool {
        let mut changed = false;
        for shifts in self.cells.values_mut() {
            for cell in shifts.values_mut() {
                let before = cell.len();
                cell.retain(|record| !leave.is_on_leave(record));
                changed |= cell.len() != before;
            }
        }
        changed
    }

    /// Copy of the grid with staff on leave filtered out.
    #[must_use]
    pub fn without_leave(&self, leave: &LeaveSets) -> Self {
        let mut filtered = self.clone();
        filtered.sweep_leave(leave);
        filtered
    }

    /// Persisted payload for one cell.
    #[must_use]
    pub fn payload(&self, ward: Ward, shift: Shift) -> WardCellPayload {
        self.cell(ward, shift).iter().collect()
    }

    /// Iterate over every cell in ward, then shift order.
    pub fn cells(&self) -> impl Iterator<Item = (Ward, Shift, &[StaffRecord])> {
        self.cells.iter().flat_map(|(ward, shifts)| {
            shifts
                .iter()
                .map(move |(shift, records)| (*ward, *shift, records.as_slice()))
        })
    }

    /// Number of assignments across all cells.
    #[must_use]
    pub fn assignment_count(&self) -> usize {
        self.cells().map(|(_, _, records)| records.len()).sum()
    }

    /// Whether no cell holds any assignment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignment_count() == 0
    }
}
