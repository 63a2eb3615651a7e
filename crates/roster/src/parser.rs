//! Rebuild the assignment grid from persisted roster rows.

use crate::cell::CellContents;
use crate::grid::AssignmentGrid;
use crate::layout::Ward;
use crate::leave::LeaveSets;
use crate::rows::{RosterRow, latest_per_shift};
use crate::staff::StaffDirectory;

/// Parse roster rows into a fresh grid.
///
/// Each row fills the cells of its shift. Blank names, staff on leave and
/// identifiers already present in a cell are skipped. Rows naming an unknown
/// shift contribute nothing. The result depends only on the inputs.
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
///
/// use roster::{LeaveSets, RosterRow, Shift, StaffDirectory, StaffType, Ward, parse_roster};
/// use serde_json::Value;
///
/// let row = RosterRow {
///     timestamp: "2026-03-02 08:00:00+05:30".to_owned(),
///     shift: "Shift A".to_owned(),
///     columns: BTreeMap::from([(
///         "icu".to_owned(),
///         Value::String(r#"{"nurse":["Alice","Bob"],"rmo":[],"ot":[]}"#.to_owned()),
///     )]),
/// };
/// let leave: LeaveSets = [(StaffType::Nurse, "Alice".to_owned())].into_iter().collect();
///
/// let grid = parse_roster([&row], &leave, &StaffDirectory::new());
/// let names: Vec<&str> = grid.cell(Ward::Icu, Shift::A).iter().map(|r| r.name()).collect();
/// assert_eq!(names, ["Bob"]);
/// ```
pub fn parse_roster<'a, I>(rows: I, leave: &LeaveSets, directory: &StaffDirectory) -> AssignmentGrid
where
    I: IntoIterator<Item = &'a RosterRow>,
{
    let mut grid = AssignmentGrid::new();
    for row in rows {
        let Some(shift) = row.shift() else {
            continue;
        };
        for ward in Ward::ALL {
            let raw = row.ward_cell(ward);
            let contents = CellContents::decode(raw.as_deref(), directory);
            grid.assign(ward, shift, contents.records(), leave);
        }
    }
    grid
}

/// Select the newest row per shift from a recent batch, then parse it.
pub fn parse_latest<I>(rows: I, leave: &LeaveSets, directory: &StaffDirectory) -> AssignmentGrid
where
    I: IntoIterator<Item = RosterRow>,
{
    let latest = latest_per_shift(rows);
    parse_roster(latest.values(), leave, directory)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rstest::{fixture, rstest};
    use serde_json::Value;

    use super::*;
    use crate::layout::Shift;
    use crate::rows::build_save_rows;
    use crate::staff::{StaffRecord, StaffType};

    #[fixture]
    fn directory() -> StaffDirectory {
        [
            (StaffType::Nurse, "Alice".to_owned()),
            (StaffType::Nurse, "Bob".to_owned()),
            (StaffType::Rmo, "Ravi".to_owned()),
        ]
        .into_iter()
        .collect()
    }

    fn row(timestamp: &str, shift: &str, cells: &[(&str, &str)]) -> RosterRow {
        RosterRow {
            timestamp: timestamp.to_owned(),
            shift: shift.to_owned(),
            columns: cells
                .iter()
                .map(|(column, cell)| ((*column).to_owned(), Value::String((*cell).to_owned())))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn names(grid: &AssignmentGrid, ward: Ward, shift: Shift) -> Vec<String> {
        grid.cell(ward, shift)
            .iter()
            .map(|record| record.name().to_owned())
            .collect()
    }

    #[rstest]
    fn parsing_is_deterministic(directory: StaffDirectory) {
        let rows = [
            row("t", "Shift A", &[("icu", r#"{"nurse":["Alice"],"rmo":["Ravi"]}"#)]),
            row("t", "Shift B", &[("picu", "N: Bob, Ravi")]),
        ];
        let leave = LeaveSets::new();
        assert_eq!(
            parse_roster(&rows, &leave, &directory),
            parse_roster(&rows, &leave, &directory)
        );
    }

    #[rstest]
    fn duplicate_names_in_a_cell_collapse(directory: StaffDirectory) {
        let rows = [row("t", "Shift A", &[("icu", r#"{"nurse":["Alice","Alice"]}"#)])];
        let grid = parse_roster(&rows, &LeaveSets::new(), &directory);
        assert_eq!(names(&grid, Ward::Icu, Shift::A), ["Alice"]);
    }

    #[rstest]
    fn legacy_cells_mix_prefixes_and_inference(directory: StaffDirectory) {
        let rows = [row("t", "Shift C", &[("male_general_ward", "R: Dr Who, Bob, Ghost")])];
        let grid = parse_roster(&rows, &LeaveSets::new(), &directory);
        let cell = grid.cell(Ward::MaleGeneralWard, Shift::C);
        let typed: Vec<(StaffType, &str)> = cell
            .iter()
            .map(|record| (record.staff_type(), record.name()))
            .collect();
        assert_eq!(typed, [(StaffType::Rmo, "Dr Who"), (StaffType::Nurse, "Bob")]);
    }

    #[rstest]
    fn leave_filters_legacy_entries_too(directory: StaffDirectory) {
        let rows = [row("t", "Shift A", &[("nicu", "Alice, Bob")])];
        let leave: LeaveSets = [(StaffType::Nurse, "Bob".to_owned())].into_iter().collect();
        let grid = parse_roster(&rows, &leave, &directory);
        assert_eq!(names(&grid, Ward::Nicu, Shift::A), ["Alice"]);
    }

    #[rstest]
    fn parse_latest_ignores_superseded_rows(directory: StaffDirectory) {
        let grid = parse_latest(
            [
                row("2026-03-02 08:00:00+05:30", "Shift A", &[("icu", r#"{"nurse":["Bob"]}"#)]),
                row("2026-03-01 08:00:00+05:30", "Shift A", &[("icu", r#"{"nurse":["Alice"]}"#)]),
            ],
            &LeaveSets::new(),
            &directory,
        );
        assert_eq!(names(&grid, Ward::Icu, Shift::A), ["Bob"]);
    }

    #[rstest]
    fn save_rows_parse_back_to_the_same_membership(directory: StaffDirectory) {
        let mut grid = AssignmentGrid::new();
        let leave = LeaveSets::new();
        grid.assign(
            Ward::Icu,
            Shift::A,
            [
                StaffRecord::new("Alice", StaffType::Nurse),
                StaffRecord::new("Ravi", StaffType::Rmo),
            ],
            &leave,
        );
        grid.assign(
            Ward::PrivateWard,
            Shift::C,
            [StaffRecord::new("Omar Said", StaffType::Ot)],
            &leave,
        );

        let rows: Vec<RosterRow> = build_save_rows(&grid, "2026-03-02 08:00:00+05:30")
            .expect("rows build")
            .into_iter()
            .map(RosterRow::from)
            .collect();
        let reparsed = parse_roster(&rows, &leave, &directory);

        assert_eq!(reparsed, grid);
    }
}
