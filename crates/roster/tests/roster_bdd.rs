//! Behavioural tests for roster parsing, leave sweeps and save validation.

// `expect` is idiomatic in test code for failing fast on precondition violations.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::collections::BTreeMap;

use roster::{
    AssignmentGrid, LeaveSets, RosterRow, RosterSaveRow, Shift, StaffDirectory, StaffType, Ward,
    build_save_rows, parse_roster,
};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::Value;

const SAVE_TIMESTAMP: &str = "2026-03-02 08:00:00+05:30";

/// Scenario world holding persisted rows, leave state and derived grids.
#[derive(Default, ScenarioState)]
struct World {
    leave: Slot<LeaveSets>,
    row: Slot<RosterRow>,
    grid: Slot<AssignmentGrid>,
    sweeps: Slot<(bool, bool)>,
    save_rows: Slot<Vec<RosterSaveRow>>,
}

impl World {
    fn leave(&self) -> LeaveSets {
        self.leave.get().expect("leave should be set")
    }

    fn grid(&self) -> AssignmentGrid {
        self.grid.get().expect("grid should be parsed")
    }

    fn icu_shift_a(&self) -> Vec<(StaffType, String)> {
        self.grid()
            .cell(Ward::Icu, Shift::A)
            .iter()
            .map(|record| (record.staff_type(), record.name().to_owned()))
            .collect()
    }
}

fn directory() -> StaffDirectory {
    [
        (StaffType::Nurse, "Alice".to_owned()),
        (StaffType::Nurse, "Bob".to_owned()),
    ]
    .into_iter()
    .collect()
}

fn icu_row(cell: &str) -> RosterRow {
    RosterRow {
        timestamp: SAVE_TIMESTAMP.to_owned(),
        shift: "Shift A".to_owned(),
        columns: BTreeMap::from([("icu".to_owned(), Value::String(cell.to_owned()))]),
    }
}

fn alice_on_leave() -> LeaveSets {
    [(StaffType::Nurse, "Alice".to_owned())].into_iter().collect()
}

#[fixture]
fn world() -> World {
    World::default()
}

// ============================================================================
// Given steps
// ============================================================================

#[given("Alice is a nurse on leave today")]
fn alice_is_on_leave(world: &World) {
    world.leave.set(alice_on_leave());
}

#[given("no staff are on leave")]
fn no_staff_on_leave(world: &World) {
    world.leave.set(LeaveSets::new());
}

#[given("a saved ICU Shift A cell listing nurses Alice and Bob")]
fn saved_cell_with_alice_and_bob(world: &World) {
    world
        .row
        .set(icu_row(r#"{"nurse":["Alice","Bob"],"rmo":[],"ot":[]}"#));
}

#[given("a saved ICU Shift A cell in the legacy format \"{cell}\"")]
fn saved_legacy_cell(world: &World, cell: String) {
    world.row.set(icu_row(&cell));
}

// ============================================================================
// When steps
// ============================================================================

#[when("the saved roster is parsed")]
fn the_saved_roster_is_parsed(world: &World) {
    let row = world.row.get().expect("row should be set");
    let grid = parse_roster([&row], &world.leave(), &directory());
    world.grid.set(grid);
}

#[when("Alice goes on leave and the grid is swept twice")]
fn alice_goes_on_leave_and_sweeps(world: &World) {
    let mut grid = world.grid();
    let leave = alice_on_leave();
    let first = grid.sweep_leave(&leave);
    let second = grid.sweep_leave(&leave);
    world.leave.set(leave);
    world.grid.set(grid);
    world.sweeps.set((first, second));
}

#[when("Alice goes on leave without a sweep")]
fn alice_goes_on_leave_without_sweep(world: &World) {
    world.leave.set(alice_on_leave());
}

#[when("the save rows are built from the validated grid")]
fn save_rows_are_built(world: &World) {
    let validated = world.grid().without_leave(&world.leave());
    let rows = build_save_rows(&validated, SAVE_TIMESTAMP).expect("rows build");
    world.save_rows.set(rows);
}

// ============================================================================
// Then steps
// ============================================================================

#[then("the ICU Shift A cell contains only Bob")]
fn cell_contains_only_bob(world: &World) {
    assert_eq!(world.icu_shift_a(), [(StaffType::Nurse, "Bob".to_owned())]);
}

#[then("the ICU Shift A cell holds nurse Alice then RMO Bob")]
fn cell_holds_alice_then_bob(world: &World) {
    assert_eq!(
        world.icu_shift_a(),
        [
            (StaffType::Nurse, "Alice".to_owned()),
            (StaffType::Rmo, "Bob".to_owned()),
        ]
    );
}

#[then("the ICU Shift A cell holds nurse Alice")]
fn cell_holds_alice(world: &World) {
    assert_eq!(world.icu_shift_a(), [(StaffType::Nurse, "Alice".to_owned())]);
}

#[then("the first sweep changed the grid and the second did not")]
fn first_sweep_only_changed(world: &World) {
    assert_eq!(world.sweeps.get(), Some((true, false)));
}

#[then("no save row mentions Alice")]
fn no_save_row_mentions_alice(world: &World) {
    let rows = world.save_rows.get().expect("save rows should be built");
    assert_eq!(rows.len(), 3);
    for row in rows {
        assert!(
            row.columns.values().all(|cell| !cell.contains("Alice")),
            "row for {} still lists Alice",
            row.shift
        );
    }
}

#[then("the in-memory grid still lists Alice")]
fn grid_still_lists_alice(world: &World) {
    assert!(world.grid().contains(Ward::Icu, Shift::A, "nurse_Alice"));
}

// ============================================================================
// Scenario bindings
// ============================================================================

#[scenario(
    path = "tests/features/roster_board.feature",
    name = "Staff on leave are excluded when a saved roster is parsed"
)]
fn staff_on_leave_are_excluded_when_parsed(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/roster_board.feature",
    name = "Prefixed legacy cells keep their declared types"
)]
fn prefixed_legacy_cells_keep_types(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/roster_board.feature",
    name = "Unprefixed legacy names are typed from the staff directory"
)]
fn unprefixed_legacy_names_are_inferred(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/roster_board.feature",
    name = "Sweeping leave twice changes nothing the second time"
)]
fn sweeping_leave_twice_is_idempotent(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/roster_board.feature",
    name = "Saving excludes staff who went on leave after loading"
)]
fn saving_excludes_late_leave(world: World) {
    let _ = world;
}
