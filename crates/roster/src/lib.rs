//! Ward roster core.
//!
//! The roster board assigns nurses, RMOs and OT staff to six wards across
//! three daily shifts. This crate holds the I/O-free part of that board:
//!
//! - the fixed ward and shift layout, and the ward → column mapping
//! - staff identities and the staff directory used for legacy inference
//! - leave sets and the assignment grid with its invariants
//! - the per-ward cell codec (structured JSON with a legacy fallback)
//! - selection of the newest persisted row per shift, parsing rows into a
//!   grid, and building the rows appended on save
//!
//! # Example
//!
//! ```
//! use roster::{
//!     AssignmentGrid, LeaveSets, RosterRow, Shift, StaffDirectory, StaffRecord, StaffType,
//!     Ward, build_save_rows, parse_roster,
//! };
//!
//! let mut grid = AssignmentGrid::new();
//! let leave = LeaveSets::new();
//! grid.assign(Ward::Icu, Shift::A, [StaffRecord::new("Alice", StaffType::Nurse)], &leave);
//!
//! let rows: Vec<RosterRow> = build_save_rows(&grid, "2026-03-02 08:00:00+05:30")
//!     .expect("cells encode")
//!     .into_iter()
//!     .map(RosterRow::from)
//!     .collect();
//! let reloaded = parse_roster(&rows, &leave, &StaffDirectory::new());
//!
//! assert_eq!(reloaded, grid);
//! ```

mod cell;
mod error;
mod grid;
mod layout;
mod leave;
mod parser;
mod rows;
mod staff;

pub use cell::{CellContents, WardCellPayload, decode_legacy};
pub use error::RosterError;
pub use grid::{AssignOutcome, AssignmentGrid};
pub use layout::{Shift, Ward, ward_column};
pub use leave::LeaveSets;
pub use parser::{parse_latest, parse_roster};
pub use rows::{
    RosterRow, RosterSaveRow, TIMESTAMP_FORMAT, build_save_rows, format_timestamp,
    latest_per_shift, parse_timestamp,
};
pub use staff::{StaffDirectory, StaffRecord, StaffType, staff_id};
