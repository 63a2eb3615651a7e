//! Domain primitives, services and ports.
//!
//! Purpose: hold the roster board session, today's leave, staff
//! administration, the patient overview and task assignment. Nothing here
//! knows about HTTP or the storage backend; adapters reach the domain through
//! [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - RosterSession: single-writer board state.
//! - RosterBoardService, StaffAdminService, PatientOverviewService,
//!   TaskAssignmentService: driving port implementations.

pub mod error;
mod leave_registry;
mod notice;
mod patient_overview;
pub mod ports;
mod roster_board_service;
mod roster_clock;
mod roster_session;
mod staff;
mod staff_service;
mod task_assignment;
mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::leave_registry::{LeaveChange, LeaveRegistry};
pub use self::notice::{Confirmation, Notice, NoticeLevel};
pub use self::patient_overview::PatientOverviewService;
pub use self::roster_board_service::RosterBoardService;
pub use self::roster_clock::{DEFAULT_UTC_OFFSET_MINUTES, RosterClock};
pub use self::roster_session::{DEFAULT_ROSTER_WINDOW, RosterPorts, RosterSession};
pub use self::staff::{StaffDraft, StaffMember, classify_designation, directory_from_members};
pub use self::staff_service::StaffAdminService;
pub use self::task_assignment::TaskAssignmentService;
pub use self::trace_id::{REQUEST_ID_HEADER, TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use ward_ops::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("no such roster backup"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
