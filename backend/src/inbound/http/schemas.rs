//! OpenAPI schema definitions for domain types.
//!
//! Domain types and the roster crate remain framework-agnostic by not
//! deriving `ToSchema`. The wrappers here mirror their serialised shape and
//! are registered through utoipa's external schema support.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with current state.
    #[schema(rename = "conflict")]
    Conflict,
    /// The storage backend could not complete the request.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "service_unavailable")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Roster save failed after 1 of 3 shifts")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details, e.g. `field` for validation failures or
    /// `persistedShifts` and `backupFile` for failed saves.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::NoticeLevel`].
#[derive(ToSchema)]
#[schema(as = crate::domain::NoticeLevel)]
pub enum NoticeLevelSchema {
    /// The operation succeeded.
    #[schema(rename = "success")]
    Success,
    /// Informational, nothing changed or nothing went wrong.
    #[schema(rename = "info")]
    Info,
    /// The operation went through with side effects worth flagging.
    #[schema(rename = "warning")]
    Warning,
}

/// OpenAPI schema for [`crate::domain::Notice`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Notice)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct NoticeSchema {
    level: NoticeLevelSchema,
    #[schema(example = "Assigned Alice to ICU, Shift A")]
    message: String,
}

/// OpenAPI schema for `roster::StaffRecord`.
#[derive(ToSchema)]
#[schema(as = roster::StaffRecord)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StaffRecordSchema {
    /// Derived identifier, `{type}_{name}` with whitespace as underscores.
    #[schema(example = "nurse_Mary_Jane")]
    id: String,
    #[schema(example = "Mary Jane")]
    name: String,
    /// `nurse`, `rmo` or `ot`.
    #[schema(rename = "type", example = "nurse")]
    staff_type: String,
}

/// OpenAPI schema for [`crate::domain::ports::BoardView`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::BoardView)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct BoardViewSchema {
    /// Day the leave sets apply to.
    #[schema(example = "2026-03-02")]
    date: String,
    /// Ward name → shift name → assigned staff.
    #[schema(value_type = Object)]
    grid: serde_json::Value,
    /// Pending multi-selection.
    selection: Vec<StaffRecordSchema>,
    /// Names on leave per category: `{nurse, rmo, ot}`.
    #[schema(value_type = Object)]
    leave: serde_json::Value,
    /// Rosterable names per category: `{nurses, rmos, otStaff}`.
    #[schema(value_type = Object)]
    directory: serde_json::Value,
    assignment_count: usize,
}

/// OpenAPI schema for [`crate::domain::ports::BoardUpdate`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::BoardUpdate)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct BoardUpdateSchema {
    notices: Vec<NoticeSchema>,
    board: BoardViewSchema,
}

/// OpenAPI schema for [`crate::domain::StaffMember`].
#[derive(ToSchema)]
#[schema(as = crate::domain::StaffMember)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StaffMemberSchema {
    id: i64,
    #[schema(example = "Priya Nair")]
    name: String,
    #[schema(example = "Staff Nurse")]
    designation: String,
    phone_number: Option<String>,
    email: Option<String>,
    department: Option<String>,
}

/// OpenAPI schema for [`crate::domain::ports::PatientOverviewRow`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::PatientOverviewRow)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PatientOverviewRowSchema {
    admission_number: String,
    patient_name: String,
    ipd_number: Option<String>,
    ward: Option<String>,
    bed_number: Option<String>,
    consultant: Option<String>,
    admission_date: Option<String>,
    discharged: bool,
    ot_procedure: Option<String>,
    ot_date: Option<String>,
    pending_tasks: usize,
}

/// OpenAPI schema for [`crate::domain::ports::OverviewSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::OverviewSummary)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct OverviewSummarySchema {
    admitted: usize,
    inpatients: usize,
    discharged: usize,
    in_ot: usize,
    pending_tasks: usize,
}

/// OpenAPI schema for [`crate::domain::ports::PatientOverview`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::PatientOverview)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PatientOverviewSchema {
    patients: Vec<PatientOverviewRowSchema>,
    summary: OverviewSummarySchema,
}

/// OpenAPI schema for [`crate::domain::ports::PredefinedTask`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::PredefinedTask)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PredefinedTaskSchema {
    id: i64,
    #[schema(example = "Check vitals")]
    task: String,
    #[schema(example = "nurse")]
    staff_type: String,
}

/// OpenAPI schema for [`crate::domain::ports::TaskAssignmentReceipt`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::TaskAssignmentReceipt)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TaskAssignmentReceiptSchema {
    /// Rows written, one per patient and task.
    inserted: usize,
}
