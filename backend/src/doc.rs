//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer together
//! with the schema wrappers from [`crate::inbound::http::schemas`], which
//! describe domain types without coupling them to utoipa. The document backs
//! Swagger UI in debug builds and is exported by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::leave::{LeaveRequest, LeaveResponse};
use crate::inbound::http::roster::{
    AssignRequest, CellRequest, ConfirmationRequest, RemoveAssignmentBody, SelectionRequest,
    StaffEntry,
};
use crate::inbound::http::schemas::{
    BoardUpdateSchema, BoardViewSchema, ErrorCodeSchema, ErrorSchema, NoticeLevelSchema,
    NoticeSchema, OverviewSummarySchema, PatientOverviewRowSchema, PatientOverviewSchema,
    PredefinedTaskSchema, StaffMemberSchema, StaffRecordSchema, TaskAssignmentReceiptSchema,
};
use crate::inbound::http::staff::StaffRequest;
use crate::inbound::http::tasks::TaskAssignmentBody;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ward operations API",
        description = "Ward roster board, leave registry, staff master, patient overview and task assignment."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::roster::get_roster,
        crate::inbound::http::roster::reload_roster,
        crate::inbound::http::roster::assign_staff,
        crate::inbound::http::roster::remove_assignment,
        crate::inbound::http::roster::set_selection,
        crate::inbound::http::roster::assign_selection,
        crate::inbound::http::roster::clear_roster,
        crate::inbound::http::roster::save_roster,
        crate::inbound::http::roster::get_backup,
        crate::inbound::http::leave::get_leave,
        crate::inbound::http::leave::add_leave,
        crate::inbound::http::leave::remove_leave,
        crate::inbound::http::leave::clear_leave,
        crate::inbound::http::staff::list_staff,
        crate::inbound::http::staff::create_staff,
        crate::inbound::http::staff::update_staff,
        crate::inbound::http::staff::delete_staff,
        crate::inbound::http::patients::patient_overview,
        crate::inbound::http::tasks::predefined_tasks,
        crate::inbound::http::tasks::assign_tasks,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        NoticeSchema,
        NoticeLevelSchema,
        StaffRecordSchema,
        BoardViewSchema,
        BoardUpdateSchema,
        StaffMemberSchema,
        PatientOverviewRowSchema,
        OverviewSummarySchema,
        PatientOverviewSchema,
        PredefinedTaskSchema,
        TaskAssignmentReceiptSchema,
        StaffEntry,
        CellRequest,
        AssignRequest,
        RemoveAssignmentBody,
        SelectionRequest,
        ConfirmationRequest,
        LeaveRequest,
        LeaveResponse,
        StaffRequest,
        TaskAssignmentBody,
    )),
    tags(
        (name = "roster", description = "Assignment board and save pipeline"),
        (name = "leave", description = "Today's leave registry"),
        (name = "staff", description = "Staff master records"),
        (name = "patients", description = "Patient overview dashboard"),
        (name = "tasks", description = "Predefined tasks and bulk assignment"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
