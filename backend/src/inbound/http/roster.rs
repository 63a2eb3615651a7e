//! Roster board HTTP handlers.
//!
//! ```text
//! GET    /api/v1/roster
//! POST   /api/v1/roster/reload
//! POST   /api/v1/roster/assignments
//! DELETE /api/v1/roster/assignments
//! PUT    /api/v1/roster/selection
//! POST   /api/v1/roster/selection/assign
//! POST   /api/v1/roster/clear
//! POST   /api/v1/roster/save
//! GET    /api/v1/roster/backups/{file}
//! ```
//!
//! Every mutation answers with the notices it raised and the refreshed board.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Confirmation;
use crate::domain::ports::{BoardUpdate, BoardView, RemoveAssignmentRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{BoardUpdateSchema, BoardViewSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_shift, parse_staff_list, parse_ward,
};

const WARD: FieldName = FieldName::new("ward");
const SHIFT: FieldName = FieldName::new("shift");
const STAFF: FieldName = FieldName::new("staff");

/// A staff member as dragged onto the board.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct StaffEntry {
    #[schema(example = "Mary Jane")]
    pub name: String,
    /// `nurse`, `rmo` or `ot`.
    #[serde(rename = "type")]
    #[schema(example = "nurse")]
    pub staff_type: String,
}

fn staff_records(entries: &[StaffEntry]) -> ApiResult<Vec<roster::StaffRecord>> {
    parse_staff_list(
        entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.staff_type.as_str())),
        STAFF,
    )
}

/// Target cell of a drop.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CellRequest {
    #[schema(example = "ICU")]
    pub ward: String,
    #[schema(example = "Shift A")]
    pub shift: String,
}

/// Assign staff to one cell.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AssignRequest {
    #[schema(example = "ICU")]
    pub ward: String,
    #[schema(example = "Shift A")]
    pub shift: String,
    pub staff: Vec<StaffEntry>,
}

/// Remove one staff member from one cell.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveAssignmentBody {
    #[schema(example = "nurse_Mary_Jane")]
    pub staff_id: String,
    #[schema(example = "ICU")]
    pub ward: String,
    #[schema(example = "Shift A")]
    pub shift: String,
}

/// Replace the pending selection.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SelectionRequest {
    pub staff: Vec<StaffEntry>,
}

/// Answer to a destructive prompt.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema)]
pub struct ConfirmationRequest {
    pub confirmed: bool,
}

impl From<ConfirmationRequest> for Confirmation {
    fn from(value: ConfirmationRequest) -> Self {
        Confirmation::from(value.confirmed)
    }
}

/// Current roster board.
#[utoipa::path(
    get,
    path = "/api/v1/roster",
    responses((status = 200, description = "Roster board", body = BoardViewSchema)),
    tags = ["roster"],
    operation_id = "getRoster"
)]
#[get("/roster")]
pub async fn get_roster(state: web::Data<HttpState>) -> web::Json<BoardView> {
    web::Json(state.board.view().await)
}

/// Re-read today's leave, the staff list and the latest roster rows.
#[utoipa::path(
    post,
    path = "/api/v1/roster/reload",
    responses(
        (status = 200, description = "Reloaded board", body = BoardUpdateSchema),
        (status = 503, description = "Backend unavailable", body = ErrorSchema)
    ),
    tags = ["roster"],
    operation_id = "reloadRoster"
)]
#[post("/roster/reload")]
pub async fn reload_roster(state: web::Data<HttpState>) -> ApiResult<web::Json<BoardUpdate>> {
    Ok(web::Json(state.board.reload().await?))
}

/// Assign one or more staff to a cell.
#[utoipa::path(
    post,
    path = "/api/v1/roster/assignments",
    request_body = AssignRequest,
    responses(
        (status = 200, description = "Updated board", body = BoardUpdateSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["roster"],
    operation_id = "assignStaff"
)]
#[post("/roster/assignments")]
pub async fn assign_staff(
    state: web::Data<HttpState>,
    payload: web::Json<AssignRequest>,
) -> ApiResult<web::Json<BoardUpdate>> {
    let AssignRequest {
        ward,
        shift,
        staff,
    } = payload.into_inner();
    let ward = parse_ward(&ward, WARD)?;
    let shift = parse_shift(&shift, SHIFT)?;
    let staff = staff_records(&staff)?;
    Ok(web::Json(state.board.assign(ward, shift, staff).await?))
}

/// Remove one staff member from a cell.
#[utoipa::path(
    delete,
    path = "/api/v1/roster/assignments",
    request_body = RemoveAssignmentBody,
    responses(
        (status = 200, description = "Updated board", body = BoardUpdateSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not assigned to that cell", body = ErrorSchema)
    ),
    tags = ["roster"],
    operation_id = "removeAssignment"
)]
#[delete("/roster/assignments")]
pub async fn remove_assignment(
    state: web::Data<HttpState>,
    payload: web::Json<RemoveAssignmentBody>,
) -> ApiResult<web::Json<BoardUpdate>> {
    let RemoveAssignmentBody {
        staff_id,
        ward,
        shift,
    } = payload.into_inner();
    let request = RemoveAssignmentRequest {
        staff_id,
        ward: parse_ward(&ward, WARD)?,
        shift: parse_shift(&shift, SHIFT)?,
    };
    Ok(web::Json(state.board.remove_assignment(request).await?))
}

/// Replace the pending multi-selection.
#[utoipa::path(
    put,
    path = "/api/v1/roster/selection",
    request_body = SelectionRequest,
    responses(
        (status = 200, description = "Updated board", body = BoardUpdateSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["roster"],
    operation_id = "setSelection"
)]
#[put("/roster/selection")]
pub async fn set_selection(
    state: web::Data<HttpState>,
    payload: web::Json<SelectionRequest>,
) -> ApiResult<web::Json<BoardUpdate>> {
    let staff = staff_records(&payload.staff)?;
    Ok(web::Json(state.board.set_selection(staff).await?))
}

/// Assign the pending selection to a cell.
#[utoipa::path(
    post,
    path = "/api/v1/roster/selection/assign",
    request_body = CellRequest,
    responses(
        (status = 200, description = "Updated board", body = BoardUpdateSchema),
        (status = 400, description = "Nothing selected or invalid cell", body = ErrorSchema)
    ),
    tags = ["roster"],
    operation_id = "assignSelection"
)]
#[post("/roster/selection/assign")]
pub async fn assign_selection(
    state: web::Data<HttpState>,
    payload: web::Json<CellRequest>,
) -> ApiResult<web::Json<BoardUpdate>> {
    let ward = parse_ward(&payload.ward, WARD)?;
    let shift = parse_shift(&payload.shift, SHIFT)?;
    Ok(web::Json(state.board.assign_selection(ward, shift).await?))
}

/// Empty every cell once confirmed.
#[utoipa::path(
    post,
    path = "/api/v1/roster/clear",
    request_body = ConfirmationRequest,
    responses((status = 200, description = "Updated board", body = BoardUpdateSchema)),
    tags = ["roster"],
    operation_id = "clearRoster"
)]
#[post("/roster/clear")]
pub async fn clear_roster(
    state: web::Data<HttpState>,
    payload: web::Json<ConfirmationRequest>,
) -> ApiResult<web::Json<BoardUpdate>> {
    let confirmation = Confirmation::from(payload.into_inner());
    Ok(web::Json(state.board.clear_assignments(confirmation).await?))
}

/// Append the leave-filtered grid to the roster table.
#[utoipa::path(
    post,
    path = "/api/v1/roster/save",
    responses(
        (status = 200, description = "Saved and reloaded board", body = BoardUpdateSchema),
        (
            status = 503,
            description = "Save failed; details name the persisted shifts and the backup file",
            body = ErrorSchema
        )
    ),
    tags = ["roster"],
    operation_id = "saveRoster"
)]
#[post("/roster/save")]
pub async fn save_roster(state: web::Data<HttpState>) -> ApiResult<web::Json<BoardUpdate>> {
    Ok(web::Json(state.board.save().await?))
}

/// Download a backup written by a failed save.
#[utoipa::path(
    get,
    path = "/api/v1/roster/backups/{file}",
    params(("file" = String, Path, description = "Backup file name from a failed save")),
    responses(
        (status = 200, description = "Backup snapshot", content_type = "application/json"),
        (status = 400, description = "Not a backup file name", body = ErrorSchema),
        (status = 404, description = "No such backup", body = ErrorSchema)
    ),
    tags = ["roster"],
    operation_id = "getRosterBackup"
)]
#[get("/roster/backups/{file}")]
pub async fn get_backup(
    state: web::Data<HttpState>,
    file: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let bytes = state.board.backup(file.into_inner()).await?;
    Ok(HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .content_type("application/json")
        .body(bytes))
}

#[cfg(test)]
#[path = "roster_tests.rs"]
mod tests;
