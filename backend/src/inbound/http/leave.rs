//! Leave registry HTTP handlers.
//!
//! ```text
//! GET    /api/v1/leave
//! POST   /api/v1/leave
//! DELETE /api/v1/leave
//! POST   /api/v1/leave/clear
//! ```
//!
//! Leave only ever applies to the current day in the roster's time zone.

use actix_web::{delete, get, post, web};
use chrono::NaiveDate;
use roster::LeaveSets;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Confirmation;
use crate::domain::ports::BoardUpdate;
use crate::inbound::http::ApiResult;
use crate::inbound::http::roster::ConfirmationRequest;
use crate::inbound::http::schemas::{BoardUpdateSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_staff_type};

/// A staff member to mark on or off leave.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LeaveRequest {
    #[schema(example = "Alice")]
    pub name: String,
    /// `nurse`, `rmo` or `ot`.
    #[serde(rename = "type")]
    #[schema(example = "nurse")]
    pub staff_type: String,
}

/// Today's leave.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaveResponse {
    #[schema(value_type = String, example = "2026-03-02")]
    pub date: NaiveDate,
    /// Names per category: `{nurse, rmo, ot}`.
    #[schema(value_type = Object)]
    pub leave: LeaveSets,
}

/// Today's leave, read from the backend; the board drops anyone listed.
#[utoipa::path(
    get,
    path = "/api/v1/leave",
    responses(
        (status = 200, description = "Today's leave", body = LeaveResponse),
        (status = 503, description = "Backend unavailable", body = ErrorSchema)
    ),
    tags = ["leave"],
    operation_id = "getLeave"
)]
#[get("/leave")]
pub async fn get_leave(state: web::Data<HttpState>) -> ApiResult<web::Json<LeaveResponse>> {
    let BoardUpdate { board, .. } = state.board.refresh_leave().await?;
    Ok(web::Json(LeaveResponse {
        date: board.date,
        leave: board.leave,
    }))
}

/// Mark a staff member on leave today; they leave the grid and selection.
#[utoipa::path(
    post,
    path = "/api/v1/leave",
    request_body = LeaveRequest,
    responses(
        (status = 200, description = "Updated board", body = BoardUpdateSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Backend unavailable", body = ErrorSchema)
    ),
    tags = ["leave"],
    operation_id = "addLeave"
)]
#[post("/leave")]
pub async fn add_leave(
    state: web::Data<HttpState>,
    payload: web::Json<LeaveRequest>,
) -> ApiResult<web::Json<BoardUpdate>> {
    let LeaveRequest { name, staff_type } = payload.into_inner();
    let staff_type = parse_staff_type(&staff_type, FieldName::new("type"))?;
    Ok(web::Json(state.board.add_leave(name, staff_type).await?))
}

/// Withdraw today's leave for a staff member.
#[utoipa::path(
    delete,
    path = "/api/v1/leave",
    request_body = LeaveRequest,
    responses(
        (status = 200, description = "Updated board", body = BoardUpdateSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Backend unavailable", body = ErrorSchema)
    ),
    tags = ["leave"],
    operation_id = "removeLeave"
)]
#[delete("/leave")]
pub async fn remove_leave(
    state: web::Data<HttpState>,
    payload: web::Json<LeaveRequest>,
) -> ApiResult<web::Json<BoardUpdate>> {
    let LeaveRequest { name, staff_type } = payload.into_inner();
    let staff_type = parse_staff_type(&staff_type, FieldName::new("type"))?;
    Ok(web::Json(state.board.remove_leave(name, staff_type).await?))
}

/// Withdraw all of today's leave once confirmed.
#[utoipa::path(
    post,
    path = "/api/v1/leave/clear",
    request_body = ConfirmationRequest,
    responses(
        (status = 200, description = "Updated board", body = BoardUpdateSchema),
        (status = 503, description = "Backend unavailable", body = ErrorSchema)
    ),
    tags = ["leave"],
    operation_id = "clearLeave"
)]
#[post("/leave/clear")]
pub async fn clear_leave(
    state: web::Data<HttpState>,
    payload: web::Json<ConfirmationRequest>,
) -> ApiResult<web::Json<BoardUpdate>> {
    let confirmation = Confirmation::from(payload.into_inner());
    Ok(web::Json(state.board.clear_leave(confirmation).await?))
}
