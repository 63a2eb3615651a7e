//! Staff master HTTP handlers.
//!
//! ```text
//! GET    /api/v1/staff
//! POST   /api/v1/staff
//! PUT    /api/v1/staff/{id}
//! DELETE /api/v1/staff/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{StaffDraft, StaffMember};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, StaffMemberSchema};
use crate::inbound::http::state::HttpState;

/// Create or update payload for a staff member.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffRequest {
    #[schema(example = "Priya Nair")]
    pub name: String,
    #[schema(example = "Staff Nurse")]
    pub designation: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
}

impl TryFrom<StaffRequest> for StaffDraft {
    type Error = crate::domain::Error;

    fn try_from(value: StaffRequest) -> Result<Self, Self::Error> {
        StaffDraft::try_new(
            &value.name,
            &value.designation,
            value.phone_number.as_deref(),
            value.email.as_deref(),
            value.department.as_deref(),
        )
    }
}

/// Every staff member, sorted by name.
#[utoipa::path(
    get,
    path = "/api/v1/staff",
    responses(
        (status = 200, description = "Staff members", body = [StaffMemberSchema]),
        (status = 503, description = "Backend unavailable", body = ErrorSchema)
    ),
    tags = ["staff"],
    operation_id = "listStaff"
)]
#[get("/staff")]
pub async fn list_staff(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<StaffMember>>> {
    Ok(web::Json(state.staff.list().await?))
}

/// Add a staff member.
#[utoipa::path(
    post,
    path = "/api/v1/staff",
    request_body = StaffRequest,
    responses(
        (status = 201, description = "Created", body = StaffMemberSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["staff"],
    operation_id = "createStaff"
)]
#[post("/staff")]
pub async fn create_staff(
    state: web::Data<HttpState>,
    payload: web::Json<StaffRequest>,
) -> ApiResult<HttpResponse> {
    let draft = StaffDraft::try_from(payload.into_inner())?;
    let created = state.staff.create(draft).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Replace a staff member's details.
#[utoipa::path(
    put,
    path = "/api/v1/staff/{id}",
    params(("id" = i64, Path, description = "Staff identifier")),
    request_body = StaffRequest,
    responses(
        (status = 200, description = "Updated", body = StaffMemberSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "No such staff member", body = ErrorSchema)
    ),
    tags = ["staff"],
    operation_id = "updateStaff"
)]
#[put("/staff/{id}")]
pub async fn update_staff(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
    payload: web::Json<StaffRequest>,
) -> ApiResult<web::Json<StaffMember>> {
    let draft = StaffDraft::try_from(payload.into_inner())?;
    Ok(web::Json(state.staff.update(id.into_inner(), draft).await?))
}

/// Remove a staff member.
#[utoipa::path(
    delete,
    path = "/api/v1/staff/{id}",
    params(("id" = i64, Path, description = "Staff identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such staff member", body = ErrorSchema)
    ),
    tags = ["staff"],
    operation_id = "deleteStaff"
)]
#[delete("/staff/{id}")]
pub async fn delete_staff(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.staff.delete(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::Error;
    use crate::inbound::http::test_utils::TestPorts;

    fn member(id: i64) -> StaffMember {
        StaffMember {
            id,
            name: "Priya Nair".to_owned(),
            designation: "Staff Nurse".to_owned(),
            phone_number: None,
            email: Some("priya@example.org".to_owned()),
            department: None,
        }
    }

    async fn call(ports: TestPorts, req: actix_test::TestRequest) -> actix_web::dev::ServiceResponse {
        let app = actix_test::init_service(
            App::new().app_data(ports.into_state()).service(
                web::scope("/api/v1")
                    .service(list_staff)
                    .service(create_staff)
                    .service(update_staff)
                    .service(delete_staff),
            ),
        )
        .await;
        actix_test::call_service(&app, req.to_request()).await
    }

    #[actix_web::test]
    async fn create_returns_201_with_the_row() {
        let mut ports = TestPorts::default();
        ports
            .staff
            .expect_create()
            .withf(|draft| draft.name == "Priya Nair" && draft.email.is_some())
            .return_once(|_| Ok(member(12)));

        let res = call(
            ports,
            actix_test::TestRequest::post().uri("/api/v1/staff").set_json(json!({
                "name": " Priya Nair ",
                "designation": "Staff Nurse",
                "email": "priya@example.org",
            })),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["id"], 12);
        assert_eq!(body["phoneNumber"], Value::Null);
    }

    #[actix_web::test]
    async fn invalid_emails_never_reach_the_port() {
        let mut ports = TestPorts::default();
        ports.staff.expect_create().never();

        let res = call(
            ports,
            actix_test::TestRequest::post().uri("/api/v1/staff").set_json(json!({
                "name": "Priya Nair",
                "designation": "Staff Nurse",
                "email": "priya.example.org",
            })),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "email");
    }

    #[actix_web::test]
    async fn update_maps_missing_rows_to_404() {
        let mut ports = TestPorts::default();
        ports
            .staff
            .expect_update()
            .withf(|id, _| *id == 99)
            .return_once(|_, _| Err(Error::not_found("staff member 99 not found")));

        let res = call(
            ports,
            actix_test::TestRequest::put().uri("/api/v1/staff/99").set_json(json!({
                "name": "Priya Nair",
                "designation": "Sister",
            })),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn delete_answers_no_content() {
        let mut ports = TestPorts::default();
        ports
            .staff
            .expect_delete()
            .withf(|id| *id == 5)
            .return_once(|_| Ok(()));

        let res = call(ports, actix_test::TestRequest::delete().uri("/api/v1/staff/5")).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
}
