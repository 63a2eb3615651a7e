//! Task assignment HTTP handlers.
//!
//! ```text
//! GET  /api/v1/tasks/predefined?staffType=nurse
//! POST /api/v1/tasks/assignments
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{PredefinedTask, TaskAssignmentRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    ErrorSchema, PredefinedTaskSchema, TaskAssignmentReceiptSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_staff_type};

const STAFF_TYPE: FieldName = FieldName::new("staffType");

/// Category filter for predefined tasks.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct PredefinedQuery {
    /// `nurse` or `rmo`.
    pub staff_type: String,
}

/// Bulk task assignment form.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskAssignmentBody {
    #[schema(example = "nurse")]
    pub staff_type: String,
    #[schema(example = "Alice")]
    pub assignee: String,
    pub admission_numbers: Vec<String>,
    pub tasks: Vec<String>,
    #[schema(example = "Shift B")]
    pub shift: String,
    #[schema(example = "2026-03-02")]
    pub start_date: String,
}

/// Predefined tasks offered to a category.
#[utoipa::path(
    get,
    path = "/api/v1/tasks/predefined",
    params(PredefinedQuery),
    responses(
        (status = 200, description = "Predefined tasks", body = [PredefinedTaskSchema]),
        (status = 400, description = "Unknown or unsupported category", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "listPredefinedTasks"
)]
#[get("/tasks/predefined")]
pub async fn predefined_tasks(
    state: web::Data<HttpState>,
    query: web::Query<PredefinedQuery>,
) -> ApiResult<web::Json<Vec<PredefinedTask>>> {
    let staff_type = parse_staff_type(&query.staff_type, STAFF_TYPE)?;
    Ok(web::Json(state.tasks.predefined(staff_type).await?))
}

/// Assign tasks to patients, one row per patient and task.
#[utoipa::path(
    post,
    path = "/api/v1/tasks/assignments",
    request_body = TaskAssignmentBody,
    responses(
        (status = 201, description = "Rows written", body = TaskAssignmentReceiptSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (
            status = 503,
            description = "Stopped at the first failed insert; details carry the count written",
            body = ErrorSchema
        )
    ),
    tags = ["tasks"],
    operation_id = "assignTasks"
)]
#[post("/tasks/assignments")]
pub async fn assign_tasks(
    state: web::Data<HttpState>,
    payload: web::Json<TaskAssignmentBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let request = TaskAssignmentRequest {
        staff_type: parse_staff_type(&body.staff_type, STAFF_TYPE)?,
        assignee: body.assignee,
        admission_numbers: body.admission_numbers,
        tasks: body.tasks,
        shift: body.shift,
        start_date: body.start_date,
    };
    let receipt = state.tasks.assign(request).await?;
    Ok(HttpResponse::Created().json(receipt))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use roster::StaffType;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::TaskAssignmentReceipt;
    use crate::inbound::http::test_utils::TestPorts;
    use crate::inbound::http::validation::query_error_handler;

    async fn call(ports: TestPorts, req: actix_test::TestRequest) -> actix_web::dev::ServiceResponse {
        let app = actix_test::init_service(
            App::new()
                .app_data(ports.into_state())
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .service(
                    web::scope("/api/v1")
                        .service(predefined_tasks)
                        .service(assign_tasks),
                ),
        )
        .await;
        actix_test::call_service(&app, req.to_request()).await
    }

    #[actix_web::test]
    async fn predefined_filters_by_category() {
        let mut ports = TestPorts::default();
        ports
            .tasks
            .expect_predefined()
            .withf(|staff_type| *staff_type == StaffType::Rmo)
            .return_once(|staff_type| {
                Ok(vec![PredefinedTask {
                    id: 3,
                    task: "Review labs".to_owned(),
                    staff_type,
                }])
            });

        let res = call(
            ports,
            actix_test::TestRequest::get().uri("/api/v1/tasks/predefined?staffType=rmo"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body[0]["task"], "Review labs");
        assert_eq!(body[0]["staffType"], "rmo");
    }

    #[actix_web::test]
    async fn missing_category_is_an_invalid_request() {
        let res = call(
            TestPorts::default(),
            actix_test::TestRequest::get().uri("/api/v1/tasks/predefined"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn assignment_forwards_the_form() {
        let mut ports = TestPorts::default();
        ports
            .tasks
            .expect_assign()
            .withf(|request| {
                request.staff_type == StaffType::Nurse
                    && request.admission_numbers == ["A-1", "A-2"]
                    && request.shift == "Shift B"
            })
            .return_once(|_| Ok(TaskAssignmentReceipt { inserted: 2 }));

        let res = call(
            ports,
            actix_test::TestRequest::post()
                .uri("/api/v1/tasks/assignments")
                .set_json(json!({
                    "staffType": "nurse",
                    "assignee": "Alice",
                    "admissionNumbers": ["A-1", "A-2"],
                    "tasks": ["Vitals"],
                    "shift": "Shift B",
                    "startDate": "2026-03-02",
                })),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["inserted"], 2);
    }
}
