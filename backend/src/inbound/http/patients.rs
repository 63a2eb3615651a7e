//! Patient overview HTTP handler.
//!
//! ```text
//! GET /api/v1/patients/overview?includeDischarged=true
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::ports::PatientOverview;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, PatientOverviewSchema};
use crate::inbound::http::state::HttpState;

/// Query parameters for the overview.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct OverviewQuery {
    /// List discharged patients as well; the summary always covers everyone.
    #[serde(default)]
    pub include_discharged: bool,
}

/// Patient dashboard correlated by admission number.
#[utoipa::path(
    get,
    path = "/api/v1/patients/overview",
    params(OverviewQuery),
    responses(
        (status = 200, description = "Patient overview", body = PatientOverviewSchema),
        (status = 503, description = "Backend unavailable", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "getPatientOverview"
)]
#[get("/patients/overview")]
pub async fn patient_overview(
    state: web::Data<HttpState>,
    query: web::Query<OverviewQuery>,
) -> ApiResult<web::Json<PatientOverview>> {
    let overview = state
        .patients
        .overview(query.into_inner().include_discharged)
        .await?;
    Ok(web::Json(overview))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::OverviewSummary;
    use crate::inbound::http::test_utils::TestPorts;

    #[rstest]
    #[case("/api/v1/patients/overview", false)]
    #[case("/api/v1/patients/overview?includeDischarged=true", true)]
    #[actix_web::test]
    async fn include_discharged_defaults_to_false(#[case] uri: &str, #[case] expected: bool) {
        let mut ports = TestPorts::default();
        ports
            .patients
            .expect_overview()
            .withf(move |include| *include == expected)
            .times(1)
            .return_once(|_| {
                Ok(PatientOverview {
                    patients: Vec::new(),
                    summary: OverviewSummary {
                        admitted: 4,
                        ..OverviewSummary::default()
                    },
                })
            });
        let app = actix_test::init_service(
            App::new()
                .app_data(ports.into_state())
                .service(web::scope("/api/v1").service(patient_overview)),
        )
        .await;

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["summary"]["admitted"], 4);
        assert_eq!(body["summary"]["inOt"], 0);
    }
}
