//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use ward_ops::Trace;
#[cfg(debug_assertions)]
use ward_ops::doc::ApiDoc;
use ward_ops::inbound::http::health::{HealthState, live, ready};
use ward_ops::inbound::http::leave::{add_leave, clear_leave, get_leave, remove_leave};
use ward_ops::inbound::http::patients::patient_overview;
use ward_ops::inbound::http::roster::{
    assign_selection, assign_staff, clear_roster, get_backup, get_roster, reload_roster,
    remove_assignment, save_roster, set_selection,
};
use ward_ops::inbound::http::staff::{create_staff, delete_staff, list_staff, update_staff};
use ward_ops::inbound::http::state::HttpState;
use ward_ops::inbound::http::tasks::{assign_tasks, predefined_tasks};
use ward_ops::inbound::http::validation::{json_error_handler, query_error_handler};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api/v1")
        .service(get_roster)
        .service(reload_roster)
        .service(assign_staff)
        .service(remove_assignment)
        .service(set_selection)
        .service(assign_selection)
        .service(clear_roster)
        .service(save_roster)
        .service(get_backup)
        .service(get_leave)
        .service(add_leave)
        .service(remove_leave)
        .service(clear_leave)
        .service(list_staff)
        .service(create_staff)
        .service(update_staff)
        .service(delete_staff)
        .service(patient_overview)
        .service(predefined_tasks)
        .service(assign_tasks);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Adapters and services are built and the roster is loaded before the
/// listener binds; readiness is flagged once the server is constructed.
///
/// # Errors
/// Propagates [`std::io::Error`] when building the state, binding the socket
/// or starting the server fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config).await?;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(config.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}
