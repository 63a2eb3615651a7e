//! Ward operations backend: roster board, leave registry, staff master,
//! patient overview and task assignment over a hosted PostgREST backend.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
