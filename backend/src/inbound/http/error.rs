//! Domain errors as HTTP responses.
//!
//! The status follows the error code and every response echoes the trace id.
//! Internal errors reach the client as a bare message; their real text is
//! logged here under the same trace id. Backend outages keep their details,
//! because a failed roster save reports which shifts landed and where the
//! backup went.

use std::borrow::Cow;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

pub use crate::domain::ApiResult;

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn record(error: &Error) {
    let trace_id = error.trace_id().unwrap_or("-");
    match error.code() {
        ErrorCode::InternalError => {
            error!(trace_id, detail = error.message(), "request failed");
        }
        ErrorCode::ServiceUnavailable => {
            warn!(trace_id, detail = error.message(), "backend unavailable");
        }
        ErrorCode::InvalidRequest | ErrorCode::NotFound | ErrorCode::Conflict => {}
    }
}

/// What the client is allowed to see of `error`.
fn client_view(error: &Error) -> Cow<'_, Error> {
    if error.code() != ErrorCode::InternalError {
        return Cow::Borrowed(error);
    }
    let redacted = Error::internal(REDACTED_MESSAGE);
    Cow::Owned(match error.trace_id() {
        Some(id) => redacted.with_trace_id(id),
        None => redacted,
    })
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        record(self);
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(client_view(self).as_ref())
    }
}
