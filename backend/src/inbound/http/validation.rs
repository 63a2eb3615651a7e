//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies carry wards, shifts and staff categories as display
//! strings; these helpers turn them into roster types or an
//! `invalid_request` error naming the offending field.

use std::str::FromStr;

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, QueryPayloadError};
use roster::{Shift, StaffRecord, StaffType, Ward};
use serde_json::json;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidBody,
    UnknownWard,
    UnknownShift,
    UnknownStaffType,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::UnknownWard => "unknown_ward",
            ErrorCode::UnknownShift => "unknown_shift",
            ErrorCode::UnknownStaffType => "unknown_staff_type",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn unknown_value(field: FieldName, code: ErrorCode, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("unknown {field}: {value}")).with_details(json!({
        "field": field,
        "value": value,
        "code": code.as_str(),
    }))
}

fn parse_named<T: FromStr>(value: &str, field: FieldName, code: ErrorCode) -> Result<T, Error> {
    value
        .trim()
        .parse()
        .map_err(|_| unknown_value(field, code, value))
}

pub(crate) fn parse_ward(value: &str, field: FieldName) -> Result<Ward, Error> {
    parse_named(value, field, ErrorCode::UnknownWard)
}

pub(crate) fn parse_shift(value: &str, field: FieldName) -> Result<Shift, Error> {
    parse_named(value, field, ErrorCode::UnknownShift)
}

pub(crate) fn parse_staff_type(value: &str, field: FieldName) -> Result<StaffType, Error> {
    parse_named(value, field, ErrorCode::UnknownStaffType)
}

/// Convert `{name, type}` pairs into staff records, reporting the first bad index.
pub(crate) fn parse_staff_list<'a, I>(entries: I, field: FieldName) -> Result<Vec<StaffRecord>, Error>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    entries
        .into_iter()
        .enumerate()
        .map(|(index, (name, staff_type))| {
            let staff_type = staff_type.trim().parse::<StaffType>().map_err(|_| {
                Error::invalid_request(format!("unknown staff type: {staff_type}")).with_details(
                    json!({
                        "field": field.as_str(),
                        "index": index,
                        "value": staff_type,
                        "code": ErrorCode::UnknownStaffType.as_str(),
                    }),
                )
            })?;
            Ok(StaffRecord::new(name.trim(), staff_type))
        })
        .collect()
}

fn invalid_body(message: String) -> Error {
    Error::invalid_request(message)
        .with_details(json!({ "code": ErrorCode::InvalidBody.as_str() }))
}

/// `JsonConfig` error handler turning malformed bodies into domain errors.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    invalid_body(format!("invalid JSON body: {err}")).into()
}

/// `QueryConfig` error handler turning malformed query strings into domain errors.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    invalid_body(format!("invalid query string: {err}")).into()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode as DomainCode;

    const WARD: FieldName = FieldName::new("ward");

    #[rstest]
    #[case("ICU", Ward::Icu)]
    #[case(" Private Ward ", Ward::PrivateWard)]
    fn wards_parse_from_display_names(#[case] raw: &str, #[case] expected: Ward) {
        assert_eq!(parse_ward(raw, WARD).expect("known ward"), expected);
    }

    #[test]
    fn unknown_wards_name_the_field() {
        let error = parse_ward("Burns Unit", WARD).expect_err("unknown ward");
        assert_eq!(error.code(), DomainCode::InvalidRequest);
        assert_eq!(
            error.details(),
            Some(&json!({
                "field": "ward",
                "value": "Burns Unit",
                "code": "unknown_ward",
            }))
        );
    }

    #[test]
    fn staff_lists_report_the_failing_index() {
        let error = parse_staff_list(
            [("Alice", "nurse"), ("Bob", "porter")],
            FieldName::new("staff"),
        )
        .expect_err("porter is not a category");
        let details = error.details().expect("details");
        assert_eq!(details["index"], 1);
        assert_eq!(details["code"], "unknown_staff_type");
    }

    #[test]
    fn staff_lists_trim_names() {
        let staff = parse_staff_list([(" Ravi ", "rmo")], FieldName::new("staff"))
            .expect("valid staff");
        assert_eq!(staff, [StaffRecord::new("Ravi", StaffType::Rmo)]);
    }
}
