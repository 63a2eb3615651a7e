//! Hospital staff members and their mapping onto roster staff types.

use roster::{StaffDirectory, StaffType};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::Error;

/// A row of the staff master table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    /// Backend identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Free-text designation, e.g. "Staff Nurse" or "RMO".
    pub designation: String,
    /// Contact number.
    pub phone_number: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Department.
    pub department: Option<String>,
}

impl StaffMember {
    /// Roster staff type implied by the designation, if any.
    #[must_use]
    pub fn staff_type(&self) -> Option<StaffType> {
        classify_designation(&self.designation)
    }
}

/// Map a designation onto a roster staff type.
///
/// RMO designations are checked first so "RMO (nursing liaison)" stays an
/// RMO. Designations matching none of the rules are excluded from the board.
///
/// # Examples
/// ```
/// use roster::StaffType;
/// use ward_ops::domain::classify_designation;
///
/// assert_eq!(classify_designation("Staff Nurse"), Some(StaffType::Nurse));
/// assert_eq!(classify_designation("Resident Medical Officer"), Some(StaffType::Rmo));
/// assert_eq!(classify_designation("OT Technician"), Some(StaffType::Ot));
/// assert_eq!(classify_designation("Pharmacist"), None);
/// ```
#[must_use]
pub fn classify_designation(designation: &str) -> Option<StaffType> {
    let normalised = designation.trim().to_lowercase();
    if normalised.contains("rmo") || normalised.contains("resident medical officer") {
        Some(StaffType::Rmo)
    } else if normalised.contains("nurse") || normalised == "sister" || normalised == "matron" {
        Some(StaffType::Nurse)
    } else if normalised == "ot"
        || normalised.starts_with("ot ")
        || normalised.contains("operation theatre")
    {
        Some(StaffType::Ot)
    } else {
        None
    }
}

/// Build the roster's staff directory from the staff master rows.
pub fn directory_from_members<'a, I>(members: I) -> StaffDirectory
where
    I: IntoIterator<Item = &'a StaffMember>,
{
    members
        .into_iter()
        .filter_map(|member| {
            member
                .staff_type()
                .map(|staff_type| (staff_type, member.name.trim().to_owned()))
        })
        .collect()
}

/// Validated input for creating or updating a staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffDraft {
    /// Display name, trimmed and non-empty.
    pub name: String,
    /// Designation, trimmed and non-empty.
    pub designation: String,
    /// Optional contact number.
    pub phone_number: Option<String>,
    /// Optional email with exactly one `@`.
    pub email: Option<String>,
    /// Optional department.
    pub department: Option<String>,
}

impl StaffDraft {
    /// Validate raw form fields.
    ///
    /// Blank optional fields become `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::invalid_request`] naming the offending field when the
    /// name or designation is blank or the email is malformed.
    pub fn try_new(
        name: &str,
        designation: &str,
        phone_number: Option<&str>,
        email: Option<&str>,
        department: Option<&str>,
    ) -> Result<Self, Error> {
        let name = required(name, "name")?;
        let designation = required(designation, "designation")?;
        let email = optional(email);
        if let Some(address) = email.as_deref() {
            if !is_valid_email(address) {
                return Err(field_error("email", "email address is invalid"));
            }
        }
        Ok(Self {
            name,
            designation,
            phone_number: optional(phone_number),
            email,
            department: optional(department),
        })
    }
}

fn required(value: &str, field: &str) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(field_error(field, &format!("{field} is required")));
    }
    Ok(trimmed.to_owned())
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_owned)
}

fn field_error(field: &str, message: &str) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field }))
}

fn is_valid_email(address: &str) -> bool {
    let mut parts = address.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !address.contains(char::is_whitespace)
        }
        _ => false,
    }
}
