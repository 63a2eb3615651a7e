//! Port for the `all_staff` master table.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{StaffDraft, StaffMember};

define_port_error! {
    /// Errors raised by staff repository adapters.
    pub enum StaffRepositoryError {
        /// The backend could not be reached.
        Connection { message: String } =>
            service_unavailable("staff repository unavailable: {message}"),
        /// The backend rejected or failed the request.
        Query { message: String } => internal("staff repository error: {message}"),
        /// No row has the identifier.
        NotFound { id: i64 } => not_found("staff member {id} not found"),
    }
}

/// CRUD access to staff master rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StaffRepository: Send + Sync {
    /// Every staff member, ordered by identifier.
    async fn list(&self) -> Result<Vec<StaffMember>, StaffRepositoryError>;

    /// Insert a staff member and return the stored row.
    async fn create(&self, draft: &StaffDraft) -> Result<StaffMember, StaffRepositoryError>;

    /// Replace the editable fields of a row and return it.
    async fn update(&self, id: i64, draft: &StaffDraft) -> Result<StaffMember, StaffRepositoryError>;

    /// Delete a row.
    async fn delete(&self, id: i64) -> Result<(), StaffRepositoryError>;
}

/// Fixture implementation with no staff.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStaffRepository;

#[async_trait]
impl StaffRepository for FixtureStaffRepository {
    async fn list(&self) -> Result<Vec<StaffMember>, StaffRepositoryError> {
        Ok(Vec::new())
    }

    async fn create(&self, draft: &StaffDraft) -> Result<StaffMember, StaffRepositoryError> {
        Ok(StaffMember {
            id: 1,
            name: draft.name.clone(),
            designation: draft.designation.clone(),
            phone_number: draft.phone_number.clone(),
            email: draft.email.clone(),
            department: draft.department.clone(),
        })
    }

    async fn update(&self, id: i64, _draft: &StaffDraft) -> Result<StaffMember, StaffRepositoryError> {
        Err(StaffRepositoryError::not_found(id))
    }

    async fn delete(&self, id: i64) -> Result<(), StaffRepositoryError> {
        Err(StaffRepositoryError::not_found(id))
    }
}
