//! Driving port for the staff master screen.

use async_trait::async_trait;

use crate::domain::{Error, StaffDraft, StaffMember};

/// Staff master use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StaffAdmin: Send + Sync {
    /// Every staff member.
    async fn list(&self) -> Result<Vec<StaffMember>, Error>;

    /// Create a staff member.
    async fn create(&self, draft: StaffDraft) -> Result<StaffMember, Error>;

    /// Update a staff member.
    async fn update(&self, id: i64, draft: StaffDraft) -> Result<StaffMember, Error>;

    /// Delete a staff member.
    async fn delete(&self, id: i64) -> Result<(), Error>;
}
