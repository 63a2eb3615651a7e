//! Staff master repository backed by the `all_staff` table.

use async_trait::async_trait;
use tracing::debug;

use super::client::{Filter, PostgrestClient, Select};
use super::dto::{StaffRowDto, StaffWriteDto};
use crate::domain::ports::{StaffRepository, StaffRepositoryError};
use crate::domain::{StaffDraft, StaffMember};

const TABLE: &str = "all_staff";

/// CRUD over staff master rows.
#[derive(Debug, Clone)]
pub struct PostgrestStaffRepository {
    client: PostgrestClient,
}

impl PostgrestStaffRepository {
    /// Wrap a shared client.
    #[must_use]
    pub const fn new(client: PostgrestClient) -> Self {
        Self { client }
    }
}

fn id_filter(id: i64) -> Filter {
    Filter::eq("id", id.to_string())
}

/// First usable row of a representation, or `None` when the write matched
/// nothing.
fn first_member(rows: Vec<StaffRowDto>) -> Option<StaffMember> {
    rows.into_iter().find_map(StaffRowDto::into_domain)
}

#[async_trait]
impl StaffRepository for PostgrestStaffRepository {
    async fn list(&self) -> Result<Vec<StaffMember>, StaffRepositoryError> {
        let rows: Vec<StaffRowDto> = self
            .client
            .select(TABLE, &Select::all().order_asc("id"))
            .await?;
        let total = rows.len();
        let members: Vec<_> = rows.into_iter().filter_map(StaffRowDto::into_domain).collect();
        if members.len() < total {
            debug!(skipped = total - members.len(), "ignored staff rows without a name");
        }
        Ok(members)
    }

    async fn create(&self, draft: &StaffDraft) -> Result<StaffMember, StaffRepositoryError> {
        let rows: Vec<StaffRowDto> = self
            .client
            .insert_returning(TABLE, &StaffWriteDto::from(draft))
            .await?;
        first_member(rows)
            .ok_or_else(|| StaffRepositoryError::query("insert returned no staff row"))
    }

    async fn update(&self, id: i64, draft: &StaffDraft) -> Result<StaffMember, StaffRepositoryError> {
        let rows: Vec<StaffRowDto> = self
            .client
            .update_returning(TABLE, &[id_filter(id)], &StaffWriteDto::from(draft))
            .await?;
        first_member(rows).ok_or_else(|| StaffRepositoryError::not_found(id))
    }

    async fn delete(&self, id: i64) -> Result<(), StaffRepositoryError> {
        let rows: Vec<StaffRowDto> = self
            .client
            .delete_returning(TABLE, &[id_filter(id)])
            .await?;
        if rows.is_empty() {
            return Err(StaffRepositoryError::not_found(id));
        }
        Ok(())
    }
}
