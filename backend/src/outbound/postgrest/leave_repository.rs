//! Leave repository backed by the `leave` table.

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use super::client::{Filter, PostgrestClient, Select};
use super::dto::{LeaveInsertDto, LeaveRowDto};
use crate::domain::ports::{LeaveEntry, LeaveRepository, LeaveRepositoryError};

const TABLE: &str = "leave";

/// Leave entries keyed by staff name, category and date.
#[derive(Debug, Clone)]
pub struct PostgrestLeaveRepository {
    client: PostgrestClient,
}

impl PostgrestLeaveRepository {
    /// Wrap a shared client.
    #[must_use]
    pub const fn new(client: PostgrestClient) -> Self {
        Self { client }
    }
}

fn date_filter(date: NaiveDate) -> Filter {
    Filter::eq("leave_date", date.format("%Y-%m-%d").to_string())
}

#[async_trait]
impl LeaveRepository for PostgrestLeaveRepository {
    async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<LeaveEntry>, LeaveRepositoryError> {
        let rows: Vec<LeaveRowDto> = self
            .client
            .select(TABLE, &Select::all().filter(date_filter(date)))
            .await?;
        let total = rows.len();
        let entries: Vec<_> = rows.into_iter().filter_map(LeaveRowDto::into_domain).collect();
        if entries.len() < total {
            debug!(skipped = total - entries.len(), "ignored leave rows without a usable name or category");
        }
        Ok(entries)
    }

    async fn insert(&self, entry: &LeaveEntry) -> Result<(), LeaveRepositoryError> {
        self.client
            .insert(TABLE, &LeaveInsertDto::from(entry))
            .await?;
        Ok(())
    }

    async fn delete(&self, entry: &LeaveEntry) -> Result<(), LeaveRepositoryError> {
        let filters = [
            Filter::eq("staff_name", &entry.staff_name),
            Filter::eq("staff_type", entry.staff_type.as_str()),
            date_filter(entry.leave_date),
        ];
        self.client.delete(TABLE, &filters).await?;
        Ok(())
    }

    async fn delete_for_date(&self, date: NaiveDate) -> Result<(), LeaveRepositoryError> {
        self.client.delete(TABLE, &[date_filter(date)]).await?;
        Ok(())
    }
}
