//! Append-only roster repository backed by the `roster` table.

use async_trait::async_trait;
use roster::{RosterRow, RosterSaveRow};

use super::client::{PostgrestClient, Select};
use crate::domain::ports::{RosterRepository, RosterRepositoryError};

const TABLE: &str = "roster";

/// Reads the newest roster rows and appends new ones.
#[derive(Debug, Clone)]
pub struct PostgrestRosterRepository {
    client: PostgrestClient,
}

impl PostgrestRosterRepository {
    /// Wrap a shared client.
    #[must_use]
    pub const fn new(client: PostgrestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RosterRepository for PostgrestRosterRepository {
    async fn recent_rows(&self, limit: usize) -> Result<Vec<RosterRow>, RosterRepositoryError> {
        let select = Select::all().order_desc("timestamp").limit(limit);
        Ok(self.client.select(TABLE, &select).await?)
    }

    async fn insert_row(&self, row: &RosterSaveRow) -> Result<(), RosterRepositoryError> {
        self.client.insert(TABLE, row).await?;
        Ok(())
    }
}
