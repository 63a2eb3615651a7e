//! Port for the append-only `roster` table.

use async_trait::async_trait;
use roster::{RosterRow, RosterSaveRow};

use super::define_port_error;

define_port_error! {
    /// Errors raised by roster repository adapters.
    pub enum RosterRepositoryError {
        /// The backend could not be reached.
        Connection { message: String } =>
            service_unavailable("roster repository unavailable: {message}"),
        /// The backend rejected or failed the request.
        Query { message: String } => internal("roster repository error: {message}"),
    }
}

/// Reads recent roster rows and appends new ones.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Up to `limit` rows, most recent first.
    async fn recent_rows(&self, limit: usize) -> Result<Vec<RosterRow>, RosterRepositoryError>;

    /// Append one row. Rows are never updated.
    async fn insert_row(&self, row: &RosterSaveRow) -> Result<(), RosterRepositoryError>;
}

/// Fixture implementation with an empty history that discards inserts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRosterRepository;

#[async_trait]
impl RosterRepository for FixtureRosterRepository {
    async fn recent_rows(&self, _limit: usize) -> Result<Vec<RosterRow>, RosterRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert_row(&self, _row: &RosterSaveRow) -> Result<(), RosterRepositoryError> {
        Ok(())
    }
}
