//! Roster board service implementing the [`RosterBoard`] driving port.
//!
//! The board is a single shared session guarded by an async mutex, so
//! concurrent requests observe and mutate one grid in arrival order. Leave
//! cached on an earlier day is re-read before any operation touches the
//! board.

use std::sync::Arc;

use async_trait::async_trait;
use roster::{Shift, StaffRecord, StaffType, Ward};
use tokio::sync::{Mutex, MutexGuard};
use tracing::warn;

use crate::domain::ports::{
    BoardUpdate, BoardView, RemoveAssignmentRequest, RosterBackupSink, RosterBoard,
};
use crate::domain::{Confirmation, Error, Notice, RosterSession};

/// Shared roster board.
pub struct RosterBoardService {
    session: Mutex<RosterSession>,
    backups: Arc<dyn RosterBackupSink>,
}

impl RosterBoardService {
    /// Wrap a session. The backup sink should be the one the session writes to.
    pub fn new(session: RosterSession, backups: Arc<dyn RosterBackupSink>) -> Self {
        Self {
            session: Mutex::new(session),
            backups,
        }
    }

    /// Lock the session, rolling leave over to today first.
    async fn current_day(&self) -> Result<(MutexGuard<'_, RosterSession>, Vec<Notice>), Error> {
        let mut session = self.session.lock().await;
        let notices = session.roll_over().await?;
        Ok((session, notices))
    }

    fn update(session: &RosterSession, notices: Vec<Notice>) -> BoardUpdate {
        BoardUpdate {
            notices,
            board: session.view(),
        }
    }
}

#[async_trait]
impl RosterBoard for RosterBoardService {
    async fn view(&self) -> BoardView {
        let mut session = self.session.lock().await;
        if let Err(error) = session.roll_over().await {
            warn!(%error, "leave for the new day could not be read; showing the cached day");
        }
        session.view()
    }

    async fn refresh_leave(&self) -> Result<BoardUpdate, Error> {
        let mut session = self.session.lock().await;
        let notices = session.refresh_leave().await?;
        Ok(Self::update(&session, notices))
    }

    async fn reload(&self) -> Result<BoardUpdate, Error> {
        let mut session = self.session.lock().await;
        let notices = session.load().await?;
        Ok(Self::update(&session, notices))
    }

    async fn assign(
        &self,
        ward: Ward,
        shift: Shift,
        staff: Vec<StaffRecord>,
    ) -> Result<BoardUpdate, Error> {
        let (mut session, mut notices) = self.current_day().await?;
        notices.extend(session.assign(ward, shift, staff)?);
        Ok(Self::update(&session, notices))
    }

    async fn remove_assignment(
        &self,
        request: RemoveAssignmentRequest,
    ) -> Result<BoardUpdate, Error> {
        let (mut session, mut notices) = self.current_day().await?;
        notices.extend(session.remove_assignment(&request.staff_id, request.ward, request.shift)?);
        Ok(Self::update(&session, notices))
    }

    async fn set_selection(&self, staff: Vec<StaffRecord>) -> Result<BoardUpdate, Error> {
        let (mut session, mut notices) = self.current_day().await?;
        notices.extend(session.set_selection(staff)?);
        Ok(Self::update(&session, notices))
    }

    async fn assign_selection(&self, ward: Ward, shift: Shift) -> Result<BoardUpdate, Error> {
        let (mut session, mut notices) = self.current_day().await?;
        notices.extend(session.assign_selection(ward, shift)?);
        Ok(Self::update(&session, notices))
    }

    async fn clear_assignments(&self, confirmation: Confirmation) -> Result<BoardUpdate, Error> {
        let (mut session, mut notices) = self.current_day().await?;
        notices.extend(session.clear_assignments(confirmation));
        Ok(Self::update(&session, notices))
    }

    async fn save(&self) -> Result<BoardUpdate, Error> {
        let (mut session, mut notices) = self.current_day().await?;
        notices.extend(session.save().await?);
        Ok(Self::update(&session, notices))
    }

    async fn add_leave(&self, name: String, staff_type: StaffType) -> Result<BoardUpdate, Error> {
        let (mut session, mut notices) = self.current_day().await?;
        notices.extend(session.add_leave(&name, staff_type).await?);
        Ok(Self::update(&session, notices))
    }

    async fn remove_leave(&self, name: String, staff_type: StaffType) -> Result<BoardUpdate, Error> {
        let (mut session, mut notices) = self.current_day().await?;
        notices.extend(session.remove_leave(&name, staff_type).await?);
        Ok(Self::update(&session, notices))
    }

    async fn clear_leave(&self, confirmation: Confirmation) -> Result<BoardUpdate, Error> {
        let (mut session, mut notices) = self.current_day().await?;
        notices.extend(session.clear_leave(confirmation).await?);
        Ok(Self::update(&session, notices))
    }

    async fn backup(&self, name: String) -> Result<Vec<u8>, Error> {
        self.backups
            .read(&name)
            .await?
            .ok_or_else(|| Error::not_found(format!("roster backup {name} not found")))
    }
}
