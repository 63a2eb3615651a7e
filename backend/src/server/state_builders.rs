//! Builders for the HTTP state: adapters, domain services and the initial
//! roster load.

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use ward_ops::domain::ports::{
    FixtureLeaveRepository, FixturePatientRepository, FixtureRosterRepository,
    FixtureStaffRepository, FixtureTaskRepository, LeaveRepository, PatientRepository,
    RosterBoard, RosterRepository, StaffRepository, TaskRepository,
};
use ward_ops::domain::{
    PatientOverviewService, RosterBoardService, RosterClock, RosterPorts, RosterSession,
    StaffAdminService, TaskAssignmentService,
};
use ward_ops::inbound::http::state::HttpState;
use ward_ops::outbound::backup::FsRosterBackupSink;
use ward_ops::outbound::postgrest::{
    PostgrestClient, PostgrestLeaveRepository, PostgrestPatientRepository,
    PostgrestRosterRepository, PostgrestStaffRepository, PostgrestTaskRepository,
};

use super::config::{BackendConfig, ServerConfig};

/// Driven ports backed either by the hosted backend or by fixtures.
struct Repositories {
    roster: Arc<dyn RosterRepository>,
    staff: Arc<dyn StaffRepository>,
    leave: Arc<dyn LeaveRepository>,
    patients: Arc<dyn PatientRepository>,
    tasks: Arc<dyn TaskRepository>,
}

impl Repositories {
    fn fixtures() -> Self {
        Self {
            roster: Arc::new(FixtureRosterRepository),
            staff: Arc::new(FixtureStaffRepository),
            leave: Arc::new(FixtureLeaveRepository),
            patients: Arc::new(FixturePatientRepository),
            tasks: Arc::new(FixtureTaskRepository),
        }
    }

    fn postgrest(backend: &BackendConfig) -> io::Result<Self> {
        let client = PostgrestClient::new(
            backend.url.clone(),
            backend.api_key.expose(),
            backend.timeout,
        )
        .map_err(io::Error::other)?;
        info!(
            backend = %backend.url,
            api_key = %backend.api_key.fingerprint(),
            "using PostgREST backend"
        );
        Ok(Self {
            roster: Arc::new(PostgrestRosterRepository::new(client.clone())),
            staff: Arc::new(PostgrestStaffRepository::new(client.clone())),
            leave: Arc::new(PostgrestLeaveRepository::new(client.clone())),
            patients: Arc::new(PostgrestPatientRepository::new(client.clone())),
            tasks: Arc::new(PostgrestTaskRepository::new(client)),
        })
    }
}

/// Build the shared HTTP state and load the current roster.
///
/// A failed initial load is logged and leaves an empty board; clients can
/// retry through the reload endpoint.
///
/// # Errors
/// Returns [`io::Error`] when the backend client, the backup directory or the
/// roster clock cannot be set up.
pub(super) async fn build_http_state(config: &ServerConfig) -> io::Result<web::Data<HttpState>> {
    let repositories = match &config.backend {
        Some(backend) => Repositories::postgrest(backend)?,
        None => {
            warn!("no backend configured; serving fixture data");
            Repositories::fixtures()
        }
    };

    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let backups = Arc::new(FsRosterBackupSink::open(&config.backup_dir, Arc::clone(&clock))?);
    let roster_clock = RosterClock::from_minutes(clock, config.utc_offset_minutes)
        .map_err(|err| io::Error::other(err.to_string()))?;

    let session = RosterSession::new(
        RosterPorts {
            roster: repositories.roster,
            staff: Arc::clone(&repositories.staff),
            leave: repositories.leave,
            backups: backups.clone(),
        },
        roster_clock,
        config.roster_window,
    );
    let board: Arc<dyn RosterBoard> = Arc::new(RosterBoardService::new(session, backups));
    if let Err(err) = board.reload().await {
        warn!(error = %err, "initial roster load failed");
    }

    Ok(web::Data::new(HttpState::new(
        board,
        Arc::new(StaffAdminService::new(repositories.staff)),
        Arc::new(PatientOverviewService::new(repositories.patients)),
        Arc::new(TaskAssignmentService::new(repositories.tasks)),
    )))
}
