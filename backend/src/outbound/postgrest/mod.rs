//! PostgREST outbound adapters.
//!
//! One shared [`PostgrestClient`] talks to the hosted backend; each
//! repository adapter maps one port onto its table(s).

mod client;
mod dto;
mod leave_repository;
mod patient_repository;
mod roster_repository;
mod staff_repository;
mod task_repository;

pub use client::{Filter, PostgrestClient, PostgrestClientError, PostgrestError, Select};
pub use leave_repository::PostgrestLeaveRepository;
pub use patient_repository::PostgrestPatientRepository;
pub use roster_repository::PostgrestRosterRepository;
pub use staff_repository::PostgrestStaffRepository;
pub use task_repository::PostgrestTaskRepository;

use crate::domain::ports::{
    LeaveRepositoryError, PatientRepositoryError, RosterRepositoryError, StaffRepositoryError,
    TaskRepositoryError,
};

macro_rules! impl_from_postgrest_error {
    ($($port_error:ty),* $(,)?) => {
        $(
            impl From<PostgrestError> for $port_error {
                fn from(error: PostgrestError) -> Self {
                    if error.is_connection() {
                        Self::connection(error.to_string())
                    } else {
                        Self::query(error.to_string())
                    }
                }
            }
        )*
    };
}

impl_from_postgrest_error!(
    LeaveRepositoryError,
    PatientRepositoryError,
    RosterRepositoryError,
    StaffRepositoryError,
    TaskRepositoryError,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_backends_are_connection_errors() {
        let error = RosterRepositoryError::from(PostgrestError::Unavailable {
            message: "status 503".to_owned(),
        });
        assert!(matches!(error, RosterRepositoryError::Connection { .. }));
    }

    #[test]
    fn rejected_requests_are_query_errors() {
        let error = LeaveRepositoryError::from(PostgrestError::Rejected {
            status: 400,
            message: "status 400".to_owned(),
        });
        assert_eq!(
            error,
            LeaveRepositoryError::query("backend rejected the request: status 400")
        );
    }
}
