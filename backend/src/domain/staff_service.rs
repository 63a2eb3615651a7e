//! Staff administration service implementing the [`StaffAdmin`] port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{StaffAdmin, StaffRepository};
use crate::domain::{Error, StaffDraft, StaffMember};

/// CRUD over the staff master table.
///
/// Drafts arrive already validated; see [`StaffDraft::try_new`].
#[derive(Clone)]
pub struct StaffAdminService {
    repo: Arc<dyn StaffRepository>,
}

impl StaffAdminService {
    /// Create a service over the given repository.
    pub fn new(repo: Arc<dyn StaffRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl StaffAdmin for StaffAdminService {
    async fn list(&self) -> Result<Vec<StaffMember>, Error> {
        let mut members = self.repo.list().await?;
        members.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(members)
    }

    async fn create(&self, draft: StaffDraft) -> Result<StaffMember, Error> {
        let created = self.repo.create(&draft).await?;
        info!(id = created.id, designation = %created.designation, "staff member created");
        Ok(created)
    }

    async fn update(&self, id: i64, draft: StaffDraft) -> Result<StaffMember, Error> {
        let updated = self
            .repo
            .update(id, &draft)
            .await?;
        info!(id, "staff member updated");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), Error> {
        self.repo.delete(id).await?;
        info!(id, "staff member deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockStaffRepository, StaffRepositoryError};

    fn member(id: i64, name: &str) -> StaffMember {
        StaffMember {
            id,
            name: name.to_owned(),
            designation: "Staff Nurse".to_owned(),
            phone_number: None,
            email: None,
            department: None,
        }
    }

    fn draft() -> StaffDraft {
        StaffDraft::try_new("Priya", "Staff Nurse", None, None, Some("Surgery")).expect("valid draft")
    }

    #[tokio::test]
    async fn list_is_sorted_by_name() {
        let mut repo = MockStaffRepository::new();
        repo.expect_list()
            .return_once(|| Ok(vec![member(2, "Zara"), member(1, "Anil")]));
        let service = StaffAdminService::new(Arc::new(repo));

        let names: Vec<String> = service
            .list()
            .await
            .expect("list succeeds")
            .into_iter()
            .map(|member| member.name)
            .collect();
        assert_eq!(names, ["Anil", "Zara"]);
    }

    #[tokio::test]
    async fn create_passes_the_draft_through() {
        let mut repo = MockStaffRepository::new();
        repo.expect_create()
            .withf(|sent| sent.name == "Priya" && sent.department.as_deref() == Some("Surgery"))
            .times(1)
            .return_once(|_| Ok(member(7, "Priya")));
        let service = StaffAdminService::new(Arc::new(repo));

        let created = service.create(draft()).await.expect("create succeeds");
        assert_eq!(created.id, 7);
    }

    #[rstest]
    #[case(StaffRepositoryError::not_found(9_i64), ErrorCode::NotFound)]
    #[case(StaffRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(StaffRepositoryError::query("bad column"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn update_maps_repository_errors(
        #[case] failure: StaffRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockStaffRepository::new();
        repo.expect_update().return_once(move |_, _| Err(failure));
        let service = StaffAdminService::new(Arc::new(repo));

        let error = service.update(9, draft()).await.expect_err("update fails");
        assert_eq!(error.code(), expected);
    }

    #[tokio::test]
    async fn delete_reports_missing_rows() {
        let mut repo = MockStaffRepository::new();
        repo.expect_delete()
            .withf(|id| *id == 4)
            .return_once(|id| Err(StaffRepositoryError::not_found(id)));
        let service = StaffAdminService::new(Arc::new(repo));

        let error = service.delete(4).await.expect_err("delete fails");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
