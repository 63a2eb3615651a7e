//! Today's leave, cached in front of the leave repository.

use std::sync::Arc;

use chrono::NaiveDate;
use roster::{LeaveSets, StaffType};
use serde_json::json;
use tracing::info;

use crate::domain::ports::{LeaveEntry, LeaveRepository};
use crate::domain::{Confirmation, Error, RosterClock};

/// Outcome of [`LeaveRegistry::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveChange {
    /// A new entry was inserted.
    Added,
    /// An identical entry already existed; nothing was written.
    AlreadyRecorded,
}

/// Leave registry for the current day.
///
/// The cache only changes after the backend accepted a write, so a failed
/// request leaves the cached sets untouched. The cache remembers the day it
/// was read for; once the roster's calendar day moves on it is stale until
/// fetched again.
pub struct LeaveRegistry {
    repo: Arc<dyn LeaveRepository>,
    clock: RosterClock,
    cache: LeaveSets,
    cached_for: Option<NaiveDate>,
}

impl LeaveRegistry {
    /// Create a registry with an empty cache.
    pub fn new(repo: Arc<dyn LeaveRepository>, clock: RosterClock) -> Self {
        Self {
            repo,
            clock,
            cache: LeaveSets::new(),
            cached_for: None,
        }
    }

    /// Cached leave sets.
    #[must_use]
    pub fn current(&self) -> &LeaveSets {
        &self.cache
    }

    /// Calendar day the registry works on.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Day the cached sets belong to; today before the first fetch.
    #[must_use]
    pub fn cached_day(&self) -> NaiveDate {
        self.cached_for.unwrap_or_else(|| self.today())
    }

    /// Whether the cache was filled on a day that has since ended.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.cached_for
            .is_some_and(|cached_for| cached_for != self.today())
    }

    async fn entries_for_date(&self, date: NaiveDate) -> Result<Vec<LeaveEntry>, Error> {
        self.repo
            .list_for_date(date)
            .await
            .map_err(Error::from)
    }

    /// Replace the cache with today's entries from the backend.
    ///
    /// # Errors
    ///
    /// Returns the mapped repository error; the cache is unchanged.
    pub async fn fetch_for_today(&mut self) -> Result<&LeaveSets, Error> {
        let today = self.today();
        let entries = self.entries_for_date(today).await?;
        self.cache = entries
            .into_iter()
            .map(|entry| (entry.staff_type, entry.staff_name))
            .collect();
        self.cached_for = Some(today);
        Ok(&self.cache)
    }

    /// Record a staff member on leave today unless already recorded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::invalid_request`] for a blank name, or the mapped
    /// repository error.
    pub async fn add(&mut self, name: &str, staff_type: StaffType) -> Result<LeaveChange, Error> {
        let entry = self.entry(name, staff_type)?;
        let existing = self.entries_for_date(entry.leave_date).await?;
        let change = if existing.contains(&entry) {
            LeaveChange::AlreadyRecorded
        } else {
            self.repo.insert(&entry).await?;
            info!(staff = %entry.staff_name, staff_type = %staff_type, date = %entry.leave_date, "leave recorded");
            LeaveChange::Added
        };
        let mut refreshed: LeaveSets = existing
            .into_iter()
            .map(|known| (known.staff_type, known.staff_name))
            .collect();
        refreshed.insert(staff_type, entry.staff_name);
        self.cache = refreshed;
        self.cached_for = Some(entry.leave_date);
        Ok(change)
    }

    /// Withdraw today's leave for a staff member.
    ///
    /// Returns whether the cache held the entry. A stale cache never does.
    ///
    /// # Errors
    ///
    /// Returns [`Error::invalid_request`] for a blank name, or the mapped
    /// repository error.
    pub async fn remove(&mut self, name: &str, staff_type: StaffType) -> Result<bool, Error> {
        let entry = self.entry(name, staff_type)?;
        self.repo.delete(&entry).await?;
        info!(staff = %entry.staff_name, staff_type = %staff_type, date = %entry.leave_date, "leave withdrawn");
        if self.is_stale() {
            return Ok(false);
        }
        Ok(self.cache.remove(staff_type, &entry.staff_name))
    }

    /// Withdraw every entry for today once confirmed.
    ///
    /// Returns `false` when the confirmation was declined.
    ///
    /// # Errors
    ///
    /// Returns the mapped repository error; the cache is unchanged.
    pub async fn clear_all(&mut self, confirmation: Confirmation) -> Result<bool, Error> {
        if !confirmation.is_confirmed() {
            return Ok(false);
        }
        let today = self.today();
        self.repo
            .delete_for_date(today)
            .await?;
        info!(date = %today, "leave cleared");
        self.cache.clear();
        self.cached_for = Some(today);
        Ok(true)
    }

    fn entry(&self, name: &str, staff_type: StaffType) -> Result<LeaveEntry, Error> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_request("staff name is required")
                .with_details(json!({ "field": "name" })));
        }
        Ok(LeaveEntry {
            staff_name: trimmed.to_owned(),
            staff_type,
            leave_date: self.today(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::{DateTime, TimeZone, Utc};
    use mockable::MockClock;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{LeaveRepositoryError, MockLeaveRepository};

    #[fixture]
    fn clock() -> RosterClock {
        let mut clock = MockClock::new();
        clock.expect_utc().returning(|| {
            Utc.with_ymd_and_hms(2026, 3, 2, 4, 0, 0)
                .single()
                .expect("valid instant")
        });
        RosterClock::from_minutes(Arc::new(clock), 330).expect("offset")
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
    }

    fn entry(name: &str, staff_type: StaffType) -> LeaveEntry {
        LeaveEntry {
            staff_name: name.to_owned(),
            staff_type,
            leave_date: today(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn fetch_partitions_by_type(clock: RosterClock) {
        let mut repo = MockLeaveRepository::new();
        repo.expect_list_for_date()
            .withf(|date| *date == today())
            .times(1)
            .return_once(|_| {
                Ok(vec![
                    entry("Alice", StaffType::Nurse),
                    entry("Ravi", StaffType::Rmo),
                ])
            });
        let mut registry = LeaveRegistry::new(Arc::new(repo), clock);

        let sets = registry.fetch_for_today().await.expect("fetch succeeds");
        assert!(sets.contains(StaffType::Nurse, "Alice"));
        assert!(sets.contains(StaffType::Rmo, "Ravi"));
        assert_eq!(sets.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn add_skips_insert_when_already_recorded(clock: RosterClock) {
        let mut repo = MockLeaveRepository::new();
        repo.expect_list_for_date()
            .return_once(|_| Ok(vec![entry("Alice", StaffType::Nurse)]));
        repo.expect_insert().never();
        let mut registry = LeaveRegistry::new(Arc::new(repo), clock);

        let change = registry
            .add(" Alice ", StaffType::Nurse)
            .await
            .expect("add succeeds");
        assert_eq!(change, LeaveChange::AlreadyRecorded);
        assert!(registry.current().contains(StaffType::Nurse, "Alice"));
    }

    #[rstest]
    #[tokio::test]
    async fn add_inserts_new_entries(clock: RosterClock) {
        let mut repo = MockLeaveRepository::new();
        repo.expect_list_for_date().return_once(|_| Ok(Vec::new()));
        repo.expect_insert()
            .withf(|inserted| *inserted == entry("Bob", StaffType::Ot))
            .times(1)
            .return_once(|_| Ok(()));
        let mut registry = LeaveRegistry::new(Arc::new(repo), clock);

        let change = registry.add("Bob", StaffType::Ot).await.expect("add succeeds");
        assert_eq!(change, LeaveChange::Added);
        assert!(registry.current().contains(StaffType::Ot, "Bob"));
    }

    #[rstest]
    #[tokio::test]
    async fn failed_insert_leaves_cache_untouched(clock: RosterClock) {
        let mut repo = MockLeaveRepository::new();
        repo.expect_list_for_date().return_once(|_| Ok(Vec::new()));
        repo.expect_insert()
            .return_once(|_| Err(LeaveRepositoryError::connection("refused")));
        let mut registry = LeaveRegistry::new(Arc::new(repo), clock);

        let error = registry
            .add("Bob", StaffType::Nurse)
            .await
            .expect_err("insert fails");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
        assert!(registry.current().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn blank_names_never_reach_the_backend(clock: RosterClock) {
        let repo = MockLeaveRepository::new();
        let mut registry = LeaveRegistry::new(Arc::new(repo), clock);
        let error = registry
            .add("   ", StaffType::Nurse)
            .await
            .expect_err("blank name");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn declined_clear_is_a_no_op(clock: RosterClock) {
        let mut repo = MockLeaveRepository::new();
        repo.expect_delete_for_date().never();
        let mut registry = LeaveRegistry::new(Arc::new(repo), clock);
        let cleared = registry
            .clear_all(Confirmation::Declined)
            .await
            .expect("declined clear succeeds");
        assert!(!cleared);
    }

    #[rstest]
    #[tokio::test]
    async fn confirmed_clear_resets_every_set(clock: RosterClock) {
        let mut repo = MockLeaveRepository::new();
        repo.expect_list_for_date()
            .return_once(|_| Ok(vec![entry("Alice", StaffType::Nurse)]));
        repo.expect_delete_for_date()
            .withf(|date| *date == today())
            .times(1)
            .return_once(|_| Ok(()));
        let mut registry = LeaveRegistry::new(Arc::new(repo), clock);
        registry.fetch_for_today().await.expect("fetch succeeds");

        let cleared = registry
            .clear_all(Confirmation::Confirmed)
            .await
            .expect("clear succeeds");
        assert!(cleared);
        assert!(registry.current().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn remove_deletes_and_updates_cache(clock: RosterClock) {
        let mut repo = MockLeaveRepository::new();
        repo.expect_list_for_date()
            .return_once(|_| Ok(vec![entry("Ravi", StaffType::Rmo)]));
        repo.expect_delete()
            .withf(|deleted| *deleted == entry("Ravi", StaffType::Rmo))
            .times(1)
            .return_once(|_| Ok(()));
        let mut registry = LeaveRegistry::new(Arc::new(repo), clock);
        registry.fetch_for_today().await.expect("fetch succeeds");

        let removed = registry
            .remove("Ravi", StaffType::Rmo)
            .await
            .expect("remove succeeds");
        assert!(removed);
        assert!(registry.current().is_empty());
    }

    #[tokio::test]
    async fn cache_goes_stale_after_midnight_in_the_roster_offset() {
        // 23:50 at +05:30 on 2 March.
        let now = Arc::new(Mutex::new(
            Utc.with_ymd_and_hms(2026, 3, 2, 18, 20, 0)
                .single()
                .expect("valid instant"),
        ));
        let mut mock = MockClock::new();
        let reader = Arc::clone(&now);
        mock.expect_utc()
            .returning(move || *reader.lock().expect("clock lock"));
        let clock = RosterClock::from_minutes(Arc::new(mock), 330).expect("offset");

        let tomorrow = NaiveDate::from_ymd_opt(2026, 3, 3).expect("valid date");
        let mut repo = MockLeaveRepository::new();
        repo.expect_list_for_date()
            .withf(|date| *date == today())
            .times(1)
            .return_once(|_| Ok(vec![entry("Alice", StaffType::Nurse)]));
        repo.expect_list_for_date()
            .withf(move |date| *date == tomorrow)
            .times(1)
            .return_once(|_| Ok(Vec::new()));
        let mut registry = LeaveRegistry::new(Arc::new(repo), clock);
        assert!(!registry.is_stale(), "nothing cached yet");

        registry.fetch_for_today().await.expect("fetch succeeds");
        assert!(!registry.is_stale());
        assert_eq!(registry.cached_day(), today());

        let later: DateTime<Utc> = Utc
            .with_ymd_and_hms(2026, 3, 2, 18, 40, 0)
            .single()
            .expect("valid instant");
        *now.lock().expect("clock lock") = later;
        assert!(registry.is_stale());
        assert_eq!(registry.cached_day(), today(), "cache still labelled with its own day");

        registry.fetch_for_today().await.expect("fetch succeeds");
        assert!(!registry.is_stale());
        assert_eq!(registry.cached_day(), tomorrow);
        assert!(registry.current().is_empty());
    }
}
