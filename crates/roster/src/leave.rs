//! Names of staff on leave, partitioned by category.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::staff::{StaffRecord, StaffType, staff_id};

/// Staff on leave for the current day, one name set per category.
///
/// Membership is decided on the derived roster identifier, so `"Mary Jane"`
/// on leave also excludes a cell entry spelled `"Mary_Jane"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveSets {
    nurse: BTreeSet<String>,
    rmo: BTreeSet<String>,
    ot: BTreeSet<String>,
}

impl LeaveSets {
    /// Create empty leave sets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Names on leave for one category.
    #[must_use]
    pub const fn names(&self, staff_type: StaffType) -> &BTreeSet<String> {
        match staff_type {
            StaffType::Nurse => &self.nurse,
            StaffType::Rmo => &self.rmo,
            StaffType::Ot => &self.ot,
        }
    }

    const fn names_mut(&mut self, staff_type: StaffType) -> &mut BTreeSet<String> {
        match staff_type {
            StaffType::Nurse => &mut self.nurse,
            StaffType::Rmo => &mut self.rmo,
            StaffType::Ot => &mut self.ot,
        }
    }

    /// Record a name as on leave. Returns `false` when already present.
    pub fn insert(&mut self, staff_type: StaffType, name: impl Into<String>) -> bool {
        self.names_mut(staff_type).insert(name.into())
    }

    /// Drop a name from the leave set. Returns `true` when it was present.
    pub fn remove(&mut self, staff_type: StaffType, name: &str) -> bool {
        self.names_mut(staff_type).remove(name)
    }

    /// Whether the exact name is recorded for the category.
    #[must_use]
    pub fn contains(&self, staff_type: StaffType, name: &str) -> bool {
        self.names(staff_type).contains(name)
    }

    /// Whether the record's identifier matches anyone on leave.
    #[must_use]
    pub fn is_on_leave(&self, record: &StaffRecord) -> bool {
        let staff_type = record.staff_type();
        self.names(staff_type)
            .iter()
            .any(|name| staff_id(staff_type, name) == record.id())
    }

    /// Empty all three sets.
    pub fn clear(&mut self) {
        self.nurse.clear();
        self.rmo.clear();
        self.ot.clear();
    }

    /// Total number of names on leave.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nurse.len() + self.rmo.len() + self.ot.len()
    }

    /// Whether nobody is on leave.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<(StaffType, String)> for LeaveSets {
    fn from_iter<I: IntoIterator<Item = (StaffType, String)>>(iter: I) -> Self {
        let mut sets = Self::new();
        for (staff_type, name) in iter {
            sets.insert(staff_type, name);
        }
        sets
    }
}
