//! Staff identities used by the roster board.
//!
//! Staff records are never stored on their own: the board rebuilds them from
//! a name and a category whenever a cell is decoded or a drag lands, so the
//! identifier must be a pure function of those two values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// Staff category a roster entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffType {
    /// Nursing staff.
    Nurse,
    /// Resident medical officers.
    Rmo,
    /// Operation theatre staff.
    Ot,
}

impl StaffType {
    /// Every staff type, in the order used when inferring legacy entries.
    pub const ALL: [Self; 3] = [Self::Nurse, Self::Rmo, Self::Ot];

    /// Stable lowercase name used in identifiers and persisted payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nurse => "nurse",
            Self::Rmo => "rmo",
            Self::Ot => "ot",
        }
    }

    /// Prefix letter used by legacy comma-separated cells (`N:`, `R:`, `O:`).
    #[must_use]
    pub const fn legacy_prefix(self) -> char {
        match self {
            Self::Nurse => 'N',
            Self::Rmo => 'R',
            Self::Ot => 'O',
        }
    }

    /// Resolve a legacy prefix letter. Only the upper-case letters are valid.
    #[must_use]
    pub fn from_legacy_prefix(prefix: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|staff_type| staff_type.legacy_prefix() == prefix)
    }
}

impl fmt::Display for StaffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaffType {
    type Err = RosterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|staff_type| staff_type.as_str() == value)
            .ok_or_else(|| RosterError::UnknownStaffType {
                value: value.to_owned(),
            })
    }
}

/// Build the roster identifier for a staff member.
///
/// Every whitespace character in the name becomes an underscore.
///
/// # Examples
/// ```
/// use roster::{StaffType, staff_id};
///
/// assert_eq!(staff_id(StaffType::Nurse, "Mary Jane"), "nurse_Mary_Jane");
/// ```
#[must_use]
pub fn staff_id(staff_type: StaffType, name: &str) -> String {
    let slug: String = name
        .chars()
        .map(|ch| if ch.is_whitespace() { '_' } else { ch })
        .collect();
    format!("{staff_type}_{slug}")
}

/// A staff member placed on (or draggable onto) the roster board.
///
/// Deserialises from `{ "name", "type" }`; the identifier is always derived.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "StaffRef")]
pub struct StaffRecord {
    id: String,
    name: String,
    #[serde(rename = "type")]
    staff_type: StaffType,
}

#[derive(Deserialize)]
struct StaffRef {
    name: String,
    #[serde(rename = "type")]
    staff_type: StaffType,
}

impl From<StaffRef> for StaffRecord {
    fn from(value: StaffRef) -> Self {
        Self::new(value.name, value.staff_type)
    }
}

impl StaffRecord {
    /// Rebuild a record from a name and a category.
    pub fn new(name: impl Into<String>, staff_type: StaffType) -> Self {
        let name = name.into();
        Self {
            id: staff_id(staff_type, &name),
            name,
            staff_type,
        }
    }

    /// Roster identifier, `"{type}_{name}"`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name exactly as persisted.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Staff category.
    #[must_use]
    pub const fn staff_type(&self) -> StaffType {
        self.staff_type
    }
}

/// Names of rosterable staff, one ordered list per category.
///
/// Legacy cells without a type prefix are resolved against these lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffDirectory {
    nurses: Vec<String>,
    rmos: Vec<String>,
    ot_staff: Vec<String>,
}

impl StaffDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Names listed for a category, in insertion order.
    #[must_use]
    pub fn names(&self, staff_type: StaffType) -> &[String] {
        match staff_type {
            StaffType::Nurse => &self.nurses,
            StaffType::Rmo => &self.rmos,
            StaffType::Ot => &self.ot_staff,
        }
    }

    /// Add a name to a category, ignoring blanks and repeats.
    pub fn push(&mut self, staff_type: StaffType, name: impl Into<String>) {
        let name = name.into();
        if name.trim().is_empty() {
            return;
        }
        let list = match staff_type {
            StaffType::Nurse => &mut self.nurses,
            StaffType::Rmo => &mut self.rmos,
            StaffType::Ot => &mut self.ot_staff,
        };
        if !list.contains(&name) {
            list.push(name);
        }
    }

    /// Infer a category by membership, testing nurses, then RMOs, then OT staff.
    #[must_use]
    pub fn infer_type(&self, name: &str) -> Option<StaffType> {
        StaffType::ALL.into_iter().find(|staff_type| {
            self.names(*staff_type)
                .iter()
                .any(|candidate| candidate == name)
        })
    }

    /// Records for every listed staff member of a category.
    pub fn records(&self, staff_type: StaffType) -> impl Iterator<Item = StaffRecord> + '_ {
        self.names(staff_type)
            .iter()
            .map(move |name| StaffRecord::new(name.as_str(), staff_type))
    }

    /// Total number of listed names across categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nurses.len() + self.rmos.len() + self.ot_staff.len()
    }

    /// Whether no names are listed at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<(StaffType, String)> for StaffDirectory {
    fn from_iter<I: IntoIterator<Item = (StaffType, String)>>(iter: I) -> Self {
        let mut directory = Self::new();
        for (staff_type, name) in iter {
            directory.push(staff_type, name);
        }
        directory
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(StaffType::Nurse, "Alice", "nurse_Alice")]
    #[case(StaffType::Rmo, "Dr Ravi Kumar", "rmo_Dr_Ravi_Kumar")]
    #[case(StaffType::Ot, "Sam\tLee", "ot_Sam_Lee")]
    fn identifiers_replace_whitespace(
        #[case] staff_type: StaffType,
        #[case] name: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(StaffRecord::new(name, staff_type).id(), expected);
    }

    #[test]
    fn record_deserialises_from_name_and_type() {
        let record: StaffRecord =
            serde_json::from_str(r#"{"name":"Bob Ray","type":"rmo"}"#).expect("valid record");
        assert_eq!(record.id(), "rmo_Bob_Ray");
        assert_eq!(record.staff_type(), StaffType::Rmo);
    }

    #[test]
    fn record_ignores_supplied_identifier() {
        let record: StaffRecord =
            serde_json::from_str(r#"{"id":"forged","name":"Bob","type":"ot"}"#)
                .expect("valid record");
        assert_eq!(record.id(), "ot_Bob");
    }

    #[rstest]
    #[case('N', Some(StaffType::Nurse))]
    #[case('R', Some(StaffType::Rmo))]
    #[case('O', Some(StaffType::Ot))]
    #[case('n', None)]
    #[case('X', None)]
    fn legacy_prefixes_are_upper_case_letters(
        #[case] prefix: char,
        #[case] expected: Option<StaffType>,
    ) {
        assert_eq!(StaffType::from_legacy_prefix(prefix), expected);
    }

    #[test]
    fn staff_type_parses_lowercase_names() {
        assert_eq!("ot".parse::<StaffType>(), Ok(StaffType::Ot));
        assert!("OT".parse::<StaffType>().is_err());
    }

    #[test]
    fn inference_prefers_nurse_list() {
        let directory: StaffDirectory = [
            (StaffType::Rmo, "Jo".to_owned()),
            (StaffType::Nurse, "Jo".to_owned()),
        ]
        .into_iter()
        .collect();
        assert_eq!(directory.infer_type("Jo"), Some(StaffType::Nurse));
        assert_eq!(directory.infer_type("Nobody"), None);
    }

    #[test]
    fn directory_skips_blank_and_repeated_names() {
        let mut directory = StaffDirectory::new();
        directory.push(StaffType::Ot, "Kim");
        directory.push(StaffType::Ot, "Kim");
        directory.push(StaffType::Ot, "  ");
        assert_eq!(directory.names(StaffType::Ot), ["Kim".to_owned()]);
        assert_eq!(directory.len(), 1);
    }
}
