//! Codec for the per-ward cell stored in each roster row.
//!
//! Current rows store a JSON object `{"nurse": [...], "rmo": [...], "ot": [...]}`.
//! Older rows store a comma-separated list such as `"N: Alice, R: Bob"`, where
//! an entry without a prefix is typed by looking its name up in the staff
//! directory. Decoding never fails: anything that is not a JSON object is read
//! with the legacy rules, and entries that cannot be typed are dropped.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::RosterError;
use crate::staff::{StaffDirectory, StaffRecord, StaffType};

/// Structured payload stored in one ward column for one shift.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WardCellPayload {
    /// Nurse names.
    #[serde(default)]
    pub nurse: Vec<String>,
    /// RMO names.
    #[serde(default)]
    pub rmo: Vec<String>,
    /// OT staff names.
    #[serde(default)]
    pub ot: Vec<String>,
}

impl WardCellPayload {
    /// Names stored for one category.
    #[must_use]
    pub fn names(&self, staff_type: StaffType) -> &[String] {
        match staff_type {
            StaffType::Nurse => &self.nurse,
            StaffType::Rmo => &self.rmo,
            StaffType::Ot => &self.ot,
        }
    }

    /// Append a name to its category list.
    pub fn push(&mut self, staff_type: StaffType, name: impl Into<String>) {
        let list = match staff_type {
            StaffType::Nurse => &mut self.nurse,
            StaffType::Rmo => &mut self.rmo,
            StaffType::Ot => &mut self.ot,
        };
        list.push(name.into());
    }

    /// Serialise to the JSON string persisted in the ward column.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::CellEncoding`] if serialisation fails.
    pub fn to_json(&self) -> Result<String, RosterError> {
        serde_json::to_string(self).map_err(|err| RosterError::CellEncoding {
            message: err.to_string(),
        })
    }
}

impl<'a> FromIterator<&'a StaffRecord> for WardCellPayload {
    fn from_iter<I: IntoIterator<Item = &'a StaffRecord>>(iter: I) -> Self {
        let mut payload = Self::default();
        for record in iter {
            payload.push(record.staff_type(), record.name());
        }
        payload
    }
}

/// Decoded content of one ward column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContents {
    /// The column was null or blank.
    Empty,
    /// The column held the structured JSON payload.
    Structured(WardCellPayload),
    /// The column held a legacy comma-separated list.
    Legacy(Vec<(StaffType, String)>),
}

impl CellContents {
    /// Decode a raw column value, falling back to the legacy format.
    #[must_use]
    pub fn decode(raw: Option<&str>, directory: &StaffDirectory) -> Self {
        let Some(text) = raw.filter(|value| !value.trim().is_empty()) else {
            return Self::Empty;
        };
        match decode_structured(text) {
            Some(payload) => Self::Structured(payload),
            None => {
                debug!(cell = text, "ward cell is not structured JSON; reading legacy list");
                Self::Legacy(decode_legacy(text, directory))
            }
        }
    }

    /// Staff records in stored order, skipping blank names.
    #[must_use]
    pub fn records(&self) -> Vec<StaffRecord> {
        let typed: Vec<(StaffType, &str)> = match self {
            Self::Empty => Vec::new(),
            Self::Structured(payload) => StaffType::ALL
                .into_iter()
                .flat_map(|staff_type| {
                    payload
                        .names(staff_type)
                        .iter()
                        .map(move |name| (staff_type, name.as_str()))
                })
                .collect(),
            Self::Legacy(entries) => entries
                .iter()
                .map(|(staff_type, name)| (*staff_type, name.as_str()))
                .collect(),
        };
        typed
            .into_iter()
            .filter(|(_, name)| !name.trim().is_empty())
            .map(|(staff_type, name)| StaffRecord::new(name, staff_type))
            .collect()
    }
}

fn decode_structured(text: &str) -> Option<WardCellPayload> {
    match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    }
}

/// Parse a legacy comma-separated cell.
///
/// Each entry is trimmed. `N:`, `R:` and `O:` select the category explicitly;
/// otherwise the directory decides, and unknown names are dropped.
///
/// # Examples
/// ```
/// use roster::{StaffDirectory, StaffType, decode_legacy};
///
/// let entries = decode_legacy("N: Alice, R: Bob", &StaffDirectory::new());
/// assert_eq!(
///     entries,
///     vec![(StaffType::Nurse, "Alice".to_owned()), (StaffType::Rmo, "Bob".to_owned())]
/// );
/// ```
#[must_use]
pub fn decode_legacy(text: &str, directory: &StaffDirectory) -> Vec<(StaffType, String)> {
    text.split(',')
        .filter_map(|entry| decode_legacy_entry(entry.trim(), directory))
        .collect()
}

fn decode_legacy_entry(entry: &str, directory: &StaffDirectory) -> Option<(StaffType, String)> {
    if entry.is_empty() {
        return None;
    }
    if let Some((staff_type, name)) = split_legacy_prefix(entry) {
        let trimmed = name.trim();
        return (!trimmed.is_empty()).then(|| (staff_type, trimmed.to_owned()));
    }
    directory
        .infer_type(entry)
        .map(|staff_type| (staff_type, entry.to_owned()))
}

fn split_legacy_prefix(entry: &str) -> Option<(StaffType, &str)> {
    let mut chars = entry.chars();
    let staff_type = chars.next().and_then(StaffType::from_legacy_prefix)?;
    chars.as_str().strip_prefix(':').map(|name| (staff_type, name))
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn directory() -> StaffDirectory {
        [
            (StaffType::Nurse, "Alice".to_owned()),
            (StaffType::Rmo, "Bob".to_owned()),
            (StaffType::Ot, "Omar".to_owned()),
        ]
        .into_iter()
        .collect()
    }

    #[rstest]
    fn structured_cells_decode_all_categories(directory: StaffDirectory) {
        let contents = CellContents::decode(
            Some(r#"{"nurse":["Alice"],"rmo":["Bob"],"ot":["Omar"]}"#),
            &directory,
        );
        let ids: Vec<String> = contents
            .records()
            .iter()
            .map(|record| record.id().to_owned())
            .collect();
        assert_eq!(ids, ["nurse_Alice", "rmo_Bob", "ot_Omar"]);
    }

    #[rstest]
    fn missing_categories_default_to_empty(directory: StaffDirectory) {
        let contents = CellContents::decode(Some(r#"{"nurse":["Alice"]}"#), &directory);
        assert_eq!(
            contents,
            CellContents::Structured(WardCellPayload {
                nurse: vec!["Alice".to_owned()],
                ..WardCellPayload::default()
            })
        );
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn blank_cells_are_empty(directory: StaffDirectory, #[case] raw: Option<&str>) {
        assert_eq!(CellContents::decode(raw, &directory), CellContents::Empty);
    }

    #[rstest]
    fn prefixed_legacy_entries_keep_their_type(directory: StaffDirectory) {
        let contents = CellContents::decode(Some("N: Alice, R: Bob"), &directory);
        assert_eq!(
            contents,
            CellContents::Legacy(vec![
                (StaffType::Nurse, "Alice".to_owned()),
                (StaffType::Rmo, "Bob".to_owned()),
            ])
        );
    }

    #[rstest]
    fn unprefixed_legacy_entries_are_inferred(directory: StaffDirectory) {
        let contents = CellContents::decode(Some("Alice"), &directory);
        assert_eq!(
            contents,
            CellContents::Legacy(vec![(StaffType::Nurse, "Alice".to_owned())])
        );
    }

    #[rstest]
    fn untypable_legacy_entries_are_dropped(directory: StaffDirectory) {
        let contents = CellContents::decode(Some("Stranger, O:Omar, ,N:   "), &directory);
        assert_eq!(
            contents,
            CellContents::Legacy(vec![(StaffType::Ot, "Omar".to_owned())])
        );
    }

    #[rstest]
    #[case(r#"["Alice"]"#)]
    #[case(r#"{"nurse":"Alice"}"#)]
    #[case("\"Alice\"")]
    fn non_object_json_uses_legacy_rules(directory: StaffDirectory, #[case] raw: &str) {
        assert!(matches!(
            CellContents::decode(Some(raw), &directory),
            CellContents::Legacy(_)
        ));
    }

    #[rstest]
    fn structured_blank_names_are_skipped(directory: StaffDirectory) {
        let contents = CellContents::decode(Some(r#"{"nurse":["", " ", "Alice"]}"#), &directory);
        assert_eq!(contents.records().len(), 1);
    }

    #[test]
    fn payload_serialises_in_category_order() {
        let records = [
            StaffRecord::new("Omar", StaffType::Ot),
            StaffRecord::new("Alice", StaffType::Nurse),
        ];
        let payload: WardCellPayload = records.iter().collect();
        assert_eq!(
            payload.to_json().expect("encode payload"),
            r#"{"nurse":["Alice"],"rmo":[],"ot":["Omar"]}"#
        );
    }
}
