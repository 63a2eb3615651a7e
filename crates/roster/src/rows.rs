//! Persisted roster rows: reading the latest snapshot and building new ones.
//!
//! Every save appends one row per shift; nothing is ever updated. The
//! "current" roster is the newest row of each shift.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RosterError;
use crate::grid::AssignmentGrid;
use crate::layout::{Shift, Ward};

/// Format of the shared save timestamp, rendered in the roster's fixed offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// Render a save timestamp in the roster's fixed UTC offset.
///
/// # Examples
/// ```
/// use chrono::{FixedOffset, TimeZone, Utc};
/// use roster::format_timestamp;
///
/// let offset = FixedOffset::east_opt(5 * 3600 + 1800).expect("valid offset");
/// let instant = Utc.with_ymd_and_hms(2026, 3, 1, 2, 0, 0).single().expect("valid instant");
/// assert_eq!(format_timestamp(instant, offset), "2026-03-01 07:30:00+05:30");
/// ```
#[must_use]
pub fn format_timestamp(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant
        .with_timezone(&offset)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Parse a stored timestamp written by [`format_timestamp`] or as RFC 3339.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let trimmed = raw.trim();
    DateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed))
        .ok()
}

/// A roster row as returned by the backend.
///
/// Ward columns are kept loosely typed: they may hold a JSON string, a JSON
/// object (for `json` columns) or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterRow {
    /// Save timestamp shared by the rows of one save.
    #[serde(default)]
    pub timestamp: String,
    /// Shift name, e.g. `"Shift A"`.
    #[serde(default)]
    pub shift: String,
    /// Every other column, ward columns included.
    #[serde(flatten)]
    pub columns: BTreeMap<String, Value>,
}

impl RosterRow {
    /// The row's shift, when it names one of the fixed shifts.
    #[must_use]
    pub fn shift(&self) -> Option<Shift> {
        self.shift.parse().ok()
    }

    /// Raw cell text stored for a ward, if any.
    #[must_use]
    pub fn ward_cell(&self, ward: Ward) -> Option<Cow<'_, str>> {
        match self.columns.get(ward.column().as_ref())? {
            Value::Null => None,
            Value::String(text) => Some(Cow::Borrowed(text.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }
}

/// Keep the newest row of each shift.
///
/// Rows are expected most-recent-first. A later row only replaces the kept
/// one when both timestamps parse and it is strictly newer, so batch order
/// decides ties and unparseable timestamps. Rows naming an unknown shift are
/// ignored.
pub fn latest_per_shift<I>(rows: I) -> BTreeMap<Shift, RosterRow>
where
    I: IntoIterator<Item = RosterRow>,
{
    let mut latest = BTreeMap::new();
    for row in rows {
        let Some(shift) = row.shift() else {
            continue;
        };
        match latest.entry(shift) {
            Entry::Vacant(slot) => {
                slot.insert(row);
            }
            Entry::Occupied(mut slot) => {
                if is_newer(&row, slot.get()) {
                    slot.insert(row);
                }
            }
        }
    }
    latest
}

fn is_newer(candidate: &RosterRow, current: &RosterRow) -> bool {
    match (
        parse_timestamp(&candidate.timestamp),
        parse_timestamp(&current.timestamp),
    ) {
        (Some(candidate_at), Some(current_at)) => candidate_at > current_at,
        _ => false,
    }
}

/// A roster row ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterSaveRow {
    /// Save timestamp shared by all rows of one save.
    pub timestamp: String,
    /// Shift the row describes.
    pub shift: Shift,
    /// Ward column → JSON-encoded [`crate::WardCellPayload`].
    #[serde(flatten)]
    pub columns: BTreeMap<String, String>,
}

impl From<RosterSaveRow> for RosterRow {
    fn from(value: RosterSaveRow) -> Self {
        Self {
            timestamp: value.timestamp,
            shift: value.shift.name().to_owned(),
            columns: value
                .columns
                .into_iter()
                .map(|(column, cell)| (column, Value::String(cell)))
                .collect(),
        }
    }
}

/// Build one insertable row per shift from a (validated) grid.
///
/// # Errors
///
/// Returns [`RosterError::CellEncoding`] if a cell cannot be serialised.
pub fn build_save_rows(
    grid: &AssignmentGrid,
    timestamp: &str,
) -> Result<Vec<RosterSaveRow>, RosterError> {
    Shift::ALL
        .into_iter()
        .map(|shift| -> Result<RosterSaveRow, RosterError> {
            let columns = Ward::ALL
                .into_iter()
                .map(|ward| -> Result<(String, String), RosterError> {
                    let cell = grid.payload(ward, shift).to_json()?;
                    Ok((ward.column().into_owned(), cell))
                })
                .collect::<Result<BTreeMap<_, _>, _>>()?;
            Ok(RosterSaveRow {
                timestamp: timestamp.to_owned(),
                shift,
                columns,
            })
        })
        .collect()
}
