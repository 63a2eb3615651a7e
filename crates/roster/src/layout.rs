//! Fixed ward and shift layout of the roster board.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// Ward display names and the roster table columns that store them.
const WARD_COLUMNS: [(&str, &str); 6] = [
    ("Male General Ward", "male_general_ward"),
    ("Female General Ward", "female_general_ward"),
    ("ICU", "icu"),
    ("Private Ward", "private_ward"),
    ("PICU", "picu"),
    ("NICU", "nicu"),
];

/// One of the six wards shown on the roster board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ward {
    /// Male general ward.
    #[serde(rename = "Male General Ward")]
    MaleGeneralWard,
    /// Female general ward.
    #[serde(rename = "Female General Ward")]
    FemaleGeneralWard,
    /// Intensive care unit.
    #[serde(rename = "ICU")]
    Icu,
    /// Private rooms.
    #[serde(rename = "Private Ward")]
    PrivateWard,
    /// Paediatric intensive care unit.
    #[serde(rename = "PICU")]
    Picu,
    /// Neonatal intensive care unit.
    #[serde(rename = "NICU")]
    Nicu,
}

impl Ward {
    /// Every ward in board order.
    pub const ALL: [Self; 6] = [
        Self::MaleGeneralWard,
        Self::FemaleGeneralWard,
        Self::Icu,
        Self::PrivateWard,
        Self::Picu,
        Self::Nicu,
    ];

    /// Display name of the ward.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MaleGeneralWard => "Male General Ward",
            Self::FemaleGeneralWard => "Female General Ward",
            Self::Icu => "ICU",
            Self::PrivateWard => "Private Ward",
            Self::Picu => "PICU",
            Self::Nicu => "NICU",
        }
    }

    /// Roster table column holding this ward's cell payload.
    #[must_use]
    pub fn column(self) -> Cow<'static, str> {
        ward_column(self.name())
    }
}

impl fmt::Display for Ward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ward {
    type Err = RosterError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ward| ward.name() == name)
            .ok_or_else(|| RosterError::UnknownWard {
                name: name.to_owned(),
            })
    }
}

/// Map a ward display name to its roster column.
///
/// Names missing from the fixed table are lower-cased with each whitespace
/// run replaced by a single underscore, so a ward added without a table entry
/// still gets a stable column.
///
/// # Examples
/// ```
/// use roster::ward_column;
///
/// assert_eq!(ward_column("Male General Ward"), "male_general_ward");
/// assert_eq!(ward_column("Burns  Unit"), "burns_unit");
/// ```
#[must_use]
pub fn ward_column(ward_name: &str) -> Cow<'static, str> {
    WARD_COLUMNS
        .iter()
        .find(|(name, _)| *name == ward_name)
        .map_or_else(
            || Cow::Owned(fallback_column(ward_name)),
            |(_, column)| Cow::Borrowed(*column),
        )
}

fn fallback_column(ward_name: &str) -> String {
    let mut column = String::with_capacity(ward_name.len());
    let mut in_whitespace = false;
    for ch in ward_name.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                column.push('_');
            }
            in_whitespace = true;
        } else {
            column.extend(ch.to_lowercase());
            in_whitespace = false;
        }
    }
    column
}

/// One of the three daily shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Shift {
    /// Morning shift.
    #[serde(rename = "Shift A")]
    A,
    /// Evening shift.
    #[serde(rename = "Shift B")]
    B,
    /// Night shift.
    #[serde(rename = "Shift C")]
    C,
}

impl Shift {
    /// Every shift in save order.
    pub const ALL: [Self; 3] = [Self::A, Self::B, Self::C];

    /// Shift name as stored in the roster table.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::A => "Shift A",
            Self::B => "Shift B",
            Self::C => "Shift C",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shift {
    type Err = RosterError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|shift| shift.name() == name)
            .ok_or_else(|| RosterError::UnknownShift {
                name: name.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn every_ward_has_a_table_column() {
        for ward in Ward::ALL {
            assert!(
                matches!(ward.column(), Cow::Borrowed(_)),
                "{ward} should map through the fixed table"
            );
        }
    }

    #[rstest]
    #[case("Burns Unit", "burns_unit")]
    #[case("Step Down\t Unit", "step_down_unit")]
    #[case(" HDU", "_hdu")]
    fn unknown_wards_fall_back_to_lowercase_underscore(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(ward_column(name), expected);
    }

    #[test]
    fn ward_names_round_trip_through_from_str() {
        for ward in Ward::ALL {
            assert_eq!(ward.name().parse::<Ward>(), Ok(ward));
        }
        assert!("icu".parse::<Ward>().is_err());
    }

    #[test]
    fn shifts_serialise_with_stored_names() {
        let json = serde_json::to_string(&Shift::B).expect("serialise shift");
        assert_eq!(json, "\"Shift B\"");
        assert_eq!("Shift C".parse::<Shift>(), Ok(Shift::C));
    }
}
