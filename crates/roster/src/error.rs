//! Error types for the roster crate.
//!
//! Only name lookups and cell encoding can fail; decoding persisted cells
//! never fails because malformed payloads fall back to the legacy format.

use thiserror::Error;

/// Errors raised while interpreting roster names or encoding cells.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// The ward name is not part of the fixed ward layout.
    #[error("unknown ward '{name}'")]
    UnknownWard {
        /// Ward name as supplied by the caller.
        name: String,
    },

    /// The shift name is not one of the fixed shifts.
    #[error("unknown shift '{name}'")]
    UnknownShift {
        /// Shift name as supplied by the caller.
        name: String,
    },

    /// The staff type is not `nurse`, `rmo` or `ot`.
    #[error("unknown staff type '{value}'")]
    UnknownStaffType {
        /// Staff type as supplied by the caller.
        value: String,
    },

    /// A ward cell payload could not be serialised.
    #[error("failed to encode ward cell: {message}")]
    CellEncoding {
        /// Description of the serialisation failure.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ward_formats_name() {
        let err = RosterError::UnknownWard {
            name: "Annex".to_owned(),
        };
        assert_eq!(err.to_string(), "unknown ward 'Annex'");
    }

    #[test]
    fn unknown_staff_type_formats_value() {
        let err = RosterError::UnknownStaffType {
            value: "porter".to_owned(),
        };
        assert_eq!(err.to_string(), "unknown staff type 'porter'");
    }
}
