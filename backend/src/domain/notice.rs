//! User-facing notices and confirmation flags for board operations.

use serde::{Deserialize, Serialize};

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// The operation completed.
    Success,
    /// Nothing went wrong but nothing changed either.
    Info,
    /// The operation completed with a caveat.
    Warning,
}

/// Short message returned alongside a successful operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Human-readable text.
    pub message: String,
}

impl Notice {
    /// Build a success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Build an informational notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Build a warning notice.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

/// Answer to a "are you sure?" prompt guarding a destructive operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The caller confirmed.
    Confirmed,
    /// The caller declined; the operation must not run.
    Declined,
}

impl Confirmation {
    /// Whether the operation may proceed.
    #[must_use]
    pub fn is_confirmed(self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

impl From<bool> for Confirmation {
    fn from(value: bool) -> Self {
        if value {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }
}
