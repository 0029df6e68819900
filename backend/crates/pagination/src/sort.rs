//! Sort direction parsing and ordered sort keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction applied to a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest values first.
    #[serde(rename = "ASC")]
    Ascending,
    /// Largest values first.
    #[serde(rename = "DESC")]
    Descending,
}

impl SortDirection {
    /// Interpret a caller supplied direction.
    ///
    /// Only `DESC` (any case) selects descending order. Everything else,
    /// including a missing or unrecognised value, is ascending.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::SortDirection;
    ///
    /// assert_eq!(SortDirection::from_param(Some("desc")), SortDirection::Descending);
    /// assert_eq!(SortDirection::from_param(Some("sideways")), SortDirection::Ascending);
    /// assert_eq!(SortDirection::from_param(None), SortDirection::Ascending);
    /// ```
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some(raw) if raw.eq_ignore_ascii_case("DESC") => Self::Descending,
            _ => Self::Ascending,
        }
    }

    /// Canonical upper-case token (`ASC` or `DESC`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }

    /// Whether this is [`SortDirection::Descending`].
    #[must_use]
    pub const fn is_descending(self) -> bool {
        matches!(self, Self::Descending)
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sort key paired with its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortOrder<K> {
    key: K,
    direction: SortDirection,
}

impl<K> SortOrder<K> {
    /// Pair a key with a direction.
    pub const fn new(key: K, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Sort key.
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Sort direction.
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }
}
