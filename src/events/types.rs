use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::favorites::FavoriteKind;

/// What happened to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeKind {
    SuiteAdded,
    SuiteRemoved,
    ToolAdded,
    ToolRemoved,
    AllCleared,
}

impl ChangeKind {
    #[must_use]
    pub const fn added(kind: FavoriteKind) -> Self {
        match kind {
            FavoriteKind::Suite => Self::SuiteAdded,
            FavoriteKind::Tool => Self::ToolAdded,
        }
    }

    #[must_use]
    pub const fn removed(kind: FavoriteKind) -> Self {
        match kind {
            FavoriteKind::Suite => Self::SuiteRemoved,
            FavoriteKind::Tool => Self::ToolRemoved,
        }
    }

    /// The namespace this change touched, `None` for [`ChangeKind::AllCleared`]
    #[must_use]
    pub const fn favorite_kind(self) -> Option<FavoriteKind> {
        match self {
            Self::SuiteAdded | Self::SuiteRemoved => Some(FavoriteKind::Suite),
            Self::ToolAdded | Self::ToolRemoved => Some(FavoriteKind::Tool),
            Self::AllCleared => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuiteAdded => "suite-added",
            Self::SuiteRemoved => "suite-removed",
            Self::ToolAdded => "tool-added",
            Self::ToolRemoved => "tool-removed",
            Self::AllCleared => "all-cleared",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single registry change, delivered once to current listeners
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    /// Affected identifier; absent for [`ChangeKind::AllCleared`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ChangeEvent {
    #[must_use]
    pub fn added(kind: FavoriteKind, id: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            kind: ChangeKind::added(kind),
            id: Some(id.into()),
            timestamp,
        }
    }

    #[must_use]
    pub fn removed(kind: FavoriteKind, id: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            kind: ChangeKind::removed(kind),
            id: Some(id.into()),
            timestamp,
        }
    }

    #[must_use]
    pub const fn cleared(timestamp: DateTime<Utc>) -> Self {
        Self {
            kind: ChangeKind::AllCleared,
            id: None,
            timestamp,
        }
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{} {id}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}
