#![forbid(unsafe_code)]

use dv_core::ids::{DocumentId, UserId};
use dv_core::{DiffLine, DocumentFields};
use serde::Serialize;

/// Immutable ledger entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Version {
    pub id: i64,
    pub document_id: DocumentId,
    pub version_number: i64,
    pub title: String,
    pub content: String,
    pub description: Option<String>,
    pub change_summary: Option<String>,
    pub author_id: UserId,
    pub created_at_ms: i64,
}

impl Version {
    pub fn fields(&self) -> DocumentFields {
        DocumentFields {
            title: self.title.clone(),
            content: self.content.clone(),
            description: self.description.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VersionPage {
    pub versions: Vec<Version>,
    pub page: usize,
    pub page_size: usize,
    pub total: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VersionDiff {
    pub document_id: DocumentId,
    pub from_version: i64,
    pub to_version: i64,
    pub title_changed: bool,
    pub description_changed: bool,
    pub added_lines: Vec<DiffLine>,
    pub removed_lines: Vec<DiffLine>,
}

impl VersionDiff {
    pub fn is_empty(&self) -> bool {
        !self.title_changed
            && !self.description_changed
            && self.added_lines.is_empty()
            && self.removed_lines.is_empty()
    }
}
